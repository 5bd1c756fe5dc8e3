mod app;
mod error;
pub mod render;
pub mod scheduler;
pub mod services;
pub mod startup;
pub mod state;
pub mod transport;

pub use app::{AppConfig, AppState, RemoteConfig, setup_db};
pub use error::{AppError, Result};
