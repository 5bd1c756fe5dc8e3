use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("ledger error: {0}")]
    Ledger(#[from] monitor_db::DbError),
    #[error("source error: {0}")]
    Source(#[from] monitor_sources::SourceError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
    #[error("missing configuration: {0}")]
    ConfigMissing(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
