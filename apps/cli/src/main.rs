mod args;
mod config;
mod dirs;

use std::io;
use std::process::ExitCode;

use chrono::Local;

use monitor_app::render::{self, AlertSeverity};
use monitor_app::services::{DEFAULT_COST_THRESHOLD, SendOutcome};
use monitor_app::startup::{AppPaths, ensure_data_dir};
use monitor_app::transport::MessengerTransport;
use monitor_app::{AppConfig, AppState, RemoteConfig};
use monitor_core::{PricingTable, format_cost};
use monitor_sources::{default_claude_stats_path, default_moltbot_sessions_path};

fn main() -> ExitCode {
    let command = match args::parse_args() {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}");
            args::print_help();
            return ExitCode::FAILURE;
        }
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: args::Command) -> Result<(), Box<dyn std::error::Error>> {
    if command == args::Command::Help {
        args::print_help();
        return Ok(());
    }

    let loaded = config::load_or_create().map_err(io::Error::other)?;
    if loaded.created {
        println!("Created config at {}.", loaded.file.display());
    }

    let paths = AppPaths::new(dirs::resolve_data_dir().map_err(io::Error::other)?);
    ensure_data_dir(&paths)?;

    let app = AppState::new(build_app_config(&loaded.config, &paths)?);
    app.setup_db()?;

    let now = Local::now();
    let today = now.date_naive();
    match command {
        args::Command::Report => {
            println!("{}", app.services.report.build(now)?);
        }
        args::Command::Snapshot => {
            let stats = app.services.snapshot.run(today)?;
            println!("Recorded {} model rows for {}.", stats.rows(), today);
        }
        args::Command::Send => match app.services.notify.run(now, &MessengerTransport)? {
            SendOutcome::AlreadySent => println!("Already sent today."),
            SendOutcome::Skipped(reason) => eprintln!("warning: delivery skipped: {reason}"),
            SendOutcome::Sent(days) => println!("Report sent covering {} day(s).", days.len()),
        },
        args::Command::Run => {
            app.services.snapshot.run(today)?;
            println!("{}", app.services.report.build(now)?);
        }
        args::Command::History { days } => {
            let rollups = app.services.trend.history(today, days)?;
            println!("{}", render::render_history(&rollups));
        }
        args::Command::Trend => {
            let trend = app.services.trend.trend(today)?;
            println!("{}", render::render_trend(&trend));
        }
        args::Command::Pricing => {
            println!("{}", render::render_pricing(&PricingTable::builtin()));
        }
        args::Command::Alert { message } => {
            app.services
                .notify
                .send_alert(now, AlertSeverity::Warning, &message, &MessengerTransport)?;
            println!("Alert sent.");
        }
        args::Command::Check { threshold } => {
            let threshold = threshold.unwrap_or(DEFAULT_COST_THRESHOLD);
            let check =
                app.services
                    .notify
                    .check_cost_threshold(now, threshold, &MessengerTransport)?;
            if check.alerted {
                println!(
                    "Estimated cost {} reached {}; alert sent.",
                    format_cost(check.cost),
                    format_cost(check.threshold)
                );
            } else {
                println!(
                    "Estimated cost {} is under {}.",
                    format_cost(check.cost),
                    format_cost(check.threshold)
                );
            }
        }
        args::Command::Help => args::print_help(),
    }
    Ok(())
}

fn build_app_config(config: &config::CliConfig, paths: &AppPaths) -> Result<AppConfig, io::Error> {
    let claude_stats_path = default_claude_stats_path().map_err(io::Error::other)?;
    let moltbot_sessions_path = default_moltbot_sessions_path().map_err(io::Error::other)?;
    let remote = (!config.usage_api_url.is_empty() && !config.usage_api_key.is_empty()).then(|| {
        RemoteConfig {
            base_url: config.usage_api_url.clone(),
            api_key: config.usage_api_key.clone(),
        }
    });
    Ok(AppConfig {
        db_path: paths.db_path.clone(),
        state_path: paths.state_path.clone(),
        claude_stats_path,
        moltbot_sessions_path,
        remote,
        notify_target: non_empty(&config.notify_target),
        notes_folder: non_empty(&config.notes_folder),
    })
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
