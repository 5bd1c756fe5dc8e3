use std::env;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Report,
    Snapshot,
    Send,
    Run,
    History { days: u32 },
    Trend,
    Pricing,
    Alert { message: String },
    Check { threshold: Option<f64> },
    Help,
}

pub fn parse_args() -> Result<Command, String> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        return Ok(Command::Report);
    };

    let parsed = match command.as_str() {
        "report" => Command::Report,
        "snapshot" => Command::Snapshot,
        "send" => Command::Send,
        "run" | "all" => Command::Run,
        "history" => {
            let days = match args.next() {
                Some(value) => value
                    .parse::<u32>()
                    .map_err(|_| format!("invalid day count: {value}"))?,
                None => 7,
            };
            Command::History { days }
        }
        "trend" => Command::Trend,
        "pricing" => Command::Pricing,
        "alert" => {
            let parts: Vec<String> = args.by_ref().collect();
            if parts.is_empty() {
                return Err("missing alert message".to_string());
            }
            Command::Alert {
                message: parts.join(" "),
            }
        }
        "check" => {
            let threshold = match args.next() {
                Some(value) => Some(
                    value
                        .parse::<f64>()
                        .map_err(|_| format!("invalid threshold: {value}"))?,
                ),
                None => None,
            };
            Command::Check { threshold }
        }
        "help" | "--help" | "-h" => Command::Help,
        other => {
            return Err(format!("unknown command: {other}"));
        }
    };

    if let Some(extra) = args.next() {
        return Err(format!("unexpected argument: {extra}"));
    }

    Ok(parsed)
}

pub fn print_help() {
    println!(
        "Token Monitor CLI\n\n\
         Usage:\n  token-monitor [command]\n\n\
         Commands:\n\
         \x20 report            Print today's report (no side effects)\n\
         \x20 snapshot          Record today's usage in the ledger\n\
         \x20 send              Record and deliver the daily report (once per day)\n\
         \x20 run | all         Record today's usage, then print the report\n\
         \x20 history [days]    Show daily rollups for the last N days (default 7)\n\
         \x20 trend             Show weekly usage trend\n\
         \x20 pricing           List built-in model pricing\n\
         \x20 alert <message>   Send an out-of-band alert notification\n\
         \x20 check [threshold] Alert when estimated cost reaches the threshold (default $50)\n\
         \x20 help              Show this help message\n"
    );
}
