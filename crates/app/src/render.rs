use chrono::{DateTime, Local, NaiveDate};

use monitor_core::{
    DailyRollup, PeriodTotals, PricingTable, TrendReport, format_cost, format_tokens,
    percent_change,
};
use monitor_sources::{ClaudeSnapshot, MoltbotSnapshot, RemoteUsage};

/// Everything gathered for one daily report. Absent sources simply drop
/// their section from the output.
#[derive(Debug, Clone, Default)]
pub struct ReportData {
    pub claude: Option<ClaudeSnapshot>,
    pub moltbot: Option<MoltbotSnapshot>,
    pub remote: Option<RemoteUsage>,
    pub today: Option<DailyRollup>,
    pub yesterday: Option<DailyRollup>,
    pub catch_up: Vec<(NaiveDate, Option<DailyRollup>)>,
}

pub fn compose_report(now: DateTime<Local>, data: &ReportData) -> String {
    let mut lines = vec![
        "Token Monitor Daily Report".to_string(),
        now.format("%Y-%m-%d %H:%M").to_string(),
    ];

    if let Some(claude) = &data.claude {
        lines.push(String::new());
        lines.push("[Claude Code]".to_string());
        lines.push(format!("Sessions: {}", claude.total_sessions));
        lines.push(format!("Messages: {}", claude.total_messages));
        lines.push(format!("Tokens: {}", format_tokens(claude.total_tokens())));
    }

    if let Some(moltbot) = &data.moltbot {
        lines.push(String::new());
        lines.push("[Moltbot]".to_string());
        lines.push(format!("Sessions: {}", moltbot.session_count));
        lines.push(format!("Input: {}", format_tokens(moltbot.total_input)));
        lines.push(format!("Output: {}", format_tokens(moltbot.total_output)));
    }

    if let Some(remote) = &data.remote {
        lines.push(String::new());
        lines.push("[API]".to_string());
        lines.push(format!("Total: ${:.2}", remote.amount()));
    }

    if data.catch_up.len() > 1 {
        lines.push(String::new());
        lines.push("[Catch-up]".to_string());
        for (date, rollup) in &data.catch_up {
            match rollup {
                Some(rollup) => lines.push(format!(
                    "{}: {} tokens, {}",
                    date,
                    format_tokens(rollup.total_tokens()),
                    format_cost(rollup.cost_estimate),
                )),
                None => lines.push(format!("{}: no data", date)),
            }
        }
    }

    if let Some(delta) = delta_lines(data) {
        lines.push(String::new());
        lines.push("[vs Yesterday]".to_string());
        lines.extend(delta);
    }

    lines.join("\n")
}

/// How loud an alert should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "ALERT",
        }
    }
}

/// Short out-of-band notification, same plain-text shape as the daily
/// report: severity header, the message, a timestamp footer.
pub fn compose_alert(now: DateTime<Local>, severity: AlertSeverity, message: &str) -> String {
    format!(
        "[{}] Token Monitor\n\n{}\n\n---\n{}",
        severity.label(),
        message,
        now.format("%Y-%m-%d %H:%M"),
    )
}

/// Comparison against the prior day, one line per figure that actually
/// changed. `None` when there is nothing to compare or nothing changed.
fn delta_lines(data: &ReportData) -> Option<Vec<String>> {
    let today = data.today.as_ref()?;
    let yesterday = data.yesterday.as_ref()?;

    let mut lines = Vec::new();
    if today.total_tokens() != yesterday.total_tokens() {
        let pct = percent_change(
            yesterday.total_tokens() as f64,
            today.total_tokens() as f64,
        );
        lines.push(format!("Tokens: {:+.1}%", pct));
    }
    let cost_diff = today.cost_estimate - yesterday.cost_estimate;
    if cost_diff.abs() > f64::EPSILON {
        let sign = if cost_diff < 0.0 { "-" } else { "+" };
        lines.push(format!("Cost: {}{}", sign, format_cost(cost_diff.abs())));
    }
    if today.sessions != yesterday.sessions {
        lines.push(format!(
            "Sessions: {:+}",
            today.sessions as i64 - yesterday.sessions as i64
        ));
    }

    if lines.is_empty() { None } else { Some(lines) }
}

pub fn render_trend(trend: &TrendReport) -> String {
    let mut lines = vec!["Token Usage Trend".to_string()];

    lines.push(String::new());
    lines.push("[Today]".to_string());
    push_period(&mut lines, &trend.today);

    lines.push(String::new());
    lines.push(format!("[This Week] ({} days)", trend.this_week.days));
    push_period(&mut lines, &trend.this_week.totals);

    lines.push(String::new());
    lines.push(format!("[Last Week] ({} days)", trend.last_week.days));
    push_period(&mut lines, &trend.last_week.totals);

    lines.push(String::new());
    lines.push("[Daily Average]".to_string());
    lines.push(format!(
        "Input: {}",
        format_tokens(trend.daily_average.input_tokens)
    ));
    lines.push(format!(
        "Output: {}",
        format_tokens(trend.daily_average.output_tokens)
    ));
    lines.push(format!("Cost: {}", format_cost(trend.daily_average.cost)));

    lines.push(String::new());
    lines.push("[Week over Week]".to_string());
    lines.push(format!(
        "Tokens: {:+.1}%",
        trend.week_over_week.tokens_change_pct
    ));
    lines.push(format!(
        "Cost: {:+.1}%",
        trend.week_over_week.cost_change_pct
    ));

    lines.join("\n")
}

fn push_period(lines: &mut Vec<String>, totals: &PeriodTotals) {
    lines.push(format!("Input: {}", format_tokens(totals.input_tokens)));
    lines.push(format!("Output: {}", format_tokens(totals.output_tokens)));
    let cached = totals
        .cache_read_tokens
        .saturating_add(totals.cache_write_tokens);
    if cached > 0 {
        lines.push(format!("Cached: {}", format_tokens(cached)));
    }
    lines.push(format!("Cost: {}", format_cost(totals.cost)));
}

pub fn render_history(rollups: &[DailyRollup]) -> String {
    if rollups.is_empty() {
        return "No usage recorded.".to_string();
    }
    let mut lines = vec![format!(
        "{:<12} {:>10} {:>10} {:>10} {:>10}",
        "Date", "Input", "Output", "Cached", "Cost"
    )];
    for rollup in rollups {
        let cached = rollup
            .tokens
            .cache_read
            .saturating_add(rollup.tokens.cache_write);
        lines.push(format!(
            "{:<12} {:>10} {:>10} {:>10} {:>10}",
            rollup.date.to_string(),
            format_tokens(rollup.tokens.input),
            format_tokens(rollup.tokens.output),
            format_tokens(cached),
            format_cost(rollup.cost_estimate),
        ));
    }
    lines.join("\n")
}

pub fn render_pricing(table: &PricingTable) -> String {
    let mut lines = vec![
        "Model pricing (USD per 1M tokens)".to_string(),
        String::new(),
        format!(
            "{:<32} {:>8} {:>8} {:>11} {:>12}",
            "Model", "Input", "Output", "Cache read", "Cache write"
        ),
    ];
    for (model, entry) in table.entries() {
        lines.push(format!(
            "{:<32} {:>8.2} {:>8.2} {:>11.2} {:>12.2}",
            model,
            entry.input_per_1m,
            entry.output_per_1m,
            entry.cache_read_per_1m,
            entry.cache_write_per_1m,
        ));
    }
    lines.join("\n")
}
