use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod pricing;

pub use pricing::{PricingEntry, PricingTable, round_cost};

/// Upstream tool a usage row was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Claude,
    Moltbot,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Moltbot => "moltbot",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "claude" => Some(Self::Claude),
            "moltbot" => Some(Self::Moltbot),
            _ => None,
        }
    }
}

/// Token counts for one model on one day. Cache categories default to zero
/// for sources that do not report them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
}

impl TokenCounts {
    pub fn total(&self) -> u64 {
        self.input
            .saturating_add(self.output)
            .saturating_add(self.cache_read)
            .saturating_add(self.cache_write)
    }
}

/// One ledger row: tokens and estimated spend for (date, source, model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub date: NaiveDate,
    pub source: Source,
    pub model: String,
    pub tokens: TokenCounts,
    pub sessions: u64,
    pub cost_estimate: f64,
}

/// Same-day aggregate across all sources and models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRollup {
    pub date: NaiveDate,
    pub tokens: TokenCounts,
    pub sessions: u64,
    pub cost_estimate: f64,
}

impl DailyRollup {
    pub fn total_tokens(&self) -> u64 {
        self.tokens.total()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_read_tokens: u64,
    pub cache_write_tokens: u64,
    pub cost: f64,
}

impl PeriodTotals {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(self.cache_read_tokens)
            .saturating_add(self.cache_write_tokens)
    }

    /// Input + output, the figure used for week-over-week comparisons.
    pub fn turn_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekTotals {
    pub totals: PeriodTotals,
    pub days: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyAverage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekOverWeek {
    pub tokens_change_pct: f64,
    pub cost_change_pct: f64,
}

/// Derived trend figures, recomputed on every call from the ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub today: PeriodTotals,
    pub this_week: WeekTotals,
    pub last_week: WeekTotals,
    pub daily_average: DailyAverage,
    pub week_over_week: WeekOverWeek,
}

/// Percentage change from `previous` to `current`.
///
/// A zero baseline with new activity reports exactly 100 rather than an
/// undefined value; a zero baseline with no activity reports 0.
pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else if current == 0.0 {
        0.0
    } else {
        100.0
    }
}

pub fn format_tokens(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        format!("{:.2}M", tokens as f64 / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}K", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}

pub fn format_cost(cost: f64) -> String {
    if cost >= 1.0 {
        format!("${:.2}", cost)
    } else if cost >= 0.01 {
        format!("${:.3}", cost)
    } else {
        format!("${:.4}", cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_covers_zero_baselines() {
        assert_eq!(percent_change(0.0, 0.0), 0.0);
        assert_eq!(percent_change(0.0, 50.0), 100.0);
        assert_eq!(percent_change(100.0, 150.0), 50.0);
        assert_eq!(percent_change(100.0, 50.0), -50.0);
    }

    #[test]
    fn format_tokens_switches_units() {
        assert_eq!(format_tokens(999), "999");
        assert_eq!(format_tokens(1_000), "1.0K");
        assert_eq!(format_tokens(1_500), "1.5K");
        assert_eq!(format_tokens(1_000_000), "1.00M");
        assert_eq!(format_tokens(2_340_000), "2.34M");
    }

    #[test]
    fn format_cost_scales_precision() {
        assert_eq!(format_cost(12.5), "$12.50");
        assert_eq!(format_cost(0.123), "$0.123");
        assert_eq!(format_cost(0.0042), "$0.0042");
    }

    #[test]
    fn token_counts_total_sums_all_categories() {
        let counts = TokenCounts {
            input: 1,
            output: 2,
            cache_read: 3,
            cache_write: 4,
        };
        assert_eq!(counts.total(), 10);
    }

    #[test]
    fn source_round_trips_through_text() {
        assert_eq!(Source::parse(Source::Claude.as_str()), Some(Source::Claude));
        assert_eq!(
            Source::parse(Source::Moltbot.as_str()),
            Some(Source::Moltbot)
        );
        assert_eq!(Source::parse("cursor"), None);
    }
}
