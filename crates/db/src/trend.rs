use chrono::{Duration, NaiveDate};

use monitor_core::{
    DailyAverage, PeriodTotals, TrendReport, WeekOverWeek, WeekTotals, percent_change, round_cost,
};

use crate::Db;
use crate::error::Result;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Db {
    /// Rollups and deltas for the week ending at `reference`.
    ///
    /// "This week" is every day on or after `reference - 7`; "last week" is
    /// `[reference - 14, reference - 7)`. Nothing is cached; every call
    /// recomputes from the ledger.
    pub fn compute_trend(&self, reference: NaiveDate) -> Result<TrendReport> {
        let week_ago = reference - Duration::days(7);
        let two_weeks_ago = reference - Duration::days(14);

        let (today, _) = self.window_totals("date = ?1", &[&fmt(reference)])?;
        let (this_week, this_week_days) = self.window_totals("date >= ?1", &[&fmt(week_ago)])?;
        let (last_week, last_week_days) = self.window_totals(
            "date >= ?1 AND date < ?2",
            &[&fmt(two_weeks_ago), &fmt(week_ago)],
        )?;

        // Minimum divisor of 1 keeps empty windows from dividing by zero.
        let divisor = this_week_days.max(1) as f64;
        let daily_average = DailyAverage {
            input_tokens: (this_week.input_tokens as f64 / divisor).round() as u64,
            output_tokens: (this_week.output_tokens as f64 / divisor).round() as u64,
            cost: round_cost(this_week.cost / divisor),
        };

        let week_over_week = WeekOverWeek {
            tokens_change_pct: round2(percent_change(
                last_week.turn_tokens() as f64,
                this_week.turn_tokens() as f64,
            )),
            cost_change_pct: round2(percent_change(last_week.cost, this_week.cost)),
        };

        Ok(TrendReport {
            today,
            this_week: WeekTotals {
                totals: this_week,
                days: this_week_days,
            },
            last_week: WeekTotals {
                totals: last_week,
                days: last_week_days,
            },
            daily_average,
            week_over_week,
        })
    }

    fn window_totals(
        &self,
        predicate: &str,
        bind: &[&dyn rusqlite::ToSql],
    ) -> Result<(PeriodTotals, u32)> {
        let sql = format!(
            r#"
            SELECT SUM(input_tokens), SUM(output_tokens),
                   SUM(cache_read_tokens), SUM(cache_write_tokens),
                   SUM(cost_estimate), COUNT(DISTINCT date)
            FROM daily_usage
            WHERE {predicate}
            "#
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let result = stmt.query_row(bind, |row| {
            Ok((
                row.get::<_, Option<i64>>(0)?.unwrap_or(0) as u64,
                row.get::<_, Option<i64>>(1)?.unwrap_or(0) as u64,
                row.get::<_, Option<i64>>(2)?.unwrap_or(0) as u64,
                row.get::<_, Option<i64>>(3)?.unwrap_or(0) as u64,
                row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
                row.get::<_, i64>(5)? as u32,
            ))
        })?;
        let (input, output, cache_read, cache_write, cost, days) = result;
        Ok((
            PeriodTotals {
                input_tokens: input,
                output_tokens: output,
                cache_read_tokens: cache_read,
                cache_write_tokens: cache_write,
                cost,
            },
            days,
        ))
    }
}

fn fmt(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
