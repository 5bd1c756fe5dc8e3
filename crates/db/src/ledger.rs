use chrono::NaiveDate;
use rusqlite::{Row, params};

use monitor_core::{DailyRollup, PricingTable, Source, TokenCounts, UsageRecord};

use crate::Db;
use crate::error::{DbError, Result};

const DATE_FMT: &str = "%Y-%m-%d";

fn parse_date(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value, DATE_FMT)?)
}

fn parse_source(value: &str) -> Result<Source> {
    Source::parse(value).ok_or_else(|| DbError::UnknownSource(value.to_string()))
}

fn row_to_usage_record(row: &Row<'_>) -> Result<UsageRecord> {
    let date: String = row.get(0)?;
    let source: String = row.get(1)?;
    Ok(UsageRecord {
        date: parse_date(&date)?,
        source: parse_source(&source)?,
        model: row.get(2)?,
        tokens: TokenCounts {
            input: row.get::<_, i64>(3)? as u64,
            output: row.get::<_, i64>(4)? as u64,
            cache_read: row.get::<_, i64>(5)? as u64,
            cache_write: row.get::<_, i64>(6)? as u64,
        },
        sessions: row.get::<_, i64>(7)? as u64,
        cost_estimate: row.get(8)?,
    })
}

fn row_to_rollup(row: &Row<'_>) -> Result<DailyRollup> {
    let date: String = row.get(0)?;
    Ok(DailyRollup {
        date: parse_date(&date)?,
        tokens: TokenCounts {
            input: row.get::<_, i64>(1)? as u64,
            output: row.get::<_, i64>(2)? as u64,
            cache_read: row.get::<_, i64>(3)? as u64,
            cache_write: row.get::<_, i64>(4)? as u64,
        },
        sessions: row.get::<_, i64>(5)? as u64,
        cost_estimate: row.get(6)?,
    })
}

impl Db {
    /// Insert or replace the row for (date, source, model). The cost is
    /// computed from the pricing table before the write and returned.
    ///
    /// Re-ingesting a day's cumulative snapshot overwrites the previous
    /// values; the conflict clause keeps the write atomic under restart.
    pub fn upsert_daily_usage(
        &mut self,
        date: NaiveDate,
        source: Source,
        model: &str,
        counts: TokenCounts,
        sessions: u64,
        pricing: &PricingTable,
    ) -> Result<f64> {
        let cost = pricing.estimate(model, counts);
        self.conn.execute(
            r#"
            INSERT INTO daily_usage (
              date, source, model, input_tokens, output_tokens,
              cache_read_tokens, cache_write_tokens, sessions, cost_estimate
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(date, source, model) DO UPDATE SET
              input_tokens = excluded.input_tokens,
              output_tokens = excluded.output_tokens,
              cache_read_tokens = excluded.cache_read_tokens,
              cache_write_tokens = excluded.cache_write_tokens,
              sessions = excluded.sessions,
              cost_estimate = excluded.cost_estimate
            "#,
            params![
                date.format(DATE_FMT).to_string(),
                source.as_str(),
                model,
                counts.input as i64,
                counts.output as i64,
                counts.cache_read as i64,
                counts.cache_write as i64,
                sessions as i64,
                cost,
            ],
        )?;
        Ok(cost)
    }

    /// Ledger rows in [start, end], newest day first, then source and model.
    pub fn query_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        source: Option<Source>,
    ) -> Result<Vec<UsageRecord>> {
        let mut sql = String::from(
            r#"
            SELECT date, source, model, input_tokens, output_tokens,
                   cache_read_tokens, cache_write_tokens, sessions, cost_estimate
            FROM daily_usage
            WHERE date >= ?1 AND date <= ?2
            "#,
        );
        if source.is_some() {
            sql.push_str(" AND source = ?3 ");
        }
        sql.push_str(" ORDER BY date DESC, source ASC, model ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let start = start.format(DATE_FMT).to_string();
        let end = end.format(DATE_FMT).to_string();
        let mut rows = if let Some(source) = source {
            stmt.query(params![start, end, source.as_str()])?
        } else {
            stmt.query(params![start, end])?
        };
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(row_to_usage_record(row)?);
        }
        Ok(records)
    }

    /// Per-day sums across all sources and models in [start, end], newest
    /// day first. Days with no rows are absent rather than zeroed.
    pub fn rollup_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyRollup>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT date,
                   SUM(input_tokens), SUM(output_tokens),
                   SUM(cache_read_tokens), SUM(cache_write_tokens),
                   SUM(sessions), SUM(cost_estimate)
            FROM daily_usage
            WHERE date >= ?1 AND date <= ?2
            GROUP BY date
            ORDER BY date DESC
            "#,
        )?;
        let mut rows = stmt.query(params![
            start.format(DATE_FMT).to_string(),
            end.format(DATE_FMT).to_string()
        ])?;
        let mut rollups = Vec::new();
        while let Some(row) = rows.next()? {
            rollups.push(row_to_rollup(row)?);
        }
        Ok(rollups)
    }

    pub fn rollup_for(&self, date: NaiveDate) -> Result<Option<DailyRollup>> {
        Ok(self.rollup_range(date, date)?.into_iter().next())
    }
}
