#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use monitor_core::{PricingTable, Source, TokenCounts};
use monitor_db::Db;
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date")
}

pub fn counts(input: u64, output: u64) -> TokenCounts {
    TokenCounts {
        input,
        output,
        ..TokenCounts::default()
    }
}

pub fn upsert(
    db: &mut Db,
    date: &str,
    source: Source,
    model: &str,
    tokens: TokenCounts,
    sessions: u64,
) -> f64 {
    let pricing = PricingTable::builtin();
    db.upsert_daily_usage(day(date), source, model, tokens, sessions, &pricing)
        .expect("upsert")
}
