mod support;

use std::fs;

use chrono::Duration;

use monitor_app::services::SendOutcome;
use monitor_app::{AppError, state};
use support::{MockTransport, at_nine, setup};

#[test]
fn send_records_snapshot_and_delivers_report() {
    let (_dir, app) = setup(Some("+15551234567"));
    let transport = MockTransport::new();
    let now = at_nine();

    let outcome = app
        .services
        .notify
        .run(now, &transport)
        .expect("send pass");
    assert_eq!(outcome, SendOutcome::Sent(vec![now.date_naive()]));
    assert_eq!(transport.count(), 1);

    let message = transport.last_message();
    assert!(message.contains("[Claude Code]"));
    assert!(message.contains("[Moltbot]"));

    let db = app.open_db().expect("open db");
    let rollup = db
        .rollup_for(now.date_naive())
        .expect("rollup")
        .expect("rows recorded");
    assert_eq!(rollup.tokens.input, 1_100);
    assert_eq!(rollup.tokens.output, 2_050);

    let marker = state::load_state(&app.config.state_path);
    assert_eq!(marker.last_sent, Some(now.date_naive()));
}

#[test]
fn second_run_same_day_delivers_and_records_nothing() {
    let (_dir, app) = setup(Some("+15551234567"));
    let transport = MockTransport::new();
    let now = at_nine();

    app.services.notify.run(now, &transport).expect("first pass");
    assert_eq!(transport.count(), 1);

    // Bigger figures would change the ledger if the second pass ingested.
    fs::write(
        &app.config.claude_stats_path,
        r#"{"modelUsage": {"claude-sonnet-4-5-20250514": {"inputTokens": 999999}}}"#,
    )
    .expect("rewrite stats");

    let outcome = app
        .services
        .notify
        .run(now, &transport)
        .expect("second pass");
    assert_eq!(outcome, SendOutcome::AlreadySent);
    assert_eq!(transport.count(), 1);

    let db = app.open_db().expect("open db");
    let rollup = db
        .rollup_for(now.date_naive())
        .expect("rollup")
        .expect("rows recorded");
    assert_eq!(rollup.tokens.input, 1_100);
}

#[test]
fn failed_delivery_leaves_marker_unset_for_retry() {
    let (_dir, app) = setup(Some("+15551234567"));
    let now = at_nine();

    let failing = MockTransport::failing();
    let err = app
        .services
        .notify
        .run(now, &failing)
        .expect_err("delivery fails");
    assert!(matches!(err, AppError::DeliveryFailed(_)));
    assert_eq!(state::load_state(&app.config.state_path).last_sent, None);

    let working = MockTransport::new();
    let outcome = app.services.notify.run(now, &working).expect("retry");
    assert_eq!(outcome, SendOutcome::Sent(vec![now.date_naive()]));
    assert_eq!(working.count(), 1);
}

#[test]
fn long_gap_sends_one_report_covering_capped_catch_up() {
    let (_dir, app) = setup(Some("+15551234567"));
    let now = at_nine();
    let today = now.date_naive();
    state::save_last_sent(&app.config.state_path, today - Duration::days(5), now)
        .expect("seed marker");

    let transport = MockTransport::new();
    let outcome = app.services.notify.run(now, &transport).expect("send pass");
    assert_eq!(
        outcome,
        SendOutcome::Sent(vec![
            today - Duration::days(2),
            today - Duration::days(1),
            today,
        ])
    );
    assert_eq!(transport.count(), 1);
    assert!(transport.last_message().contains("[Catch-up]"));
}

#[test]
fn missing_target_skips_delivery_and_keeps_marker_unset() {
    let (_dir, app) = setup(None);
    let transport = MockTransport::new();

    let outcome = app
        .services
        .notify
        .run(at_nine(), &transport)
        .expect("send pass");
    assert!(matches!(outcome, SendOutcome::Skipped(_)));
    assert_eq!(transport.count(), 0);
    assert_eq!(state::load_state(&app.config.state_path).last_sent, None);
}
