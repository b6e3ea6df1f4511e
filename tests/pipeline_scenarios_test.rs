//! Pipeline behaviour tests: dedup, filtering, level mapping, reset, and
//! the end-to-end frame scenarios.

mod common;

use common::{access_frame, config_for, cpu_frame, test_now, user_frame};
use structlog_view::config::DisplayMode;
use structlog_view::pipeline::{ActiveRenderer, Deduplicator, FrameOutcome, Session};
use structlog_view::render::classify_level;

fn open_session(mode: DisplayMode) -> Session {
    let mut session = Session::new(config_for(mode));
    assert!(session.open());
    session
}

fn card_count(session: &Session) -> usize {
    session.renderer().cards().map(|c| c.len()).unwrap_or(0)
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_admit_true_once() {
    let mut dedup = Deduplicator::default();
    assert!(dedup.admit("x"));
    for _ in 0..10 {
        assert!(!dedup.admit("x"));
    }
    assert_eq!(dedup.len(), 1);
}

#[test]
fn test_same_record_many_times_renders_once() {
    let mut session = open_session(DisplayMode::User);
    let frame = user_frame("a1", "info");

    assert_eq!(session.handle_frame(&frame, test_now()), FrameOutcome::Rendered);
    for _ in 0..5 {
        assert_eq!(session.handle_frame(&frame, test_now()), FrameOutcome::Duplicate);
    }
    assert_eq!(card_count(&session), 1);
    assert_eq!(session.stats().duplicates, 5);
}

#[test]
fn test_duplicate_cpu_record_adds_one_point() {
    let mut session = open_session(DisplayMode::Cpu);
    let frame = cpu_frame("c1", 10.0, 20.0, 30.0);
    session.handle_frame(&frame, test_now());
    session.handle_frame(&frame, test_now());

    let metrics = session.renderer().metrics().unwrap();
    assert_eq!(metrics.series_for("Camano").unwrap().len(), 1);
}

// ============================================================================
// Type filtering
// ============================================================================

#[test]
fn test_access_mode_filters_every_other_type() {
    let mut session = open_session(DisplayMode::Access);
    let frames = [
        user_frame("u1", "info"),
        cpu_frame("c1", 1.0, 2.0, 3.0),
        r#"{"type":"audit","uuid":"z1"}"#.to_string(),
        r#"{"uuid":"n1"}"#.to_string(),
    ];

    for frame in &frames {
        assert_ne!(session.handle_frame(frame, test_now()), FrameOutcome::Rendered);
    }
    assert_eq!(card_count(&session), 0);

    assert_eq!(
        session.handle_frame(&access_frame("a1", 200), test_now()),
        FrameOutcome::Rendered
    );
    assert_eq!(card_count(&session), 1);
}

#[test]
fn test_filtered_record_not_marked_seen() {
    let mut session = open_session(DisplayMode::Access);
    session.handle_frame(r#"{"type":"user","uuid":"shared"}"#, test_now());
    assert_eq!(session.seen_count(), 0);

    let outcome = session.handle_frame(r#"{"type":"access","uuid":"shared"}"#, test_now());
    assert_eq!(outcome, FrameOutcome::Rendered);
}

// ============================================================================
// Level mapping
// ============================================================================

#[test]
fn test_severe_levels_map_to_danger() {
    assert_eq!(classify_level("critical"), "danger");
    assert_eq!(classify_level("error"), "danger");
}

#[test]
fn test_other_levels_unchanged() {
    for level in ["info", "warning", "debug", "ERROR", "", "custom"] {
        assert_eq!(classify_level(level), level);
    }
}

// ============================================================================
// Reconfiguration
// ============================================================================

#[test]
fn test_reconfigure_allows_readmission() {
    let mut session = open_session(DisplayMode::User);
    let frame = user_frame("a1", "info");
    session.handle_frame(&frame, test_now());

    assert!(session.reconfigure(config_for(DisplayMode::User)));
    assert!(session.open());
    assert_eq!(session.seen_count(), 0);
    assert_eq!(card_count(&session), 0);

    assert_eq!(session.handle_frame(&frame, test_now()), FrameOutcome::Rendered);
}

#[test]
fn test_reconfigure_switches_renderer() {
    let mut session = open_session(DisplayMode::User);
    session.reconfigure(config_for(DisplayMode::Cpu));
    session.open();
    assert!(matches!(session.renderer(), ActiveRenderer::Metric(_)));
}

// ============================================================================
// Metric bounding
// ============================================================================

#[test]
fn test_metric_series_keeps_only_visible_window() {
    let mut session = open_session(DisplayMode::Cpu);
    let window = session.config().metric_window;
    let start = test_now();

    for i in 0..100 {
        let at = start + chrono::Duration::seconds(i);
        session.handle_frame(&cpu_frame(&format!("c{}", i), i as f64, 0.0, 0.0), at);
    }

    let end = start + chrono::Duration::seconds(99);
    let cutoff = end - chrono::Duration::from_std(window).unwrap();
    let series = session.renderer().metrics().unwrap().series_for("Camano").unwrap();
    assert!(series.len() <= window.as_secs() as usize + 1);
    assert!(series.points().all(|(at, _)| *at >= cutoff));
    assert_eq!(series.points().last().map(|(_, v)| *v), Some(99.0));
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_error_user_record_renders_danger_card_once() {
    let mut session = open_session(DisplayMode::User);
    let frame = r#"{"type":"user","uuid":"a1","level":"error","username":"bob"}"#;

    session.handle_frame(frame, test_now());
    let cards = session.renderer().cards().unwrap();
    assert_eq!(cards.len(), 1);
    let card = cards.newest().unwrap();
    assert_eq!(card.classification, "danger");
    assert_eq!(card.title.as_deref(), Some("bob"));

    session.handle_frame(frame, test_now());
    assert_eq!(card_count(&session), 1);
}

#[test]
fn test_cpu_record_touches_only_named_server() {
    let mut session = open_session(DisplayMode::Cpu);
    let outcome = session.handle_frame(
        r#"{"type":"cpu","uuid":"b2","servers":{"Camano":42}}"#,
        test_now(),
    );
    assert_eq!(outcome, FrameOutcome::Rendered);

    let metrics = session.renderer().metrics().unwrap();
    let camano = metrics.series_for("Camano").unwrap();
    assert_eq!(camano.len(), 1);
    assert_eq!(camano.points().next().map(|(_, v)| *v), Some(42.0));
    assert!(metrics.series_for("Rosario").unwrap().is_empty());
    assert!(metrics.series_for("Monaco").unwrap().is_empty());
}

#[test]
fn test_malformed_frame_dropped_and_loop_continues() {
    let mut session = open_session(DisplayMode::User);

    let outcome = session.handle_frame("{\"type\":\"user\",", test_now());
    assert!(matches!(outcome, FrameOutcome::Dropped(_)));
    assert_eq!(card_count(&session), 0);

    let outcome = session.handle_frame(&user_frame("a2", "info"), test_now());
    assert_eq!(outcome, FrameOutcome::Rendered);
    assert_eq!(card_count(&session), 1);
    assert_eq!(session.stats().dropped, 1);
}

#[test]
fn test_cards_listed_in_arrival_order_newest_first() {
    let mut session = open_session(DisplayMode::User);
    // Event timestamps are ignored for ordering
    session.handle_frame(
        r#"{"type":"user","uuid":"late","timestamp":"2020-05-01T11:00:00Z"}"#,
        test_now(),
    );
    session.handle_frame(
        r#"{"type":"user","uuid":"early","timestamp":"2019-01-01T00:00:00Z"}"#,
        test_now(),
    );

    let uuids: Vec<&str> = session
        .renderer()
        .cards()
        .unwrap()
        .iter()
        .map(|c| c.uuid.as_str())
        .collect();
    assert_eq!(uuids, vec!["early", "late"]);
}

#[test]
fn test_cpu_record_with_huge_window_does_not_panic() {
    let mut session = Session::new(structlog_view::config::ViewerConfig {
        metric_window: std::time::Duration::from_secs(10_000_000_000_000),
        ..config_for(DisplayMode::Cpu)
    });
    session.open();

    let outcome = session.handle_frame(
        r#"{"type":"cpu","uuid":"b2","servers":{"Camano":42}}"#,
        test_now(),
    );
    assert_eq!(outcome, FrameOutcome::Rendered);
    session.tick(test_now());

    let metrics = session.renderer().metrics().unwrap();
    assert_eq!(metrics.series_for("Camano").unwrap().len(), 1);
}
