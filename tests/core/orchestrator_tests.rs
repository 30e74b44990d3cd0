//! Tests for debounce and refresh-cycle orchestration
//!
//! Tests cover:
//! - Debounce collapse of rapid selector changes
//! - Concurrent dispatch and joint settling of chart refreshes
//! - Structural skipping of absent refresh callables
//! - Per-operation failure isolation

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use cardscope::api::{ApiError, MinuteSeries};
use cardscope::orchestrator::{ChartRefreshers, Debouncer, RefreshCycle, RefreshFn};
use cardscope::state::ChartKind;

fn ok_series(counts: Vec<u64>) -> RefreshFn {
    Arc::new(move |_agg| {
        Ok(MinuteSeries {
            labels: Vec::new(),
            counts: counts.clone(),
            agg: None,
        })
    })
}

fn failing(status: u16) -> RefreshFn {
    Arc::new(move |_agg| Err(ApiError::Status { status }))
}

// ============================================
// Debouncer Tests
// ============================================

#[test]
fn test_debounce_collapses_rapid_triggers() {
    let mut debouncer = Debouncer::new(Duration::from_millis(250));
    let t0 = Instant::now();

    debouncer.trigger(5, t0);
    debouncer.trigger(15, t0 + Duration::from_millis(100));

    // quiet period restarts on every trigger
    assert_eq!(debouncer.poll(t0 + Duration::from_millis(300)), None);

    // fires exactly once, with the last-observed value
    assert_eq!(debouncer.poll(t0 + Duration::from_millis(360)), Some(15));
    assert_eq!(debouncer.poll(t0 + Duration::from_millis(400)), None);
    assert!(!debouncer.is_pending());
}

#[test]
fn test_debounce_does_not_fire_early() {
    let mut debouncer = Debouncer::new(Duration::from_millis(250));
    let t0 = Instant::now();

    debouncer.trigger(2, t0);
    assert_eq!(debouncer.poll(t0 + Duration::from_millis(249)), None);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.poll(t0 + Duration::from_millis(250)), Some(2));
}

#[test]
fn test_debounce_cancel_drops_pending_trigger() {
    let mut debouncer = Debouncer::new(Duration::from_millis(250));
    let t0 = Instant::now();

    debouncer.trigger(8, t0);
    debouncer.cancel();
    assert_eq!(debouncer.poll(t0 + Duration::from_secs(1)), None);
}

// ============================================
// Refresh Cycle Tests
// ============================================

#[test]
fn test_cycle_settles_both_charts() {
    let refreshers = ChartRefreshers {
        aa: Some(ok_series(vec![1, 2])),
        four_kind: Some(ok_series(vec![3])),
    };

    let mut cycle = RefreshCycle::start(&refreshers, 1).expect("cycle should start");
    let settled = cycle.wait();

    assert!(cycle.is_complete());
    assert_eq!(settled.len(), 2);
    let kinds: Vec<ChartKind> = settled.iter().map(|(k, _)| *k).collect();
    assert!(kinds.contains(&ChartKind::Aa));
    assert!(kinds.contains(&ChartKind::FourKind));
}

#[test]
fn test_cycle_passes_aggregation_to_every_callable() {
    let seen = Arc::new(AtomicUsize::new(0));
    let make = |seen: Arc<AtomicUsize>| -> RefreshFn {
        Arc::new(move |agg| {
            seen.fetch_add(agg as usize, Ordering::SeqCst);
            Ok(MinuteSeries {
                labels: Vec::new(),
                counts: Vec::new(),
                agg: Some(agg),
            })
        })
    };

    let refreshers = ChartRefreshers {
        aa: Some(make(Arc::clone(&seen))),
        four_kind: Some(make(Arc::clone(&seen))),
    };

    let mut cycle = RefreshCycle::start(&refreshers, 15).expect("cycle should start");
    cycle.wait();

    assert_eq!(cycle.agg(), 15);
    assert_eq!(seen.load(Ordering::SeqCst), 30);
}

#[test]
fn test_absent_callable_is_skipped_silently() {
    let refreshers = ChartRefreshers {
        aa: Some(ok_series(vec![9])),
        four_kind: None,
    };

    let mut cycle = RefreshCycle::start(&refreshers, 1).expect("cycle should start");
    let settled = cycle.wait();

    assert!(cycle.is_complete());
    assert_eq!(settled.len(), 1);
    assert_eq!(settled[0].0, ChartKind::Aa);
    assert!(settled[0].1.is_ok());
}

#[test]
fn test_no_callables_means_no_cycle() {
    let refreshers = ChartRefreshers::default();
    assert!(RefreshCycle::start(&refreshers, 1).is_none());
}

#[test]
fn test_failure_in_one_chart_does_not_block_the_other() {
    let refreshers = ChartRefreshers {
        aa: Some(failing(500)),
        four_kind: Some(ok_series(vec![4, 4])),
    };

    let mut cycle = RefreshCycle::start(&refreshers, 1).expect("cycle should start");
    let settled = cycle.wait();

    assert!(cycle.is_complete());
    assert_eq!(settled.len(), 2);

    for (kind, result) in settled {
        match kind {
            ChartKind::Aa => {
                let err = result.expect_err("AA refresh should fail");
                assert!(matches!(err, ApiError::Status { status: 500 }));
            }
            ChartKind::FourKind => {
                assert_eq!(result.expect("four kind should succeed").counts, vec![4, 4]);
            }
        }
    }
}

#[test]
fn test_poll_drains_without_blocking() {
    let refreshers = ChartRefreshers {
        aa: Some(ok_series(vec![1])),
        four_kind: Some(ok_series(vec![2])),
    };

    let mut cycle = RefreshCycle::start(&refreshers, 1).expect("cycle should start");

    // Workers settle quickly; poll until both results have arrived
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut settled = Vec::new();
    while !cycle.is_complete() && Instant::now() < deadline {
        settled.extend(cycle.poll());
        std::thread::sleep(Duration::from_millis(5));
    }

    assert!(cycle.is_complete());
    assert_eq!(settled.len(), 2);
}

#[test]
fn test_server_wiring_installs_both_callables() {
    let refreshers = ChartRefreshers::for_server("http://127.0.0.1:5000");
    assert!(refreshers.get(ChartKind::Aa).is_some());
    assert!(refreshers.get(ChartKind::FourKind).is_some());
}
