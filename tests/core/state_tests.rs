//! Tests for chart slot state and chart identities

use cardscope::series::Series;
use cardscope::state::{ChartKind, ChartSlot};

#[test]
fn test_chart_endpoints() {
    assert_eq!(ChartKind::Aa.endpoint(), "/api/aa_minutes");
    assert_eq!(ChartKind::FourKind.endpoint(), "/api/four_kind_minutes");
}

#[test]
fn test_install_replaces_prior_state_wholesale() {
    let mut slot = ChartSlot::new(ChartKind::Aa);

    // a failed refresh followed by a layout correction
    slot.fail("Unable to load chart data.".to_string());
    slot.extra_right_margin = 24.0;
    slot.margin_corrected = true;

    let series = Series {
        labels: vec!["00:00".to_string()],
        counts: vec![1],
    };
    slot.install(series.clone());

    // nothing from the previous render cycle survives
    assert_eq!(slot.series, Some(series));
    assert_eq!(slot.error, None);
    assert_eq!(slot.extra_right_margin, 0.0);
    assert!(!slot.margin_corrected);
}

#[test]
fn test_fail_keeps_margin_state_for_current_series() {
    let mut slot = ChartSlot::new(ChartKind::FourKind);
    slot.install(Series::default());
    slot.margin_corrected = true;

    slot.fail("Unable to load chart data.".to_string());
    assert!(slot.error.is_some());
    assert!(slot.margin_corrected);
}
