//! Core application state types and constants.
//!
//! This module contains the fundamental data structures used throughout
//! the application: chart identities, per-chart render state, and the
//! toast notification types.

use std::time::Duration;

use crate::series::Series;

// ============================================================================
// Constants
// ============================================================================

/// Maximum points to render in a chart; longer series are bucket-summed down
pub const MAX_CHART_POINTS: usize = 1440;

/// Quiet period before a selector change actually starts a refresh cycle
pub const REFRESH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Fixed pixel height of each chart plot
pub const CHART_HEIGHT: f32 = 320.0;

/// Aggregation factors offered by the selector controls (minutes per bucket)
pub const AGGREGATION_CHOICES: &[u32] = &[1, 2, 5, 10, 15, 30, 60];

/// Line color per chart (matches the original dashboard theme)
pub const CHART_LINE_COLORS: &[[u8; 3]] = &[
    [26, 115, 232], // Blue (AA)
    [191, 78, 48],  // Rust orange (four-of-a-kind)
];

// ============================================================================
// Chart Types
// ============================================================================

/// The two occurrence charts on the dashboard
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ChartKind {
    /// Pocket-aces occurrences per minute of day
    Aa,
    /// Four-of-a-kind occurrences per minute of day
    FourKind,
}

impl ChartKind {
    /// Both charts, in display order
    pub const ALL: [ChartKind; 2] = [ChartKind::Aa, ChartKind::FourKind];

    /// Get the display title for this chart
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Aa => "AA per minute",
            ChartKind::FourKind => "Four of a kind per minute",
        }
    }

    /// Get the server endpoint path serving this chart's series
    pub fn endpoint(&self) -> &'static str {
        match self {
            ChartKind::Aa => "/api/aa_minutes",
            ChartKind::FourKind => "/api/four_kind_minutes",
        }
    }

    /// Get the line color for this chart
    pub fn line_color(&self) -> [u8; 3] {
        CHART_LINE_COLORS[*self as usize]
    }
}

/// Render state owned by one chart.
///
/// A completed refresh replaces the slot's contents wholesale: `install`
/// clears any fallback message and resets the one-shot layout-correction
/// state, so nothing from the previous series survives into the next
/// render cycle.
pub struct ChartSlot {
    /// Which chart this slot backs
    pub kind: ChartKind,
    /// Prepared (normalized + downsampled) series, if a fetch has succeeded
    pub series: Option<Series>,
    /// Human-readable fallback message shown in place of the plot
    pub error: Option<String>,
    /// Extra right-side margin added by the overflow correction, in pixels
    pub extra_right_margin: f32,
    /// Whether the post-layout measurement has already run for this series
    pub margin_corrected: bool,
}

impl ChartSlot {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            series: None,
            error: None,
            extra_right_margin: 0.0,
            margin_corrected: false,
        }
    }

    /// Install a freshly prepared series, replacing all prior render state
    pub fn install(&mut self, series: Series) {
        self.series = Some(series);
        self.error = None;
        self.extra_right_margin = 0.0;
        self.margin_corrected = false;
    }

    /// Record a failed refresh; the renderer shows `message` instead of a plot
    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
    }
}

// ============================================================================
// Toast Types
// ============================================================================

/// Type of toast notification (determines color)
#[derive(Clone, Copy, Default)]
pub enum ToastType {
    /// Informational message (blue)
    #[default]
    Info,
    /// Success message (green)
    Success,
    /// Warning message (amber)
    Warning,
    /// Error message (red)
    Error,
}

impl ToastType {
    /// Get the background color for this toast type
    pub fn color(&self) -> [u8; 3] {
        match self {
            ToastType::Info => [71, 108, 155],    // Blue
            ToastType::Success => [113, 120, 78], // Olive green
            ToastType::Warning => [253, 193, 73], // Amber
            ToastType::Error => [135, 30, 28],    // Dark red
        }
    }

    /// Get the text color for this toast type
    pub fn text_color(&self) -> [u8; 3] {
        match self {
            ToastType::Warning => [30, 30, 30], // Dark text for amber background
            _ => [255, 255, 255],               // White text for other backgrounds
        }
    }
}
