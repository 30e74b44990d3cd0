//! HTTP client for the statistics server.
//!
//! This module fetches minute-occurrence series for the dashboard charts
//! and submits recorded rounds. All calls are blocking `ureq` requests -
//! run them on a background thread, never on the UI thread.

use serde::Deserialize;
use thiserror::Error;

use crate::series::RawLabel;
use crate::vote::VoteSelection;

/// User agent for server requests
const USER_AGENT: &str = concat!("CardScope/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when talking to the statistics server
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network error during request
    #[error("Network error: {0}")]
    Network(String),

    /// Server returned a non-success status
    #[error("Server error (status {status})")]
    Status { status: u16 },

    /// Failed to parse the server response
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    fn from_ureq(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(status) => ApiError::Status { status },
            _ => ApiError::Network(e.to_string()),
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Minute-occurrence payload from `/api/aa_minutes` and
/// `/api/four_kind_minutes`.
///
/// `labels` entries are either pre-formatted `HH:MM` strings or integer
/// minute-of-day values; the two arrays are reconciled client-side by
/// [`crate::series::normalize`].
#[derive(Debug, Clone, Deserialize)]
pub struct MinuteSeries {
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    #[serde(default)]
    pub counts: Vec<u64>,
    /// Echoed by the server when it aggregated upstream (`agg > 1`)
    #[serde(default)]
    pub agg: Option<u32>,
}

// ============================================================================
// Client Functions
// ============================================================================

/// Fetch a minute-occurrence series for one chart.
///
/// Issues a cache-bypassing GET against `base + endpoint`, appending the
/// `agg` query parameter only when it is greater than 1. No retries -
/// failures surface directly to the caller.
pub fn fetch_minute_series(base: &str, endpoint: &str, agg: u32) -> Result<MinuteSeries, ApiError> {
    let mut url = format!("{}{}", base.trim_end_matches('/'), endpoint);
    if agg > 1 {
        url.push_str(&format!("?agg={}", agg));
    }

    let mut response = ureq::get(&url)
        .header("User-Agent", USER_AGENT)
        .header("Cache-Control", "no-store")
        .call()
        .map_err(ApiError::from_ureq)?;

    response
        .body_mut()
        .read_json()
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Submit a validated round to the server's `/save` endpoint as a form
/// post. The caller is expected to have run
/// [`VoteSelection::validate`](crate::vote::VoteSelection::validate) first;
/// the server re-validates and rejects anything inconsistent.
pub fn submit_round(base: &str, selection: &VoteSelection) -> Result<(), ApiError> {
    let url = format!("{}/save", base.trim_end_matches('/'));

    ureq::post(&url)
        .header("User-Agent", USER_AGENT)
        .send_form(selection.form_fields())
        .map_err(ApiError::from_ureq)?;

    tracing::info!(card = %selection.first_card, "round submitted");
    Ok(())
}
