//! Debounced, concurrent chart refresh coordination.
//!
//! A refresh cycle dispatches one background fetch per chart - both
//! spawned before any result is consumed - and reports results back over
//! a shared channel polled from the UI loop. The cycle owns the receiving
//! end: starting a new cycle drops the old receiver, so a late response
//! from a superseded cycle fails its send and is discarded instead of
//! overwriting newer data.
//!
//! Selector changes go through a [`Debouncer`] so rapid edits collapse
//! into a single cycle carrying the last-observed aggregation value.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::api::{ApiError, MinuteSeries};
use crate::state::ChartKind;

/// A chart refresh operation: given an aggregation factor, produce the
/// chart's series. Runs on a background thread, so it may block.
pub type RefreshFn = Arc<dyn Fn(u32) -> Result<MinuteSeries, ApiError> + Send + Sync>;

// ============================================================================
// Refresh Callables
// ============================================================================

/// The typed collection of refresh callables the orchestrator is built
/// with. Presence is structural: an absent callable means "operation not
/// available" and is skipped, never an error.
#[derive(Default)]
pub struct ChartRefreshers {
    pub aa: Option<RefreshFn>,
    pub four_kind: Option<RefreshFn>,
}

impl ChartRefreshers {
    /// Production wiring: both charts fetch from the statistics server
    pub fn for_server(base: &str) -> Self {
        let make = |endpoint: &'static str| -> RefreshFn {
            let base = base.to_string();
            Arc::new(move |agg| crate::api::fetch_minute_series(&base, endpoint, agg))
        };

        Self {
            aa: Some(make(ChartKind::Aa.endpoint())),
            four_kind: Some(make(ChartKind::FourKind.endpoint())),
        }
    }

    pub fn get(&self, kind: ChartKind) -> Option<&RefreshFn> {
        match kind {
            ChartKind::Aa => self.aa.as_ref(),
            ChartKind::FourKind => self.four_kind.as_ref(),
        }
    }
}

// ============================================================================
// Refresh Cycle
// ============================================================================

/// One in-flight refresh of all available charts.
///
/// While a cycle exists the app is in its Refreshing state and the
/// selector controls are disabled; the cycle is complete - and the app
/// returns to Idle - only once every dispatched operation has settled,
/// success or failure.
pub struct RefreshCycle {
    agg: u32,
    outstanding: usize,
    receiver: Receiver<(ChartKind, Result<MinuteSeries, ApiError>)>,
}

impl RefreshCycle {
    /// Dispatch a refresh for every present callable. All workers are
    /// spawned before any result is consumed. Returns `None` when no
    /// callable is present (nothing to refresh is not an error).
    pub fn start(refreshers: &ChartRefreshers, agg: u32) -> Option<Self> {
        let (sender, receiver) = channel();
        let mut outstanding = 0;

        for kind in ChartKind::ALL {
            let Some(refresh) = refreshers.get(kind) else {
                continue;
            };
            let refresh = Arc::clone(refresh);
            let sender = sender.clone();
            thread::spawn(move || {
                // The receiver may already be gone if a newer cycle
                // superseded this one; the stale result is then dropped.
                let _ = sender.send((kind, refresh(agg)));
            });
            outstanding += 1;
        }

        if outstanding == 0 {
            return None;
        }

        Some(Self {
            agg,
            outstanding,
            receiver,
        })
    }

    /// The aggregation factor this cycle was started with
    pub fn agg(&self) -> u32 {
        self.agg
    }

    /// Drain every result that has arrived so far without blocking
    pub fn poll(&mut self) -> Vec<(ChartKind, Result<MinuteSeries, ApiError>)> {
        let mut settled = Vec::new();
        while self.outstanding > 0 {
            match self.receiver.try_recv() {
                Ok(result) => {
                    self.outstanding -= 1;
                    settled.push(result);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // A worker died without reporting; give up on the
                    // cycle so the controls are not locked forever.
                    tracing::warn!("refresh worker disconnected before settling");
                    self.outstanding = 0;
                    break;
                }
            }
        }
        settled
    }

    /// Block until every dispatched operation has settled
    pub fn wait(&mut self) -> Vec<(ChartKind, Result<MinuteSeries, ApiError>)> {
        let mut settled = Vec::new();
        while self.outstanding > 0 {
            match self.receiver.recv() {
                Ok(result) => {
                    self.outstanding -= 1;
                    settled.push(result);
                }
                Err(_) => {
                    tracing::warn!("refresh worker disconnected before settling");
                    self.outstanding = 0;
                }
            }
        }
        settled
    }

    pub fn is_complete(&self) -> bool {
        self.outstanding == 0
    }
}

// ============================================================================
// Debounce
// ============================================================================

/// Collapses rapid triggers into a single firing of the last value once
/// the quiet period has elapsed. Instants are supplied by the caller, so
/// the UI loop drives it from frame time and tests drive it directly.
pub struct Debouncer {
    wait: Duration,
    pending: Option<(Instant, u32)>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Record a trigger, restarting the quiet period
    pub fn trigger(&mut self, agg: u32, now: Instant) {
        self.pending = Some((now, agg));
    }

    /// Fire if the quiet period has elapsed since the last trigger.
    /// Returns the last-observed value at most once per trigger burst.
    pub fn poll(&mut self, now: Instant) -> Option<u32> {
        match self.pending {
            Some((at, agg)) if now.duration_since(at) >= self.wait => {
                self.pending = None;
                Some(agg)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending trigger without firing
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
