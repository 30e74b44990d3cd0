//! Main application state and the eframe::App implementation.
//!
//! The app is a two-state machine around chart refreshes: Idle (no
//! in-flight cycle, selectors enabled) and Refreshing (a cycle owns the
//! result channel, selectors disabled). Selector changes are debounced;
//! results are drained from `update()` each frame.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use eframe::egui;

use crate::api::ApiError;
use crate::orchestrator::{ChartRefreshers, Debouncer, RefreshCycle};
use crate::series;
use crate::settings::UserSettings;
use crate::state::{ChartKind, ChartSlot, ToastType, MAX_CHART_POINTS, REFRESH_DEBOUNCE};
use crate::vote::VoteSelection;

/// Fallback message shown in place of a chart whose refresh failed
pub const CHART_FALLBACK_MESSAGE: &str = "Unable to load chart data.";

/// Main application state
pub struct CardScopeApp {
    /// Persisted user preferences
    pub settings: UserSettings,
    /// Whether the settings window is open
    pub show_settings: bool,
    /// Scratch copy of the server URL being edited in the settings window
    pub settings_url_edit: String,

    /// Aggregation factor shared by both selector controls. Single source
    /// of truth: editing either selector edits this value, so the two
    /// controls can never diverge.
    pub aggregation: u32,

    /// Refresh callables, one per chart
    refreshers: ChartRefreshers,
    /// Debounce for user-driven selector changes
    debouncer: Debouncer,
    /// In-flight refresh cycle; `Some` is Refreshing, `None` is Idle
    active_cycle: Option<RefreshCycle>,

    /// Render state for the AA chart
    pub aa_chart: ChartSlot,
    /// Render state for the four-of-a-kind chart
    pub four_kind_chart: ChartSlot,

    /// The operator's current round selection
    pub vote: VoteSelection,
    /// Channel carrying the result of an in-flight round submission
    vote_receiver: Option<Receiver<Result<(), ApiError>>>,

    /// Toast messages for user feedback
    pub toast_message: Option<(String, Instant, ToastType)>,
}

impl CardScopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = UserSettings::load();
        let refreshers = ChartRefreshers::for_server(&settings.server_url);
        let aggregation = settings.default_aggregation.max(1);
        let settings_url_edit = settings.server_url.clone();

        let mut app = Self {
            settings,
            show_settings: false,
            settings_url_edit,
            aggregation,
            refreshers,
            debouncer: Debouncer::new(REFRESH_DEBOUNCE),
            active_cycle: None,
            aa_chart: ChartSlot::new(ChartKind::Aa),
            four_kind_chart: ChartSlot::new(ChartKind::FourKind),
            vote: VoteSelection::default(),
            vote_receiver: None,
            toast_message: None,
        };

        // Initial load
        app.start_refresh(aggregation);
        app
    }

    // ========================================================================
    // Refresh Orchestration
    // ========================================================================

    /// Whether a refresh cycle is in flight (selectors disabled)
    pub fn is_refreshing(&self) -> bool {
        self.active_cycle.is_some()
    }

    pub fn chart_slot_mut(&mut self, kind: ChartKind) -> &mut ChartSlot {
        match kind {
            ChartKind::Aa => &mut self.aa_chart,
            ChartKind::FourKind => &mut self.four_kind_chart,
        }
    }

    /// Called by the selector controls on every user change; the actual
    /// refresh fires once the debounce quiet period elapses.
    pub fn on_aggregation_changed(&mut self, agg: u32) {
        self.aggregation = agg.max(1);
        self.debouncer.trigger(self.aggregation, Instant::now());
    }

    /// Programmatic trigger: force both selectors to `agg` and refresh
    /// immediately, bypassing the debounce.
    pub fn trigger_refresh(&mut self, agg: u32) {
        self.debouncer.cancel();
        self.aggregation = agg.max(1);
        self.start_refresh(self.aggregation);
    }

    /// Start a refresh cycle. Replacing an in-flight cycle drops its
    /// receiver, so any late result from it is discarded.
    fn start_refresh(&mut self, agg: u32) {
        self.aggregation = agg.max(1);
        tracing::info!(agg = self.aggregation, "starting chart refresh");
        self.active_cycle = RefreshCycle::start(&self.refreshers, self.aggregation);
    }

    /// Drain settled fetches into the chart slots; return to Idle once
    /// every dispatched operation has settled.
    fn process_refresh_results(&mut self) {
        let settled = match &mut self.active_cycle {
            Some(cycle) => cycle.poll(),
            None => return,
        };

        for (kind, result) in settled {
            match result {
                Ok(payload) => {
                    let prepared =
                        series::prepare(payload.labels, payload.counts, MAX_CHART_POINTS);
                    self.chart_slot_mut(kind).install(prepared);
                }
                Err(e) => {
                    tracing::warn!(chart = kind.title(), error = %e, "chart refresh failed");
                    self.chart_slot_mut(kind)
                        .fail(CHART_FALLBACK_MESSAGE.to_string());
                }
            }
        }

        if self
            .active_cycle
            .as_ref()
            .is_some_and(|cycle| cycle.is_complete())
        {
            self.active_cycle = None;
        }
    }

    // ========================================================================
    // Round Submission
    // ========================================================================

    /// Whether a round submission is in flight (save button disabled)
    pub fn vote_in_flight(&self) -> bool {
        self.vote_receiver.is_some()
    }

    /// Validate the current selection and, if it passes, submit it on a
    /// background thread. Validation failures surface as warning toasts.
    pub fn submit_vote(&mut self) {
        if self.vote_in_flight() {
            return;
        }

        if let Err(e) = self.vote.validate() {
            self.show_toast(e.to_string(), ToastType::Warning);
            return;
        }

        let base = self.settings.server_url.clone();
        let selection = self.vote.clone();
        let (sender, receiver) = channel();
        self.vote_receiver = Some(receiver);

        thread::spawn(move || {
            let _ = sender.send(crate::api::submit_round(&base, &selection));
        });
    }

    fn process_vote_result(&mut self) {
        let Some(receiver) = &self.vote_receiver else {
            return;
        };

        match receiver.try_recv() {
            Ok(Ok(())) => {
                self.vote_receiver = None;
                self.vote = VoteSelection::default();
                self.show_toast("Round saved".to_string(), ToastType::Success);
            }
            Ok(Err(e)) => {
                self.vote_receiver = None;
                tracing::warn!(error = %e, "round submission failed");
                self.show_toast(format!("Could not save round: {}", e), ToastType::Error);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.vote_receiver = None;
                self.show_toast("Could not save round".to_string(), ToastType::Error);
            }
        }
    }

    // ========================================================================
    // Settings & Feedback
    // ========================================================================

    /// Apply edits from the settings window: rewire the refresh callables
    /// to the new server, persist, and reload both charts.
    pub fn apply_settings(&mut self) {
        self.settings.server_url = self.settings_url_edit.trim().to_string();
        self.settings.default_aggregation = self.aggregation;
        self.refreshers = ChartRefreshers::for_server(&self.settings.server_url);

        match self.settings.save() {
            Ok(()) => self.show_toast("Settings saved".to_string(), ToastType::Success),
            Err(e) => {
                tracing::warn!(error = %e, "failed to save settings");
                self.show_toast(e, ToastType::Error);
            }
        }

        self.trigger_refresh(self.aggregation);
    }

    /// Show a toast message
    pub fn show_toast(&mut self, message: String, toast_type: ToastType) {
        self.toast_message = Some((message, Instant::now(), toast_type));
    }
}

impl eframe::App for CardScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain background work before drawing anything
        self.process_refresh_results();
        self.process_vote_result();

        // Fire a debounced selector change once its quiet period elapses
        if let Some(agg) = self.debouncer.poll(Instant::now()) {
            self.start_refresh(agg);
        }

        // Apply dark theme
        ctx.set_visuals(egui::Visuals::dark());

        // Keep polling while anything is in flight
        if self.is_refreshing() || self.debouncer.is_pending() || self.vote_in_flight() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        // Toast notifications
        self.render_toast(ctx);

        // Round-recording panel
        egui::SidePanel::right("vote_panel")
            .default_width(320.0)
            .min_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.render_vote_panel(ui);
            });

        // Aggregation selectors
        egui::TopBottomPanel::top("controls_panel").show(ctx, |ui| {
            self.render_controls(ui);
        });

        // The two charts
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for kind in ChartKind::ALL {
                    self.render_chart(ui, kind);
                    ui.add_space(12.0);
                }
            });
        });

        self.render_settings_window(ctx);
    }
}
