//! Chart rendering with the post-layout overflow correction.

use std::ops::RangeInclusive;

use eframe::egui;
use egui_plot::{GridMark, Line, Plot, PlotBounds, PlotPoint, PlotPoints};

use crate::app::CardScopeApp;
use crate::state::{ChartKind, CHART_HEIGHT};

impl CardScopeApp {
    /// Render one chart: its title, then either the plot, a fallback
    /// message if the last refresh failed, or a spinner while the first
    /// refresh is still in flight.
    pub fn render_chart(&mut self, ui: &mut egui::Ui, kind: ChartKind) {
        let refreshing = self.is_refreshing();
        let slot = self.chart_slot_mut(kind);

        ui.label(egui::RichText::new(kind.title()).strong().size(16.0));
        ui.add_space(4.0);

        // Failed refresh: show the fallback message in place of the plot
        if let Some(message) = slot.error.clone() {
            ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new(message)
                            .size(14.0)
                            .color(egui::Color32::GRAY),
                    );
                });
            });
            return;
        }

        // No data yet: nothing to draw (a spinner while the fetch runs)
        let (labels, counts) = match &slot.series {
            Some(series) => (series.labels.clone(), series.counts.clone()),
            None => {
                if refreshing {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(egui::RichText::new("Loading...").color(egui::Color32::GRAY));
                    });
                }
                return;
            }
        };

        let n = counts.len();
        let max_count = counts.iter().copied().max().unwrap_or(0);
        let y_max = (max_count as f64 * 1.05).max(1.0);
        let color = kind.line_color();

        let plot_points: PlotPoints = counts
            .iter()
            .enumerate()
            .map(|(i, c)| [i as f64, *c as f64])
            .collect();

        let axis_labels = labels.clone();
        let hover_labels = labels;

        // Shrink the plot by the corrected margin so the last point stays
        // inside the frame
        let plot_width = (ui.available_width() - slot.extra_right_margin).max(100.0);

        let plot = Plot::new(kind.endpoint())
            .width(plot_width)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                // Only integral marks correspond to buckets
                let idx = mark.value.round();
                if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
                    return String::new();
                }
                axis_labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .label_formatter(move |_name, value| {
                let idx = value.x.round();
                if idx < 0.0 {
                    return String::new();
                }
                match hover_labels.get(idx as usize) {
                    Some(label) => format!("{}: {:.0}", label, value.y.max(0.0)),
                    None => String::new(),
                }
            });

        let response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [-0.5, 0.0],
                [(n.saturating_sub(1)) as f64 + 0.5, y_max],
            ));

            plot_ui.line(
                Line::new(kind.title(), plot_points)
                    .color(egui::Color32::from_rgb(color[0], color[1], color[2]))
                    .width(1.5)
                    .fill(0.0),
            );
        });

        // One-shot post-layout measurement: if the last point's screen X
        // overflows the frame's right edge, widen the right margin by
        // overflow + 8 px (flat 8 px when it sits exactly on the edge)
        // and repaint. Runs at most once per installed series.
        if !slot.margin_corrected {
            slot.margin_corrected = true;

            if let Some(last_count) = counts.last() {
                let last_point = PlotPoint::new((n - 1) as f64, *last_count as f64);
                let screen = response.transform.position_from_point(&last_point);
                let overflow = screen.x - response.transform.frame().right();

                if overflow >= 0.0 {
                    let extra = if overflow > 0.0 { overflow + 8.0 } else { 8.0 };
                    slot.extra_right_margin += extra;
                    ui.ctx().request_repaint();
                }
            }
        }
    }
}
