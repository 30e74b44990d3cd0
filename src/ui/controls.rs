//! Aggregation selector strip and refresh status.

use eframe::egui;

use crate::app::CardScopeApp;
use crate::state::{ChartKind, AGGREGATION_CHOICES};

/// Selector text for an aggregation factor
fn aggregation_label(agg: u32) -> String {
    if agg == 1 {
        "1 minute".to_string()
    } else {
        format!("{} minutes", agg)
    }
}

impl CardScopeApp {
    /// Render the top controls strip: one aggregation selector per chart
    /// (both bound to the same value, so they stay in sync), the busy
    /// indicator, and the settings button.
    pub fn render_controls(&mut self, ui: &mut egui::Ui) {
        let refreshing = self.is_refreshing();

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let mut changed: Option<u32> = None;

            // Selectors are locked while a refresh cycle is in flight
            ui.add_enabled_ui(!refreshing, |ui| {
                for kind in ChartKind::ALL {
                    ui.label(
                        egui::RichText::new(kind.title())
                            .small()
                            .color(egui::Color32::GRAY),
                    );

                    let mut value = self.aggregation;
                    egui::ComboBox::from_id_salt(("agg_select", kind.endpoint()))
                        .selected_text(aggregation_label(value))
                        .width(110.0)
                        .show_ui(ui, |ui| {
                            for &choice in AGGREGATION_CHOICES {
                                ui.selectable_value(
                                    &mut value,
                                    choice,
                                    aggregation_label(choice),
                                );
                            }
                        });
                    if value != self.aggregation {
                        changed = Some(value);
                    }

                    ui.separator();
                }
            });

            if let Some(agg) = changed {
                self.on_aggregation_changed(agg);
            }

            if refreshing {
                ui.spinner();
                ui.label(
                    egui::RichText::new("Refreshing...")
                        .small()
                        .color(egui::Color32::GRAY),
                );
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Settings").clicked() {
                    self.show_settings = true;
                }
            });
        });
        ui.add_space(4.0);
    }
}
