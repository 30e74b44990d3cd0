//! Server settings window.

use eframe::egui;

use crate::app::CardScopeApp;

impl CardScopeApp {
    /// Render the settings window when open. Saving rewires the refresh
    /// callables to the new server and reloads both charts.
    pub fn render_settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let mut open = self.show_settings;
        let mut apply = false;

        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("Statistics server URL")
                        .small()
                        .color(egui::Color32::GRAY),
                );
                ui.text_edit_singleline(&mut self.settings_url_edit);

                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(format!(
                        "The current aggregation ({} min) becomes the startup default.",
                        self.aggregation
                    ))
                    .small()
                    .color(egui::Color32::GRAY),
                );

                ui.add_space(8.0);
                if ui.button("Save and reload").clicked() {
                    apply = true;
                }
            });

        self.show_settings = open;

        if apply {
            self.apply_settings();
            self.show_settings = false;
        }
    }
}
