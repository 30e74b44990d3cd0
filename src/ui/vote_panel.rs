//! Card selection and round-saving panel.

use eframe::egui;

use crate::app::CardScopeApp;
use crate::vote::{all_cards, card_label, BoxKey, Section};

impl CardScopeApp {
    /// Render the round-recording panel: first-card picker, the sectioned
    /// box grid, and the clear/save actions.
    pub fn render_vote_panel(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.heading("Record a round");
        ui.separator();

        // First card
        ui.label(
            egui::RichText::new("First card")
                .small()
                .color(egui::Color32::GRAY),
        );
        let selected_text = if self.vote.first_card.is_empty() {
            "-".to_string()
        } else {
            card_label(&self.vote.first_card)
        };
        egui::ComboBox::from_id_salt("first_card_select")
            .selected_text(selected_text)
            .width(80.0)
            .show_ui(ui, |ui| {
                for card in all_cards() {
                    let is_selected = self.vote.first_card == card;
                    if ui.selectable_label(is_selected, card_label(&card)).clicked() {
                        self.vote.first_card = card;
                    }
                }
            });

        ui.add_space(10.0);
        self.render_box_section(ui, "Winner (pick one)", Section::Top);
        self.render_box_section(ui, "Side bets", Section::LeftGroup);
        self.render_box_section(ui, "Hand strength", Section::Right);

        ui.separator();
        let busy = self.vote_in_flight();
        ui.horizontal(|ui| {
            ui.add_enabled_ui(!busy, |ui| {
                if ui.button("Save round").clicked() {
                    self.submit_vote();
                }
                if ui.button("Clear").clicked() {
                    self.vote.clear();
                }
            });
            if busy {
                ui.spinner();
            }
        });
    }

    fn render_box_section(&mut self, ui: &mut egui::Ui, title: &str, section: Section) {
        ui.label(
            egui::RichText::new(title)
                .small()
                .color(egui::Color32::GRAY),
        );

        for key in BoxKey::ALL.iter().filter(|k| k.section() == section) {
            let selected = self.vote.is_selected(*key);
            let text = format!("{}  ({})", key.label(), key.payout());
            if ui.selectable_label(selected, text).clicked() {
                self.vote.toggle(*key);
            }
        }

        ui.add_space(8.0);
    }
}
