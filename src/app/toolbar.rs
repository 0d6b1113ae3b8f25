//! Toolbar rendering for `ShowcaseApp`.
//!
//! Draws the brand strip, the ring size toggle, the dark-mode toggle and the
//! auto-advance indicator.

use eframe::egui;

use super::ShowcaseApp;

impl ShowcaseApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);
            ui.label(egui::RichText::new("SIA").strong().size(20.0));
            ui.label(
                egui::RichText::new("AI agents for marketing, HR and sales")
                    .color(egui::Color32::GRAY),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Dark mode toggle
                let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
                if ui.button(dark_label).clicked() {
                    self.dark_mode = !self.dark_mode;
                }

                let mut compact = self.compact;
                if ui.toggle_value(&mut compact, "Compact").changed() {
                    self.set_compact(ctx, compact);
                }

                if self.showcase.auto_advance_enabled() {
                    ui.colored_label(egui::Color32::from_rgb(76, 175, 80), "Auto tour");
                }
            });
        });
    }
}
