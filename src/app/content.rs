//! Content-area rendering for `ShowcaseApp`.
//!
//! - `draw_ring`    — the orbital ring; clicks go to the engine, which
//!                    reports them back through the selection channel
//! - `draw_details` — right-side panel with the selected agent and the
//!                    catalog list grouped by business area

use eframe::egui;
use sia_orbit::catalog::AgentCategory;

use super::ShowcaseApp;

impl ShowcaseApp {
    pub fn draw_ring(&mut self, ui: &mut egui::Ui) {
        let dark_mode = self.dark_mode;
        ui.vertical_centered(|ui| {
            if let Some(id) = self.painter.paint(ui, &self.items, dark_mode, &self.icon_textures) {
                self.ring.engine_mut().select_node(id);
            }
        });
    }

    pub fn draw_details(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);

        match self.showcase.selected_product() {
            Some(product) => {
                ui.label(
                    egui::RichText::new(product.category.label())
                        .small()
                        .color(egui::Color32::GRAY),
                );
                ui.heading(&product.title);
                if !product.tagline.is_empty() {
                    ui.label(egui::RichText::new(&product.tagline).italics());
                }
                ui.add_space(6.0);
                if !product.description.is_empty() {
                    ui.label(&product.description);
                }
                if !product.highlights.is_empty() {
                    ui.add_space(6.0);
                    for h in &product.highlights {
                        ui.label(format!("\u{2022} {}", h));
                    }
                }
            }
            None => {
                ui.colored_label(egui::Color32::GRAY, "Pick an agent on the ring");
            }
        }

        ui.separator();

        // Catalog list: selection changes here come from the page, not the
        // ring, so the ring only moves its highlight.
        let mut picked = None;
        let selected = self.showcase.selected();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for category in [AgentCategory::Marketing, AgentCategory::Hr, AgentCategory::Sales] {
                ui.label(egui::RichText::new(category.label()).strong());
                for product in self
                    .showcase
                    .catalog()
                    .products()
                    .iter()
                    .filter(|p| p.category == category)
                {
                    let is_selected = selected == Some(product.id);
                    if ui.selectable_label(is_selected, &product.title).clicked() {
                        picked = Some(product.id);
                    }
                }
                ui.add_space(4.0);
            }
        });

        if let Some(id) = picked {
            self.showcase.handle_select(id);
        }
    }
}
