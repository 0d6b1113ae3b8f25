//! egui Painter-based rendering of the orbital ring.
//!
//! `OrbitPainter` is the ring's render surface: the engine pushes a layout
//! into it every tick, and `paint` draws that layout back to front with
//! hover animation, a glow ring on the selected node, and node labels.

use std::collections::HashMap;
use std::path::PathBuf;

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, TextureHandle, Vec2};

use crate::orbit::{Icon, ItemId, NodeLayout, RenderSurface, SizePreset, TimelineItem};

/// Extra room around the orbit for scaled nodes and labels.
const CANVAS_MARGIN: f32 = 70.0;

/// Theme colors for the ring.
struct Theme {
    orbit: Color32,
    node_bg: Color32,
    node_border: Color32,
    glyph: Color32,
    label: Color32,
    accent: Color32,
}

impl Theme {
    fn light() -> Self {
        Self {
            orbit: Color32::from_rgb(210, 214, 226),
            node_bg: Color32::WHITE,
            node_border: Color32::from_rgb(190, 196, 210),
            glyph: Color32::from_rgb(38, 38, 46),
            label: Color32::from_rgb(38, 38, 46),
            accent: Color32::from_rgb(0, 102, 217),
        }
    }

    fn dark() -> Self {
        Self {
            orbit: Color32::from_rgb(60, 64, 78),
            node_bg: Color32::from_rgb(36, 36, 44),
            node_border: Color32::from_rgb(80, 84, 100),
            glyph: Color32::from_rgb(230, 230, 240),
            label: Color32::from_rgb(200, 200, 210),
            accent: Color32::from_rgb(80, 160, 255),
        }
    }
}

/// Render surface that keeps the latest layout for painting.
pub struct OrbitPainter {
    layout: Vec<NodeLayout>,
    preset: SizePreset,
    hovered: Option<ItemId>,
}

impl RenderSurface for OrbitPainter {
    fn apply(&mut self, layout: &[NodeLayout]) {
        self.layout.clear();
        self.layout.extend_from_slice(layout);
    }
}

impl OrbitPainter {
    pub fn new(preset: SizePreset) -> Self {
        Self {
            layout: Vec::new(),
            preset,
            hovered: None,
        }
    }

    /// Switch size profile; the next applied layout must come from a ring
    /// built with the same preset.
    pub fn set_preset(&mut self, preset: SizePreset) {
        self.preset = preset;
        self.layout.clear();
        self.hovered = None;
    }

    pub fn layout(&self) -> &[NodeLayout] {
        &self.layout
    }

    /// Draw the ring and return the id of a clicked node.
    pub fn paint(
        &mut self,
        ui: &mut egui::Ui,
        items: &[TimelineItem],
        dark_mode: bool,
        textures: &HashMap<PathBuf, TextureHandle>,
    ) -> Option<ItemId> {
        if self.layout.is_empty() {
            ui.colored_label(Color32::GRAY, "No agents to show");
            return None;
        }

        let ctx = ui.ctx().clone();
        let theme = if dark_mode { Theme::dark() } else { Theme::light() };
        let radius = self.preset.radius();
        let node_radius = self.preset.node_radius();

        let side = ui
            .available_width()
            .min(ui.available_height())
            .max((radius + CANVAS_MARGIN) * 2.0);
        let (rect, response) =
            ui.allocate_exact_size(Vec2::splat(side), Sense::click().union(Sense::hover()));
        let painter = ui.painter_at(rect);
        let center = rect.center();

        painter.circle_stroke(center, radius, Stroke::new(1.0, theme.orbit));

        self.hovered = response
            .hover_pos()
            .and_then(|pos| hit_test(&self.layout, center, pos, node_radius));
        if self.hovered.is_some() {
            ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        let by_id: HashMap<ItemId, &TimelineItem> = items.iter().map(|i| (i.id, i)).collect();

        for idx in draw_order(&self.layout) {
            let node = &self.layout[idx];
            let hover_t = ctx.animate_value_with_time(
                egui::Id::new(("orbit_hover", node.index)),
                if self.hovered == Some(node.id) { 1.0 } else { 0.0 },
                0.15,
            );
            let pos = center + Vec2::new(node.x, node.y);
            let r = node_radius * node.scale * (1.0 + 0.08 * hover_t);

            if node.selected {
                draw_glow(&painter, pos, r, &theme);
            }

            painter.circle_filled(pos, r, theme.node_bg.gamma_multiply(node.opacity));
            let (width, color) = if node.selected {
                (2.0, theme.accent)
            } else {
                (1.0 + hover_t, lerp_color(theme.node_border, theme.accent, hover_t))
            };
            painter.circle_stroke(pos, r, Stroke::new(width, color.gamma_multiply(node.opacity)));

            if let Some(item) = by_id.get(&node.id) {
                draw_icon(&painter, pos, r, item, node.opacity, &theme, textures);
                painter.text(
                    pos + Vec2::new(0.0, r + 6.0),
                    Align2::CENTER_TOP,
                    &item.title,
                    FontId::proportional(self.preset.label_size()),
                    theme.label.gamma_multiply(node.opacity),
                );
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                return hit_test(&self.layout, center, pos, node_radius);
            }
        }
        None
    }
}

/// Indices of `layout` from back to front (ascending z-order, stable).
pub fn draw_order(layout: &[NodeLayout]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layout.len()).collect();
    order.sort_by_key(|&i| layout[i].z_order);
    order
}

/// Front-most node under `pos`, if any.
///
/// `node_radius` is the unscaled disc radius; each node's own scale is
/// applied so the enlarged selected node is easier to hit.
pub fn hit_test(layout: &[NodeLayout], center: Pos2, pos: Pos2, node_radius: f32) -> Option<ItemId> {
    draw_order(layout)
        .into_iter()
        .rev()
        .map(|i| &layout[i])
        .find(|node| {
            let r = node_radius * node.scale;
            let c = center + Vec2::new(node.x, node.y);
            (pos - c).length_sq() <= r * r
        })
        .map(|node| node.id)
}

fn draw_glow(painter: &egui::Painter, pos: Pos2, r: f32, theme: &Theme) {
    for i in 0..3 {
        let spread = 4.0 * (i as f32 + 1.0);
        let alpha = (60.0 - i as f32 * 18.0) as u8;
        painter.circle_filled(
            pos,
            r + spread,
            Color32::from_rgba_unmultiplied(theme.accent.r(), theme.accent.g(), theme.accent.b(), alpha),
        );
    }
}

fn draw_icon(
    painter: &egui::Painter,
    pos: Pos2,
    r: f32,
    item: &TimelineItem,
    opacity: f32,
    theme: &Theme,
    textures: &HashMap<PathBuf, TextureHandle>,
) {
    match &item.icon {
        Icon::Glyph(glyph) => {
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                glyph,
                FontId::proportional(r),
                theme.glyph.gamma_multiply(opacity),
            );
        }
        Icon::Image(path) => match textures.get(path) {
            Some(tex) => {
                let side = r * 1.2;
                painter.image(
                    tex.id(),
                    Rect::from_center_size(pos, Vec2::splat(side)),
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE.gamma_multiply(opacity),
                );
            }
            None => {
                // Not decoded (yet): fall back to the title's initial.
                let initial: String = item.title.chars().take(1).collect();
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    initial,
                    FontId::proportional(r),
                    theme.glyph.gamma_multiply(opacity),
                );
            }
        },
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let m = |a: u8, b: u8| ((a as f32) * (1.0 - t) + (b as f32) * t) as u8;
    Color32::from_rgba_unmultiplied(m(a.r(), b.r()), m(a.g(), b.g()), m(a.b(), b.b()), m(a.a(), b.a()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::{compute_layout, sample_items};

    fn node(id: ItemId, x: f32, z_order: i32, scale: f32) -> NodeLayout {
        NodeLayout {
            id,
            index: id as usize,
            angle_deg: 0.0,
            x,
            y: 0.0,
            z_order,
            opacity: 1.0,
            scale,
            selected: scale > 1.0,
        }
    }

    #[test]
    fn hit_prefers_front_node() {
        let center = Pos2::new(100.0, 100.0);
        let layout = vec![node(1, 0.0, 60, 1.0), node(2, 10.0, 140, 1.0)];
        let hit = hit_test(&layout, center, Pos2::new(105.0, 100.0), 20.0);
        assert_eq!(hit, Some(2));

        let layout = vec![node(1, 0.0, 140, 1.0), node(2, 10.0, 60, 1.0)];
        let hit = hit_test(&layout, center, Pos2::new(105.0, 100.0), 20.0);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn miss_returns_none() {
        let layout = vec![node(1, 0.0, 100, 1.0)];
        assert_eq!(hit_test(&layout, Pos2::ZERO, Pos2::new(50.0, 50.0), 20.0), None);
        assert_eq!(hit_test(&[], Pos2::ZERO, Pos2::ZERO, 20.0), None);
    }

    #[test]
    fn selected_scale_widens_hit_area() {
        let layout = vec![node(1, 0.0, 100, 1.25)];
        assert_eq!(hit_test(&layout, Pos2::ZERO, Pos2::new(24.0, 0.0), 20.0), Some(1));
        let layout = vec![node(1, 0.0, 100, 1.0)];
        assert_eq!(hit_test(&layout, Pos2::ZERO, Pos2::new(24.0, 0.0), 20.0), None);
    }

    #[test]
    fn draw_order_is_back_to_front() {
        let layout = compute_layout(&sample_items(6), 17.0, None, SizePreset::Normal);
        let order = draw_order(&layout);
        for pair in order.windows(2) {
            assert!(layout[pair[0]].z_order <= layout[pair[1]].z_order);
        }
    }

    #[test]
    fn clicking_a_laid_out_node_maps_back_to_its_id() {
        let preset = SizePreset::Normal;
        let layout = compute_layout(&sample_items(5), 126.0, Some(30), preset);
        let center = Pos2::new(300.0, 300.0);
        for n in &layout {
            let pos = center + Vec2::new(n.x, n.y);
            assert_eq!(hit_test(&layout, center, pos, preset.node_radius()), Some(n.id));
        }
    }

    #[test]
    fn painter_keeps_latest_layout() {
        let mut painter = OrbitPainter::new(SizePreset::Compact);
        let layout = compute_layout(&sample_items(3), 0.0, None, SizePreset::Compact);
        painter.apply(&layout);
        painter.apply(&layout[..2]);
        assert_eq!(painter.layout().len(), 2);
        painter.set_preset(SizePreset::Normal);
        assert!(painter.layout().is_empty());
    }
}
