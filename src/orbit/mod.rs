//! Orbital timeline — a ring of labeled nodes spinning at constant speed.
//!
//! The ring is a controlled component: the caller owns the selected id and
//! passes it in, the ring only reports clicks back.
//!
//! - `compute_layout`: pure per-frame layout (position, depth, opacity, scale)
//! - `engine`: rotation state, one-shot seeding, click forwarding, teardown
//! - `frame_loop`: host frame callback driving `tick` with real elapsed time

pub mod engine;
pub mod frame_loop;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use engine::{OrbitalEngine, RenderSurface, SeedState};
pub use frame_loop::{AnimationLoop, FrameHost};

/// Externally assigned item identifier.
pub type ItemId = u32;

/// Degrees of rotation per `STEP_MS` of wall-clock time (6°/s).
pub const DEGREES_PER_STEP: f32 = 0.3;
pub const STEP_MS: f32 = 50.0;

/// Screen-space angle of the top of the ring (y grows downward).
pub const TOP_ANGLE_DEG: f32 = 270.0;

pub const SELECTED_SCALE: f32 = 1.25;
pub const DIMMED_OPACITY: f32 = 0.5;
pub const MIN_OPACITY: f32 = 0.4;
pub const MAX_OPACITY: f32 = 1.0;

/// Something the render surface knows how to draw for a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Icon {
    /// Text glyph (emoji or symbol) drawn with the UI font
    Glyph(String),
    /// Image file decoded into a texture
    Image(PathBuf),
}

/// One labeled node on the ring. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: ItemId,
    pub title: String,
    pub icon: Icon,
}

impl TimelineItem {
    pub fn new(id: ItemId, title: impl Into<String>, icon: Icon) -> Self {
        Self {
            id,
            title: title.into(),
            icon,
        }
    }
}

/// The two fixed size profiles of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePreset {
    Normal,
    Compact,
}

impl Default for SizePreset {
    fn default() -> Self {
        Self::Normal
    }
}

impl SizePreset {
    pub fn from_compact(compact: bool) -> Self {
        if compact {
            Self::Compact
        } else {
            Self::Normal
        }
    }

    /// Orbit radius in layout units.
    pub fn radius(self) -> f32 {
        match self {
            Self::Normal => 200.0,
            Self::Compact => 140.0,
        }
    }

    /// Radius of an unscaled node disc.
    pub fn node_radius(self) -> f32 {
        match self {
            Self::Normal => 26.0,
            Self::Compact => 19.0,
        }
    }

    pub fn label_size(self) -> f32 {
        match self {
            Self::Normal => 13.0,
            Self::Compact => 11.0,
        }
    }
}

/// Transient visual state of one node for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLayout {
    pub id: ItemId,
    /// Position in the item sequence (fixed angular slot)
    pub index: usize,
    /// Current angle in degrees, always in [0, 360)
    pub angle_deg: f32,
    /// Offset from the ring center
    pub x: f32,
    pub y: f32,
    /// Higher is drawn in front
    pub z_order: i32,
    pub opacity: f32,
    pub scale: f32,
    pub selected: bool,
}

/// Wrap an angle into [0, 360).
pub fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Rotation advance for `delta_ms` of elapsed time. Non-finite or negative
/// deltas count as no time passing.
pub fn rotation_advance(delta_ms: f32) -> f32 {
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return 0.0;
    }
    (delta_ms / STEP_MS) * DEGREES_PER_STEP
}

/// Angle of node `index` out of `count` for the given ring rotation.
pub fn node_angle(index: usize, count: usize, rotation_deg: f32) -> f32 {
    if count == 0 {
        return wrap_degrees(rotation_deg);
    }
    wrap_degrees((index as f32 / count as f32) * 360.0 + rotation_deg)
}

/// Depth: front of the ring (cos = 1) is 150, back (cos = -1) is 50.
pub fn z_order(angle_rad: f32) -> i32 {
    (100.0 + 50.0 * angle_rad.cos()).round() as i32
}

/// Opacity before selection emphasis is applied.
pub fn base_opacity(angle_rad: f32) -> f32 {
    (MIN_OPACITY + 0.6 * (1.0 + angle_rad.sin()) / 2.0).clamp(MIN_OPACITY, MAX_OPACITY)
}

/// Rotation that puts node `index` at the top of the ring.
pub fn seed_rotation(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    wrap_degrees(TOP_ANGLE_DEG - (index as f32 / count as f32) * 360.0 + 360.0)
}

/// Slot of `id` in `items`; the first match wins if ids repeat.
pub fn index_of(items: &[TimelineItem], id: ItemId) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

/// Lay out every node for one frame.
///
/// A `selected` id that is not in `items` highlights nothing, exactly as if
/// no selection had been given.
pub fn compute_layout(
    items: &[TimelineItem],
    rotation_deg: f32,
    selected: Option<ItemId>,
    preset: SizePreset,
) -> Vec<NodeLayout> {
    let count = items.len();
    let radius = preset.radius();
    let selected_index = selected.and_then(|id| index_of(items, id));

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let angle_deg = node_angle(index, count, rotation_deg);
            let angle_rad = angle_deg.to_radians();
            let is_selected = selected_index == Some(index);

            let opacity = match selected_index {
                Some(_) if is_selected => MAX_OPACITY,
                Some(_) => DIMMED_OPACITY,
                None => base_opacity(angle_rad),
            };

            NodeLayout {
                id: item.id,
                index,
                angle_deg,
                x: radius * angle_rad.cos(),
                y: radius * angle_rad.sin(),
                z_order: z_order(angle_rad),
                opacity,
                scale: if is_selected { SELECTED_SCALE } else { 1.0 },
                selected: is_selected,
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn sample_items(n: usize) -> Vec<TimelineItem> {
    (0..n)
        .map(|i| {
            TimelineItem::new(
                (i as ItemId + 1) * 10,
                format!("Agent {}", i + 1),
                Icon::Glyph("*".to_string()),
            )
        })
        .collect()
}
