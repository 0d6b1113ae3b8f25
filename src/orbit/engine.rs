//! One orbital ring instance: owns the rotation, reads everything else.
//!
//! Selection is injected by the caller (`set_selected`) and clicks are
//! forwarded through the `on_select` callback without touching local state,
//! so the ring can never disagree with the page about what is selected.

use std::sync::Arc;

use super::{
    compute_layout, index_of, rotation_advance, seed_rotation, wrap_degrees, ItemId, NodeLayout,
    SizePreset, TimelineItem,
};

/// Receives the computed layout once per tick.
pub trait RenderSurface {
    fn apply(&mut self, layout: &[NodeLayout]);
}

impl RenderSurface for Vec<NodeLayout> {
    fn apply(&mut self, layout: &[NodeLayout]) {
        self.clear();
        self.extend_from_slice(layout);
    }
}

/// One-shot latch guarding the initial rotation. It is resolved during
/// construction, whether or not the initial selection named a known item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedState {
    /// Construction has not resolved the initial selection yet
    Uninitialized,
    /// Seeding was decided once and is never revisited
    Seeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Live,
    Disposed,
}

pub struct OrbitalEngine {
    items: Arc<[TimelineItem]>,
    selected: Option<ItemId>,
    on_select: Box<dyn FnMut(ItemId)>,
    preset: SizePreset,
    rotation_deg: f32,
    seed: SeedState,
    lifecycle: Lifecycle,
}

impl OrbitalEngine {
    /// Create a ring for `items` (order = angular slot).
    ///
    /// If `selected` names one of the items, the rotation is seeded so that
    /// node starts at the top of the ring.
    pub fn new(
        items: impl Into<Arc<[TimelineItem]>>,
        selected: Option<ItemId>,
        on_select: impl FnMut(ItemId) + 'static,
        compact: bool,
    ) -> Self {
        let mut engine = Self {
            items: items.into(),
            selected,
            on_select: Box::new(on_select),
            preset: SizePreset::from_compact(compact),
            rotation_deg: 0.0,
            seed: SeedState::Uninitialized,
            lifecycle: Lifecycle::Live,
        };
        engine.seed_once();
        engine
    }

    fn seed_once(&mut self) {
        if self.seed == SeedState::Seeded {
            return;
        }
        self.seed = SeedState::Seeded;
        let Some(index) = self.selected.and_then(|id| index_of(&self.items, id)) else {
            return;
        };
        self.rotation_deg = seed_rotation(index, self.items.len());
        log::debug!(
            "orbit: seeded rotation {:.1}° for item slot {}/{}",
            self.rotation_deg,
            index,
            self.items.len()
        );
    }

    /// Advance the ring by `delta_ms` of elapsed time and push the new
    /// layout to `surface`. Does nothing once disposed.
    pub fn tick<S: RenderSurface + ?Sized>(&mut self, delta_ms: f32, surface: &mut S) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.rotation_deg = wrap_degrees(self.rotation_deg + rotation_advance(delta_ms));
        let layout = self.layout();
        surface.apply(&layout);
    }

    /// A node was clicked: report it to the caller.
    pub fn select_node(&mut self, id: ItemId) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        log::debug!("orbit: node {} clicked", id);
        (self.on_select)(id);
    }

    /// Caller round-trip of the selection. The rotation is left alone; the
    /// highlight moves to wherever the node currently sits.
    pub fn set_selected(&mut self, selected: Option<ItemId>) {
        self.selected = selected;
    }

    /// Layout for the current rotation and selection.
    pub fn layout(&self) -> Vec<NodeLayout> {
        compute_layout(&self.items, self.rotation_deg, self.selected, self.preset)
    }

    /// Stop reacting to ticks and clicks. Returns false if already disposed.
    pub fn dispose(&mut self) -> bool {
        if self.lifecycle == Lifecycle::Disposed {
            return false;
        }
        self.lifecycle = Lifecycle::Disposed;
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn preset(&self) -> SizePreset {
        self.preset
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_deg
    }

    pub fn seed_state(&self) -> SeedState {
        self.seed
    }
}
