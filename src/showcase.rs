//! Host-page state for the agent showcase.
//!
//! `Showcase` is the owner of the selected product. The ring reports clicks
//! through `handle_select`, and an optional auto-advance timer steps the
//! selection through the catalog while nobody is interacting.

use crate::catalog::{AgentProduct, Catalog};
use crate::config::AutoAdvanceConfig;
use crate::orbit::ItemId;

#[derive(Debug, Clone)]
struct AutoAdvanceTimer {
    interval_secs: f32,
    pause_after_click_secs: f32,
    elapsed: f32,
    paused_for: f32,
}

impl AutoAdvanceTimer {
    fn new(cfg: AutoAdvanceConfig) -> Self {
        Self {
            interval_secs: cfg.interval_secs,
            pause_after_click_secs: cfg.pause_after_click_secs.max(0.0),
            elapsed: 0.0,
            paused_for: 0.0,
        }
    }

    fn user_interacted(&mut self) {
        self.elapsed = 0.0;
        self.paused_for = self.pause_after_click_secs;
    }

    /// Number of interval boundaries crossed during `dt` seconds.
    fn step(&mut self, mut dt: f32) -> usize {
        if !(self.interval_secs > 0.0) || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        if self.paused_for > 0.0 {
            self.paused_for -= dt;
            if self.paused_for > 0.0 {
                return 0;
            }
            dt = -self.paused_for;
            self.paused_for = 0.0;
        }
        self.elapsed += dt;
        let steps = (self.elapsed / self.interval_secs).floor();
        self.elapsed -= steps * self.interval_secs;
        steps as usize
    }
}

#[derive(Debug, Clone)]
pub struct Showcase {
    catalog: Catalog,
    selected: Option<ItemId>,
    auto: Option<AutoAdvanceTimer>,
}

impl Showcase {
    /// An `initial` id missing from the catalog is dropped.
    pub fn new(catalog: Catalog, initial: Option<ItemId>) -> Self {
        let selected = match initial {
            Some(id) if catalog.find(id).is_none() => {
                log::warn!("showcase: initial selection {} is not in the catalog", id);
                None
            }
            other => other,
        };
        Self {
            catalog,
            selected,
            auto: None,
        }
    }

    pub fn with_auto_advance(mut self, cfg: AutoAdvanceConfig) -> Self {
        self.auto = Some(AutoAdvanceTimer::new(cfg));
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn selected_product(&self) -> Option<&AgentProduct> {
        self.selected.and_then(|id| self.catalog.find(id))
    }

    pub fn auto_advance_enabled(&self) -> bool {
        self.auto.is_some()
    }

    /// User picked `id` (ring click or catalog list). Returns true when the
    /// selection changed.
    pub fn handle_select(&mut self, id: ItemId) -> bool {
        if self.catalog.find(id).is_none() {
            log::debug!("showcase: ignoring selection of unknown id {}", id);
            return false;
        }
        if let Some(auto) = self.auto.as_mut() {
            auto.user_interacted();
        }
        if self.selected == Some(id) {
            return false;
        }
        log::debug!("showcase: selected {}", id);
        self.selected = Some(id);
        true
    }

    /// Advance the auto-advance timer by `dt_secs`. Returns true when the
    /// selection moved.
    pub fn advance(&mut self, dt_secs: f32) -> bool {
        let Some(auto) = self.auto.as_mut() else {
            return false;
        };
        let steps = auto.step(dt_secs);
        let len = self.catalog.len();
        if steps == 0 || len == 0 {
            return false;
        }

        // Whole laps are no-ops; reducing first keeps the sum in range.
        let current = self.selected.and_then(|id| self.catalog.index_of(id));
        let next = match current {
            Some(i) => (i + steps % len) % len,
            None => (steps - 1) % len,
        };
        let next_id = self.catalog.products()[next].id;
        let changed = self.selected != Some(next_id);
        self.selected = Some(next_id);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto(interval: f32, pause: f32) -> AutoAdvanceConfig {
        AutoAdvanceConfig {
            interval_secs: interval,
            pause_after_click_secs: pause,
        }
    }

    #[test]
    fn unknown_initial_selection_is_dropped() {
        let showcase = Showcase::new(Catalog::builtin(), Some(404));
        assert_eq!(showcase.selected(), None);
        assert!(showcase.selected_product().is_none());
    }

    #[test]
    fn handle_select_updates_selection() {
        let mut showcase = Showcase::new(Catalog::builtin(), Some(1));
        assert!(showcase.handle_select(3));
        assert_eq!(showcase.selected_product().unwrap().title, "Talent Scout");
        assert!(!showcase.handle_select(3));
        assert!(!showcase.handle_select(99));
        assert_eq!(showcase.selected(), Some(3));
    }

    #[test]
    fn without_timer_selection_stays_put() {
        let mut showcase = Showcase::new(Catalog::builtin(), Some(2));
        assert!(!showcase.advance(100.0));
        assert_eq!(showcase.selected(), Some(2));
    }

    #[test]
    fn auto_advance_cycles_and_wraps() {
        let mut showcase =
            Showcase::new(Catalog::builtin(), Some(5)).with_auto_advance(auto(2.0, 5.0));
        assert!(!showcase.advance(1.5));
        assert!(showcase.advance(0.5));
        assert_eq!(showcase.selected(), Some(6));
        assert!(showcase.advance(2.0));
        assert_eq!(showcase.selected(), Some(1));
    }

    #[test]
    fn long_frame_skips_multiple_products() {
        let mut showcase =
            Showcase::new(Catalog::builtin(), Some(1)).with_auto_advance(auto(1.0, 0.0));
        assert!(showcase.advance(3.5));
        assert_eq!(showcase.selected(), Some(4));
    }

    #[test]
    fn no_selection_advances_to_first() {
        let mut showcase = Showcase::new(Catalog::builtin(), None).with_auto_advance(auto(1.0, 0.0));
        assert!(showcase.advance(1.0));
        assert_eq!(showcase.selected(), Some(1));
    }

    #[test]
    fn huge_step_count_wraps_without_overflow() {
        // Bypasses config validation to force a saturated step count.
        let mut showcase =
            Showcase::new(Catalog::builtin(), Some(6)).with_auto_advance(auto(1e-30, 0.0));
        showcase.advance(0.016);
        let selected = showcase.selected().unwrap();
        assert!(showcase.catalog().find(selected).is_some());
    }

    #[test]
    fn demo_config_selects_a_demo_agent() {
        let config =
            crate::config::ShowcaseConfig::parse(include_str!("../demos/showcase.ron")).unwrap();
        let catalog = Catalog::parse(include_str!("../demos/agents.ron")).unwrap();
        let initial = catalog.resolve_selection(config.initial_selection);
        assert_eq!(initial, config.initial_selection);

        let showcase = Showcase::new(catalog, initial);
        assert_eq!(showcase.selected(), Some(20));
        assert!(showcase.selected_product().is_some());
    }

    #[test]
    fn click_pauses_auto_advance() {
        let mut showcase =
            Showcase::new(Catalog::builtin(), Some(1)).with_auto_advance(auto(1.0, 4.0));
        showcase.advance(0.9);
        assert!(showcase.handle_select(4));

        assert!(!showcase.advance(3.0));
        assert_eq!(showcase.selected(), Some(4));
        // 1s of pause left, then a full interval
        assert!(!showcase.advance(1.5));
        assert!(showcase.advance(0.5));
        assert_eq!(showcase.selected(), Some(5));
    }
}
