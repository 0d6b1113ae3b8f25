//! `ShowcaseApp` — the egui host page for the agent ring.
//!
//! This module declares the app state and the per-frame driver. Drawing is
//! split across the sibling sub-modules:
//!
//! - `toolbar` — brand strip, compact / dark-mode / auto-advance controls
//! - `content` — the ring canvas and the product detail panel

pub mod content;
pub mod toolbar;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use eframe::egui;

use sia_orbit::catalog::Catalog;
use sia_orbit::config::ShowcaseConfig;
use sia_orbit::orbit::{AnimationLoop, ItemId, OrbitalEngine, SizePreset, TimelineItem};
use sia_orbit::render::OrbitPainter;
use sia_orbit::showcase::Showcase;

// ─── Application state ───────────────────────────────────────────────────────

pub struct ShowcaseApp {
    pub showcase: Showcase,
    pub items: Arc<[TimelineItem]>,
    pub ring: AnimationLoop<egui::Context>,
    pub painter: OrbitPainter,
    /// Ring click events; the sender lives in the engine's `on_select`
    pub select_tx: mpsc::Sender<ItemId>,
    pub select_rx: mpsc::Receiver<ItemId>,
    pub compact: bool,
    pub dark_mode: bool,
    #[cfg(feature = "icons")]
    pub icon_loader: sia_orbit::icons::IconLoader,
    pub icon_textures: HashMap<PathBuf, egui::TextureHandle>,
    pub last_frame_time: Instant,
}

impl ShowcaseApp {
    pub fn new(ctx: &egui::Context, config: ShowcaseConfig, catalog: Catalog) -> Self {
        let initial = catalog.resolve_selection(config.initial_selection);
        let mut showcase = Showcase::new(catalog, initial);
        if let Some(auto) = config.auto_advance {
            showcase = showcase.with_auto_advance(auto);
        }

        let items: Arc<[TimelineItem]> = showcase.catalog().timeline_items().into();
        let (select_tx, select_rx) = mpsc::channel();
        let ring = build_ring(ctx, &items, showcase.selected(), config.compact, &select_tx);

        #[cfg(feature = "icons")]
        let icon_loader = {
            let mut loader = sia_orbit::icons::IconLoader::new();
            for item in items.iter() {
                if let sia_orbit::orbit::Icon::Image(path) = &item.icon {
                    loader.request(path);
                }
            }
            loader
        };

        log::info!(
            "showcase: {} agents, compact={}, auto-advance={}",
            items.len(),
            config.compact,
            showcase.auto_advance_enabled()
        );

        Self {
            showcase,
            items,
            ring,
            painter: OrbitPainter::new(SizePreset::from_compact(config.compact)),
            select_tx,
            select_rx,
            compact: config.compact,
            dark_mode: config.dark_mode,
            #[cfg(feature = "icons")]
            icon_loader,
            icon_textures: HashMap::new(),
            last_frame_time: Instant::now(),
        }
    }

    /// Replace the ring with a fresh instance in the other size preset.
    /// The old loop is stopped when it is dropped.
    pub fn set_compact(&mut self, ctx: &egui::Context, compact: bool) {
        if self.compact == compact {
            return;
        }
        self.compact = compact;
        self.ring = build_ring(ctx, &self.items, self.showcase.selected(), compact, &self.select_tx);
        self.painter.set_preset(SizePreset::from_compact(compact));
    }

    /// Apply ring clicks and the auto-advance timer to the selection, then
    /// round-trip it into the ring.
    fn sync_selection(&mut self, dt_secs: f32) {
        while let Ok(id) = self.select_rx.try_recv() {
            self.showcase.handle_select(id);
        }
        if self.showcase.advance(dt_secs) {
            log::debug!("showcase: auto-advanced to {:?}", self.showcase.selected());
        }
        self.ring.engine_mut().set_selected(self.showcase.selected());
    }

    #[cfg(feature = "icons")]
    fn poll_icons(&mut self, ctx: &egui::Context) {
        self.icon_loader.poll();
        for path in self.icon_loader.loaded_paths() {
            if self.icon_textures.contains_key(&path) {
                continue;
            }
            if let Some(icon) = self.icon_loader.get(&path) {
                let tex = ctx.load_texture(
                    path.display().to_string(),
                    icon.to_color_image(),
                    egui::TextureOptions::LINEAR,
                );
                self.icon_textures.insert(path, tex);
            }
        }
    }
}

fn build_ring(
    ctx: &egui::Context,
    items: &Arc<[TimelineItem]>,
    selected: Option<ItemId>,
    compact: bool,
    select_tx: &mpsc::Sender<ItemId>,
) -> AnimationLoop<egui::Context> {
    let tx = select_tx.clone();
    let engine = OrbitalEngine::new(
        Arc::clone(items),
        selected,
        move |id| {
            let _ = tx.send(id);
        },
        compact,
    );
    AnimationLoop::start(engine, ctx.clone())
}

impl eframe::App for ShowcaseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        self.sync_selection(dt);
        self.ring.frame(now, &mut self.painter);

        #[cfg(feature = "icons")]
        self.poll_icons(ctx);

        ctx.set_visuals(if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, ctx);
        });

        egui::SidePanel::right("details")
            .resizable(false)
            .exact_width(340.0)
            .show(ctx, |ui| {
                self.draw_details(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_ring(ui);
        });
    }
}
