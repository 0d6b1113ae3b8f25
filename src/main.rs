mod app;

use eframe::egui;

use sia_orbit::catalog::Catalog;
use sia_orbit::config::ShowcaseConfig;

use app::ShowcaseApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = ShowcaseConfig::from_env_and_args().unwrap_or_else(|e| {
        log::error!("{}; falling back to default settings", e);
        ShowcaseConfig::default()
    });

    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path).unwrap_or_else(|e| {
            log::error!("catalog {}: {}; using built-in agents", path.display(), e);
            Catalog::builtin()
        }),
        None => Catalog::builtin(),
    };

    let (width, height) = config.window_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([width, height]),
        ..Default::default()
    };

    eframe::run_native(
        "SIA — AI Agents",
        options,
        Box::new(move |cc| Ok(Box::new(ShowcaseApp::new(&cc.egui_ctx, config, catalog)))),
    )
}
