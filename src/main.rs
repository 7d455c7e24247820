mod app;
mod callbacks;
mod color;
mod config;
mod data;
mod figure;
mod state;
mod ui;

use anyhow::Context;
use app::LaunchDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // The window never opens on a partially loaded dataset.
    let dataset = data::loader::load_file(&config.dataset_path)
        .with_context(|| format!("loading {}", config.dataset_path.display()))
        .inspect_err(|e| log::error!("Failed to load dataset: {e:#}"))?;

    log::info!(
        "Loaded {} launches from {} (payload {:.0}–{:.0} kg, sites {:?})",
        dataset.record_count(),
        config.dataset_path.display(),
        dataset.min_payload(),
        dataset.max_payload(),
        dataset.sites(),
    );

    let state = AppState::new(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&config.window_title)
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state, config)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
