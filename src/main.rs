mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::MutationLoadApp;
use clap::Parser;
use config::Cli;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    cli.validate()?;

    let mut state = AppState::with_query(cli.query());
    for path in &cli.files {
        state
            .add_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }

    if let Some(out) = &cli.export {
        state.recompute();
        if let Some(msg) = &state.status_message {
            log::warn!("{msg}");
        }
        return data::export::export_path(out, &state.labelled_series());
    }

    if !state.files.is_empty() {
        state.recompute();
    }
    run_viewer(state)
}

fn run_viewer(state: AppState) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mutation Load Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(MutationLoadApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
