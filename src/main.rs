mod app;
mod climate;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use std::path::PathBuf;

use app::EtraceApp;
use clap::Parser;
use climate::labels::ClimateLabels;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

#[derive(Parser)]
#[command(name = "etrace")]
#[command(about = "E-TRACE dashboard: European tourism regional analysis & climate effects")]
#[command(version)]
struct Cli {
    /// Merged dataset to open at startup (.csv, .tsv or .parquet)
    file: Option<PathBuf>,

    #[arg(short, long, help = "Dashboard config (JSON)")]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let config = DashboardConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {e:#}");
        DashboardConfig::default()
    });

    let mut state = AppState::new(config, ClimateLabels::koppen());
    if let Some(path) = &cli.file {
        state.open_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "E-TRACE Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(EtraceApp::new(state)))),
    )
}
