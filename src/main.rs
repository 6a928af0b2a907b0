//! ANP Dashboard - interactive viewer for Peru's protected natural areas

use anp_dashboard::config::{CliArgs, DashboardConfig};
use anp_dashboard::data::{DataLoader, TerritoryReference};
use anp_dashboard::export;
use anp_dashboard::gui::DashboardApp;
use anyhow::{anyhow, Context, Result};
use eframe::egui;
use env_logger::Env;
use log::info;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse_args();
    let config = DashboardConfig::resolve(&args)?;

    if args.is_headless() {
        return run_headless(&args, &config);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([1000.0, 650.0])
            .with_title("ANP Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "ANP Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("GUI terminated with an error: {}", e))
}

fn run_headless(args: &CliArgs, config: &DashboardConfig) -> Result<()> {
    let mut loader = DataLoader::with_row_limit(config.row_limit);
    let table = loader
        .load(&config.data_path)
        .with_context(|| format!("Failed to load {:?}", config.data_path))?;

    let contents = export::build_all(&table, &TerritoryReference::peru())
        .context("Failed to build reports")?;

    if args.print {
        let stdout = std::io::stdout();
        export::print_tables(&contents, &mut stdout.lock()).context("Failed to write tables")?;
    }

    if let Some(dir) = &args.export {
        let written = export::export_charts(&contents, dir, config.export)
            .with_context(|| format!("Failed to export charts to {:?}", dir))?;
        info!("Wrote {} files", written.len());
    }

    Ok(())
}
