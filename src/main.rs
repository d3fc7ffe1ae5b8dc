mod app;

use std::path::PathBuf;

use clap::Parser;
use radial_strategy::config::EngineConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Strategy document (JSON). The built-in sample is shown when omitted.
    #[arg(long)]
    document: Option<PathBuf>,
    /// Engine configuration (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "info")]
    log_filter: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = EngineConfig::load_or_default(args.config.as_deref());
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Radial Strategy",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::RadialStrategyApp::new(
                cc,
                args.document.clone(),
                config.clone(),
            )))
        }),
    )
}
