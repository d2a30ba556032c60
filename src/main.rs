mod app;
mod config;
mod sim;
mod util;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::config::BackdropConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, help = "JSON file overriding the built-in tuning constants")]
    config: Option<PathBuf>,
    #[arg(long, help = "Seed for a reproducible animation")]
    seed: Option<u64>,
    #[arg(long, help = "Show metaball outlines and live counters")]
    debug: bool,
    #[arg(long, default_value_t = 1440.0)]
    width: f32,
    #[arg(long, default_value_t = 920.0)]
    height: f32,
}

impl Args {
    fn resolve_config(&self) -> Result<BackdropConfig> {
        let mut config = match &self.config {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                BackdropConfig::load(path)?
            }
            None => BackdropConfig::default(),
        };

        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.debug |= self.debug;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.resolve_config()?;
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "constellation backdrop",
        options,
        Box::new(move |cc| Ok(Box::new(app::BackdropApp::new(cc, config)))),
    )
    .map_err(|error| anyhow!("failed to run the backdrop window: {error}"))
}
