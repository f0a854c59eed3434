use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use meme_boxes::{EditorConfig, MemeApp};

/// Mark up text boxes on an image for meme generation.
#[derive(Debug, Parser)]
#[command(name = "meme-boxes", version)]
struct Args {
    /// Background image (gif, png, jpg)
    image: PathBuf,

    /// JSON editor config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the request here instead of asking with a save dialog
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "meme_boxes=debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if !args.image.exists() {
        bail!("file not found: {}", args.image.display());
    }
    let config = EditorConfig::load(args.config.as_deref()).context("loading config")?;

    let title = format!(
        "meme-boxes - {}",
        args.image
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_size.0, config.window_size.1])
            .with_title(&title),
        ..Default::default()
    };

    let Args { image, output, .. } = args;
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(MemeApp::new(&cc.egui_ctx, &image, &config, output)?))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run eframe: {e}"))
}
