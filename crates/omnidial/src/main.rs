use anyhow::Context;
use clap::Parser;
use dial::Size;
use omnidial::config;
use omnidial::gui::app::{AppInit, AppModel, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use omnidial::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "omnidial", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory that image and sound paths are resolved against (overrides the config)
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    if cli.write_config {
        let path = config::write_default_config(&config_path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = config::load_or_default(&config_path);
    if let Some(dir) = &cli.assets {
        config.assets.dir = dir.clone();
    }
    log::info!(
        "Loaded {} dial items, assets from {}",
        config.items.len(),
        config.assets.dir.display()
    );

    let viewport = Size::new(DEFAULT_WIDTH as f64, DEFAULT_HEIGHT as f64);
    let session = config
        .build_session(viewport)
        .context("Invalid dial configuration")?;

    let (tx, rx) = async_channel::bounded(8);

    runtime::start_background_services(config_path.clone(), tx);

    // Arguments are ours; keep GTK from parsing them.
    let app = RelmApp::new("org.omnidial.Omnidial").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        session,
        config_path,
        assets_dir: cli.assets,
        events: rx,
    });
    Ok(())
}
