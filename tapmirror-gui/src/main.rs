//! tapmirror entry point.
//!
//! ```text
//! tapmirror                        Mirror the only attached device
//! tapmirror -s <serial>            Pick a device
//! tapmirror --screen 1080x2400     Skip the `wm size` query
//! tapmirror --config <path>        Use custom config TOML
//! tapmirror --gen-config           Dump default config and exit
//! tapmirror --init                 Write default config to --config and exit
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tapmirror_core::{AdbBridge, Controller, DeviceBridge, MirrorError, ScreenSize};
use tapmirror_gui::config::{ConfigSource, MirrorConfig, parse_screen_arg};
use tapmirror_gui::window::MirrorWindow;

// ── CLI ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tapmirror", about = "Mirror an Android screen and click to tap")]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, default_value = "tapmirror.toml")]
    config: PathBuf,

    /// Device serial (overrides config).
    #[arg(short, long)]
    serial: Option<String>,

    /// Device screen size as WIDTHxHEIGHT (overrides config and `wm size`).
    #[arg(long, value_parser = parse_screen_arg)]
    screen: Option<ScreenSize>,

    /// Print the default configuration to stdout and exit.
    #[arg(long)]
    gen_config: bool,

    /// Write the default configuration to the --config path and exit.
    #[arg(long)]
    init: bool,
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        let text = toml::to_string_pretty(&MirrorConfig::default())?;
        println!("{text}");
        return Ok(());
    }

    if cli.init {
        MirrorConfig::write_default(&cli.config)?;
        println!("wrote {}", cli.config.display());
        return Ok(());
    }

    let (mut config, source) = MirrorConfig::load(&cli.config);
    if let Some(serial) = cli.serial {
        config.device.serial = serial;
    }
    if let Some(size) = cli.screen {
        config.set_screen(size);
    }

    // Init tracing.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("tapmirror v{}", env!("CARGO_PKG_VERSION"));
    match source {
        ConfigSource::File => info!("loaded config from {}", cli.config.display()),
        ConfigSource::Missing => info!("no config at {}; using defaults", cli.config.display()),
        ConfigSource::Invalid(e) => {
            warn!("invalid config {}: {e}; using defaults", cli.config.display())
        }
    }

    if let Err(e) = run(&config).await {
        error!("{e}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run(config: &MirrorConfig) -> Result<(), MirrorError> {
    // ── 1. Device bridge ────────────────────────────────────────

    let bridge = Arc::new(
        AdbBridge::new(config.device.adb_path.clone())
            .with_serial(Some(config.device.serial.clone()))
            .with_timeout_ms(config.device.timeout_ms),
    );

    let screen = match config.screen_override() {
        Some(size) => {
            info!("device screen {size} (configured)");
            size
        }
        None => {
            let size = bridge.screen_size().await?;
            info!("device screen {size} (from wm size)");
            size
        }
    };

    // ── 2. Window ───────────────────────────────────────────────

    let window = MirrorWindow::create(
        &config.display.title,
        config.display.width,
        config.display.height,
        config.display.vsync,
    )?;

    // ── 3. Loop until closed ────────────────────────────────────

    let mut controller = Controller::new(bridge, window, screen)?
        .with_idle_sleep(Duration::from_millis(config.capture.idle_sleep_ms));
    controller.run().await?;

    info!("shutting down");
    Ok(())
}
