// src/main.rs

mod cli;
mod config;
mod errors;
mod filter;
mod item;
mod listing;
mod provider;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::Config;
use tui::tracing_layer::TuiLogCollectorLayer;
use tui::{run_tui, UILogEntry};

const LOG_FILE_NAME: &str = "vinted-dash.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = Cli::parse();

    // An explicit --config must load; a broken default file falls back to defaults.
    let (config, config_error) = match Config::load(cli_args.config.as_deref()) {
        Ok(cfg) => (cfg, None),
        Err(e) if cli_args.config.is_some() => return Err(e),
        Err(e) => (Config::default(), Some(e)),
    };
    let config = Arc::new(config);

    let launch_tui = cli_args.command.is_none() && !cli_args.headless;
    let (log_sender, log_receiver) = if launch_tui {
        let (tx, rx) = mpsc::unbounded_channel::<UILogEntry>();
        (Some(tx), Some(rx))
    } else {
        (None, None)
    };
    let _log_guard = init_tracing(&cli_args, &config, log_sender)?;

    info!("Starting vinted-dash...");
    if let Some(e) = config_error {
        warn!("Proceeding with default configuration due to error: {:#}", e);
    }
    debug!("Loaded app config: {:?}", config);

    let provider = provider::from_config(&config, cli_args.fixture.as_deref())
        .context("Failed to initialize item provider")?;
    info!("Item provider '{}' initialized.", provider.name());

    if let Some(command) = cli_args.command {
        cli::handle_command(command, &config, provider.as_ref())?;
    } else if let Some(log_receiver) = log_receiver {
        info!("No subcommand provided and not headless, launching TUI...");
        run_tui(Arc::clone(&config), provider, log_receiver).await?;
    } else {
        println!("vinted-dash running in headless mode. No command given. Exiting.");
    }

    info!("vinted-dash shutting down.");
    Ok(())
}

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG`, then `--log-level`, then
/// `logging.level`. Events go to the Logs view while the TUI runs and to
/// stderr otherwise; `logging.log_to_file` adds a JSON file sink whose
/// guard must outlive `main`.
fn init_tracing(
    cli_args: &Cli,
    config: &Config,
    tui_sender: Option<mpsc::UnboundedSender<UILogEntry>>,
) -> Result<Option<WorkerGuard>> {
    let default_directive = match cli_args.log_level {
        Some(level) => level.as_filter_str().to_string(),
        None => config.logging.level.clone(),
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_directive))
        .with_context(|| format!("Invalid log level '{}'", default_directive))?;

    let stderr_layer = tui_sender
        .is_none()
        .then(|| fmt::layer().with_writer(std::io::stderr));
    let tui_layer = tui_sender.map(TuiLogCollectorLayer::new);

    let (file_layer, guard) = if config.logging.log_to_file {
        let log_dir = config.logging.resolve_log_dir()?;
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
        let appender = if config.logging.rotate_daily {
            tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME)
        } else {
            tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME)
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Setting default tracing subscriber failed")?;

    Ok(guard)
}
