// src/cli.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use unicode_width::UnicodeWidthChar;

use crate::config::Config;
use crate::filter::{self, BrandSet, FilterState, PriceRange};
use crate::item::Item;
use crate::listing::{self, ViewMode};
use crate::provider::ItemProvider;

/// vinted-dash: terminal dashboard for Vinted marketplace monitoring
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional path to the configuration file
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress TUI auto-launch (e.g., for scripting)
    #[clap(long)]
    pub headless: bool,

    /// Set log level
    #[clap(long, value_name = "LEVEL", value_enum)]
    pub log_level: Option<LogLevelCli>,

    /// Read items from a JSON or YAML fixture instead of the configured source
    #[clap(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items matching a brand/price filter
    Items(ItemsArgs),

    /// List distinct brands with item counts
    Brands,

    /// Inspect configuration
    #[clap(subcommand)]
    Config(ConfigCommands),
}

#[derive(clap::Args, Debug)]
pub struct ItemsArgs {
    /// Brand to include (repeatable, case-insensitive)
    #[clap(long = "brand", value_name = "BRAND")]
    pub brands: Vec<String>,

    /// Minimum price, inclusive
    #[clap(long, value_name = "AMOUNT")]
    pub min: Option<f64>,

    /// Maximum price, inclusive
    #[clap(long, value_name = "AMOUNT")]
    pub max: Option<f64>,

    /// Output layout
    #[clap(long, value_enum, default_value_t = ViewMode::List)]
    pub view: ViewMode,

    /// Print JSON instead of text
    #[clap(long)]
    pub json: bool,
}

impl ItemsArgs {
    pub fn filter_state(&self) -> Result<FilterState> {
        let price = PriceRange::new(
            self.min.unwrap_or(PriceRange::UNBOUNDED.min()),
            self.max.unwrap_or(PriceRange::UNBOUNDED.max()),
        )
        .context("Invalid --min/--max")?;
        Ok(FilterState::new(BrandSet::new(&self.brands), price))
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevelCli {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevelCli {
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

pub fn handle_command(command: Commands, config: &Config, provider: &dyn ItemProvider) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match command {
        Commands::Items(args) => handle_items_command(&args, config, provider, &mut out),
        Commands::Brands => handle_brands_command(provider, &mut out),
        Commands::Config(ConfigCommands::Show) => {
            write!(out, "{}", config.to_toml_string()?)?;
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ItemsReport<'a> {
    total: usize,
    matched: usize,
    items: Vec<&'a Item>,
}

fn handle_items_command(
    args: &ItemsArgs,
    config: &Config,
    provider: &dyn ItemProvider,
    out: &mut impl Write,
) -> Result<()> {
    let filter = args.filter_state()?;
    let items = provider
        .fetch_items()
        .with_context(|| format!("Failed to load items from {} provider", provider.name()))?;
    let matched = filter::apply(&items, &filter);
    info!("{} of {} items matched", matched.len(), items.len());

    if args.json {
        let report = ItemsReport {
            total: items.len(),
            matched: matched.len(),
            items: matched,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "{} items • {} • {}",
        matched.len(),
        filter.brand_summary(),
        filter.price()
    )?;
    let currency = &config.preferences.currency;
    match args.view {
        ViewMode::List => {
            for item in &matched {
                writeln!(
                    out,
                    "{:<8} {} | {} • {} | {}",
                    item.price_label(currency),
                    pad(&item.title, 28),
                    item.brand,
                    item.location,
                    item.tags.join(", ")
                )?;
            }
        }
        ViewMode::Grid => {
            for row in matched.chunks(4) {
                let line: Vec<String> = row
                    .iter()
                    .map(|item| pad(&format!("{} {}", item.price_label(currency), item.title), 24))
                    .collect();
                writeln!(out, "{}", line.join(" | "))?;
            }
        }
    }
    Ok(())
}

fn handle_brands_command(provider: &dyn ItemProvider, out: &mut impl Write) -> Result<()> {
    let items = provider.fetch_items()?;
    for (brand, count) in listing::brand_counts(&items) {
        writeln!(out, "{:<20} {}", brand, count)?;
    }
    Ok(())
}

/// Truncates or right-pads to a display width.
pub fn pad(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        result.push(ch);
    }
    if used < width {
        result.push_str(&" ".repeat(width - used));
    }
    result
}
