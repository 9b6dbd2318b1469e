// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use xdg::BaseDirectories;

use crate::filter::{BrandSet, FilterState, PriceRange};
use crate::listing::ViewMode;

pub const APP_NAME: &str = "vinted-dash";
pub const DEFAULT_CONFIG_FILENAME: &str = "config.toml";

// Main configuration structure, mapping to config.toml
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub proxies: Vec<String>,
    #[serde(default)]
    pub interface: InterfaceConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub queries: Vec<QueryConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
    // Where this config was read from, if anywhere
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct InterfaceConfig {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default)]
    pub default_view: ViewMode,
    #[serde(default = "default_narrow_width")]
    pub narrow_width: u16,
    #[serde(default = "default_max_log_entries")]
    pub max_log_entries: usize,
    #[serde(default = "default_gallery_size")]
    pub gallery_size: usize,
}

fn default_refresh_interval_ms() -> u64 {
    500
}
fn default_narrow_width() -> u16 {
    100
}
fn default_max_log_entries() -> usize {
    1000
}
fn default_gallery_size() -> usize {
    6
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        InterfaceConfig {
            refresh_interval_ms: default_refresh_interval_ms(),
            default_view: ViewMode::default(),
            narrow_width: default_narrow_width(),
            max_log_entries: default_max_log_entries(),
            gallery_size: default_gallery_size(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Mock,
    Fixture,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    #[serde(default)]
    pub source: DataSource,
    #[serde(default)]
    pub fixture_path: Option<String>, // Path, can use ~
    #[serde(default = "default_mock_count")]
    pub mock_count: usize,
}

fn default_mock_count() -> usize {
    24
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            source: DataSource::default(),
            fixture_path: None,
            mock_count: default_mock_count(),
        }
    }
}

/// Filter applied when the dashboard starts.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct FiltersConfig {
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl FiltersConfig {
    pub fn to_filter_state(&self) -> Result<FilterState> {
        let price = PriceRange::new(
            self.min_price.unwrap_or(PriceRange::UNBOUNDED.min()),
            self.max_price.unwrap_or(PriceRange::UNBOUNDED.max()),
        )
        .context("Invalid [filters] price range in configuration")?;
        Ok(FilterState::new(BrandSet::new(&self.brands), price))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct PreferencesConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub country_allowlist: Vec<String>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        PreferencesConfig {
            currency: default_currency(),
            country_allowlist: Vec::new(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
}

impl TelegramConfig {
    /// Token with everything but the bot id hidden, e.g. `123456:••••`.
    pub fn masked_token(&self) -> Option<String> {
        self.bot_token.as_ref().map(|token| match token.split_once(':') {
            Some((bot_id, _)) => format!("{}:••••", bot_id),
            None => "••••".to_string(),
        })
    }
}

/// A monitored marketplace search.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    pub name: String,
    pub url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default)]
    pub log_to_file: bool,
    #[serde(default)]
    pub log_dir: Option<String>, // Path, can use ~; defaults to the XDG state dir
    #[serde(default = "default_rotate_daily")]
    pub rotate_daily: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_rotate_daily() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            log_to_file: false,
            log_dir: None,
            rotate_daily: default_rotate_daily(),
        }
    }
}

impl LoggingConfig {
    pub fn resolve_log_dir(&self) -> Result<PathBuf> {
        match &self.log_dir {
            Some(dir) => Ok(PathBuf::from(shellexpand::tilde(dir).as_ref())),
            None => {
                let xdg_dirs = BaseDirectories::with_prefix(APP_NAME)?;
                Ok(xdg_dirs.get_state_home().join("logs"))
            }
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct KeyBindingsConfig {
    #[serde(default = "default_quit")] pub quit: String,
    #[serde(default = "default_help")] pub help: String,
    #[serde(default = "default_next_tab")] pub next_tab: String,
    #[serde(default = "default_prev_tab")] pub prev_tab: String,
    #[serde(default = "default_up")] pub up: String,
    #[serde(default = "default_down")] pub down: String,
    #[serde(default = "default_left")] pub left: String,
    #[serde(default = "default_right")] pub right: String,
    #[serde(default = "default_enter")] pub enter: String,
    #[serde(default = "default_filter")] pub filter: String,
    #[serde(default = "default_toggle_view")] pub toggle_view: String,
    #[serde(default = "default_clear_filter")] pub clear_filter: String,
    #[serde(default = "default_refresh")] pub refresh: String,
}

fn default_quit() -> String { "q".to_string() }
fn default_help() -> String { "?".to_string() }
fn default_next_tab() -> String { "Tab".to_string() }
fn default_prev_tab() -> String { "BackTab".to_string() }
fn default_up() -> String { "Up".to_string() }
fn default_down() -> String { "Down".to_string() }
fn default_left() -> String { "Left".to_string() }
fn default_right() -> String { "Right".to_string() }
fn default_enter() -> String { "Enter".to_string() }
fn default_filter() -> String { "f".to_string() }
fn default_toggle_view() -> String { "v".to_string() }
fn default_clear_filter() -> String { "c".to_string() }
fn default_refresh() -> String { "r".to_string() }

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            help: default_help(),
            next_tab: default_next_tab(),
            prev_tab: default_prev_tab(),
            up: default_up(),
            down: default_down(),
            left: default_left(),
            right: default_right(),
            enter: default_enter(),
            filter: default_filter(),
            toggle_view: default_toggle_view(),
            clear_filter: default_clear_filter(),
            refresh: default_refresh(),
        }
    }
}

impl Config {
    /// Loads `config.toml` from the override path or the XDG config dir.
    ///
    /// A missing default file yields the built-in defaults; an explicit
    /// override must exist.
    pub fn load(config_path_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_path_override {
            Some(path) => {
                debug!("Using provided config path override: {}", path.display());
                path.to_path_buf()
            }
            None => {
                let xdg_dirs = BaseDirectories::with_prefix(APP_NAME)?;
                match xdg_dirs.find_config_file(DEFAULT_CONFIG_FILENAME) {
                    Some(path) => path,
                    None => {
                        debug!(
                            "No '{}' found in XDG config dirs, using defaults",
                            DEFAULT_CONFIG_FILENAME
                        );
                        return Ok(Config::default());
                    }
                }
            }
        };

        info!("Loading configuration from {}", config_path.display());
        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

        let mut config = Self::from_toml_str(&config_str)?;
        config.source_path = Some(config_path);
        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(config_str).with_context(|| "Failed to parse TOML configuration")?;
        // Surface a bad initial filter at load time rather than at first render.
        config.filters.to_filter_state()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.interface.refresh_interval_ms, 500);
        assert_eq!(config.interface.default_view, ViewMode::Grid);
        assert_eq!(config.data.source, DataSource::Mock);
        assert_eq!(config.data.mock_count, 24);
        assert_eq!(config.preferences.currency, "EUR");
        assert_eq!(config.keybindings.toggle_view, "v");
        assert!(config.filters.to_filter_state().unwrap().is_unrestricted());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            proxies = ["http://10.0.0.1:8080"]

            [interface]
            default_view = "list"

            [filters]
            brands = ["Nike", "Adidas"]
            max_price = 100.0

            [[queries]]
            name = "Nike sneakers"
            url = "https://www.vinted.de/catalog?search_text=nike"
            "#,
        )
        .unwrap();
        assert_eq!(config.interface.default_view, ViewMode::List);
        assert_eq!(config.interface.gallery_size, 6);
        assert_eq!(config.proxies.len(), 1);
        assert_eq!(config.queries[0].name, "Nike sneakers");
        let filter = config.filters.to_filter_state().unwrap();
        assert_eq!(filter.brand_summary(), "Nike, Adidas");
        assert_eq!(filter.price().max(), 100.0);
        assert_eq!(filter.price().min(), 0.0);
    }

    #[test]
    fn inverted_initial_filter_is_rejected() {
        let err = Config::from_toml_str("[filters]\nmin_price = 50.0\nmax_price = 10.0\n");
        assert!(err.is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Config::from_toml_str("[interface]\nmode = \"modal\"\n").is_err());
    }

    #[test]
    fn load_from_override_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[preferences]\ncurrency = \"PLN\"").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.preferences.currency, "PLN");
        assert_eq!(config.source_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn missing_override_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = Config::default();
        config.telegram.chat_id = Some("-1001234567890".to_string());
        let text = config.to_toml_string().unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(parsed.telegram.chat_id, config.telegram.chat_id);
    }

    #[test]
    fn token_is_masked() {
        let telegram = TelegramConfig {
            bot_token: Some("123456:ABC-DEF1234".to_string()),
            chat_id: None,
        };
        assert_eq!(telegram.masked_token().as_deref(), Some("123456:••••"));
        assert_eq!(TelegramConfig::default().masked_token(), None);
    }

    #[test]
    fn explicit_log_dir_is_used() {
        let logging = LoggingConfig {
            log_dir: Some("/var/log/vinted-dash".to_string()),
            ..LoggingConfig::default()
        };
        assert_eq!(
            logging.resolve_log_dir().unwrap(),
            PathBuf::from("/var/log/vinted-dash")
        );
    }
}
