// src/tui/app.rs

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::ListState;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn, Level};

use crate::config::{Config, KeyBindingsConfig, PreferencesConfig, TelegramConfig};
use crate::filter::FilterState;
use crate::listing::ItemListing;
use crate::provider::ItemProvider;

use super::theme::AppTheme;

// Define different views for the TUI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Dashboard,
    Items,
    Queries,
    Config,
    Logs,
}

impl AppView {
    pub const ALL: [AppView; 5] = [
        Self::Dashboard,
        Self::Items,
        Self::Queries,
        Self::Config,
        Self::Logs,
    ];

    pub fn next(&self) -> Self {
        match self {
            Self::Dashboard => Self::Items,
            Self::Items => Self::Queries,
            Self::Queries => Self::Config,
            Self::Config => Self::Logs,
            Self::Logs => Self::Dashboard,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Dashboard => Self::Logs,
            Self::Items => Self::Dashboard,
            Self::Queries => Self::Items,
            Self::Config => Self::Queries,
            Self::Logs => Self::Config,
        }
    }

    /// Label used in the sidebar.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Items => "Items",
            Self::Queries => "Queries",
            Self::Config => "Configuration",
            Self::Logs => "Logs",
        }
    }

    /// Shorter label used in the bottom navigation.
    pub fn short_title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Home",
            Self::Config => "Config",
            other => other.title(),
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }
}

// Define input modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    FilterForm,
    ConfigForm,
}

// New struct for TUI log entries
#[derive(Clone, Debug)]
pub struct UILogEntry {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

// App-level events handled by the event loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    ReloadItems,
}

/// Text fields of the brand/price filter popup.
#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub brands: String,
    pub min: String,
    pub max: String,
    pub active_idx: usize,
    pub error: Option<String>,
}

impl FilterForm {
    pub const FIELD_COUNT: usize = 3;

    /// Prefills the form from the filter currently in effect.
    pub fn from_filter(filter: &FilterState) -> Self {
        let price = filter.price();
        Self {
            brands: filter.brands().names().join(", "),
            min: if price.min() > 0.0 { price.min().to_string() } else { String::new() },
            max: if price.max().is_finite() { price.max().to_string() } else { String::new() },
            active_idx: 0,
            error: None,
        }
    }

    pub fn active_field_mut(&mut self) -> &mut String {
        match self.active_idx {
            0 => &mut self.brands,
            1 => &mut self.min,
            _ => &mut self.max,
        }
    }
}

/// Session-only edits of the configuration page. Saving applies them to
/// the running app; nothing is written back to disk.
#[derive(Debug, Clone, Default)]
pub struct ConfigForm {
    pub bot_token: String,
    pub chat_id: String,
    pub currency: String,
    pub country_allowlist: String,
    pub active_idx: usize,
    pub status: Option<String>,
}

impl ConfigForm {
    pub const FIELD_COUNT: usize = 4;

    pub fn from_settings(telegram: &TelegramConfig, preferences: &PreferencesConfig) -> Self {
        Self {
            bot_token: telegram.bot_token.clone().unwrap_or_default(),
            chat_id: telegram.chat_id.clone().unwrap_or_default(),
            currency: preferences.currency.clone(),
            country_allowlist: preferences.country_allowlist.join(", "),
            active_idx: 0,
            status: None,
        }
    }

    pub fn active_field_mut(&mut self) -> &mut String {
        match self.active_idx {
            0 => &mut self.bot_token,
            1 => &mut self.chat_id,
            2 => &mut self.currency,
            _ => &mut self.country_allowlist,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub config: Arc<Config>,
    pub provider: Box<dyn ItemProvider>,
    pub listing: ItemListing,
    pub last_fetch_error: Option<String>,

    pub active_view: AppView,
    pub input_mode: InputMode,
    pub theme: Arc<AppTheme>,

    pub filter_form: FilterForm,
    pub config_form: ConfigForm,
    // Settings as edited during this session
    pub telegram: TelegramConfig,
    pub preferences: PreferencesConfig,

    pub log_entries: Vec<UILogEntry>,
    pub log_list_state: ListState,
    pub log_receiver: Option<mpsc::UnboundedReceiver<UILogEntry>>,
    pub query_list_state: ListState,

    // Updated on render; used for row jumps in the grid
    pub grid_columns: usize,

    // Channel for sending async commands from sync event handlers
    pub event_sender: mpsc::UnboundedSender<AppEvent>,
    pub event_receiver: Option<mpsc::UnboundedReceiver<AppEvent>>,

    pub show_keybindings_modal: bool,
    pub keybinding_map: HashMap<String, (KeyCode, KeyModifiers)>,
}

impl App {
    pub fn new(
        config: Arc<Config>,
        provider: Box<dyn ItemProvider>,
        log_receiver: mpsc::UnboundedReceiver<UILogEntry>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();

        let initial_filter = config.filters.to_filter_state().unwrap_or_else(|e| {
            warn!("Ignoring configured filter: {:#}", e);
            FilterState::default()
        });
        let listing = ItemListing::new(Vec::new(), initial_filter, config.interface.default_view);

        let mut app = Self {
            should_quit: false,
            listing,
            provider,
            last_fetch_error: None,
            active_view: AppView::Dashboard,
            input_mode: InputMode::Normal,
            theme: Arc::new(AppTheme::default()),
            filter_form: FilterForm::default(),
            config_form: ConfigForm::default(),
            telegram: config.telegram.clone(),
            preferences: config.preferences.clone(),
            log_entries: Vec::new(),
            log_list_state: ListState::default(),
            log_receiver: Some(log_receiver),
            query_list_state: ListState::default(),
            grid_columns: 1,
            event_sender: event_tx,
            event_receiver: Some(event_rx),
            show_keybindings_modal: false,
            keybinding_map: parse_keybindings(&config.keybindings),
            config,
        };
        if !app.config.queries.is_empty() {
            app.query_list_state.select(Some(0));
        }
        app
    }

    pub fn tick(&mut self) {
        // Periodic redraw only; the clock in the header is the moving part.
    }

    /// Replaces the record set with a fresh fetch from the provider. The
    /// filter and view survive the reload.
    pub fn reload_items(&mut self) {
        match self.provider.fetch_items() {
            Ok(items) => {
                info!(
                    "Loaded {} items from {} provider",
                    items.len(),
                    self.provider.name()
                );
                self.listing.set_items(items);
                self.last_fetch_error = None;
            }
            Err(e) => {
                error!("Failed to load items from {} provider: {}", self.provider.name(), e);
                self.last_fetch_error = Some(e.to_string());
            }
        }
    }

    /// Pulls pending log entries from the tracing layer, keeping at most
    /// `interface.max_log_entries` and following the tail when the view is
    /// scrolled to the bottom.
    pub fn drain_logs(&mut self) {
        let was_at_bottom = match self.log_list_state.selected() {
            Some(index) => index + 1 >= self.log_entries.len(),
            None => true,
        };
        if let Some(receiver) = self.log_receiver.as_mut() {
            while let Ok(entry) = receiver.try_recv() {
                self.log_entries.push(entry);
            }
        }
        let max_logs = self.config.interface.max_log_entries;
        if self.log_entries.len() > max_logs {
            let overflow = self.log_entries.len() - max_logs;
            self.log_entries.drain(0..overflow);
        }
        if was_at_bottom && !self.log_entries.is_empty() {
            self.log_list_state.select(Some(self.log_entries.len() - 1));
        }
    }

    pub fn open_filter_form(&mut self) {
        self.filter_form = FilterForm::from_filter(self.listing.filter());
        self.input_mode = InputMode::FilterForm;
    }

    /// Validates the form and, on success, replaces the filter as a whole.
    /// On failure the previous filter stays in effect and the form stays open.
    pub fn apply_filter_form(&mut self) {
        let form = &self.filter_form;
        match FilterState::from_input(&form.brands, &form.min, &form.max) {
            Ok(filter) => {
                info!(
                    "Filter applied: {} • {}",
                    filter.brand_summary(),
                    filter.price()
                );
                self.listing.set_filter(filter);
                self.filter_form.error = None;
                self.input_mode = InputMode::Normal;
            }
            Err(e) => {
                warn!("Filter rejected: {}", e);
                self.filter_form.error = Some(e.to_string());
            }
        }
    }

    pub fn clear_filter(&mut self) {
        self.listing.clear_filter();
        info!("Filter cleared");
    }

    pub fn open_config_form(&mut self) {
        self.config_form = ConfigForm::from_settings(&self.telegram, &self.preferences);
        self.input_mode = InputMode::ConfigForm;
    }

    pub fn save_config_form(&mut self) {
        let form = &self.config_form;
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        self.telegram = TelegramConfig {
            bot_token: non_empty(&form.bot_token),
            chat_id: non_empty(&form.chat_id),
        };
        self.preferences = PreferencesConfig {
            currency: non_empty(&form.currency).unwrap_or_else(|| PreferencesConfig::default().currency),
            country_allowlist: form
                .country_allowlist
                .split(',')
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .collect(),
        };
        info!("Preferences applied for this session (not persisted)");
        self.config_form.status = Some("Saved for this session".to_string());
        self.input_mode = InputMode::Normal;
    }

    pub fn scroll_logs_up(&mut self) {
        let current_selection = self.log_list_state.selected().unwrap_or(0);
        if current_selection > 0 {
            self.log_list_state.select(Some(current_selection - 1));
        }
    }

    pub fn scroll_logs_down(&mut self) {
        if self.log_entries.is_empty() {
            return;
        }
        let max_index = self.log_entries.len() - 1;
        let current_selection = self.log_list_state.selected().unwrap_or(0);
        if current_selection < max_index {
            self.log_list_state.select(Some(current_selection + 1));
        }
    }

    pub fn select_next_query(&mut self) {
        let len = self.config.queries.len();
        if len == 0 {
            return;
        }
        let i = self.query_list_state.selected().map_or(0, |i| (i + 1) % len);
        self.query_list_state.select(Some(i));
    }

    pub fn select_previous_query(&mut self) {
        let len = self.config.queries.len();
        if len == 0 {
            return;
        }
        let i = self.query_list_state.selected().map_or(0, |i| (i + len - 1) % len);
        self.query_list_state.select(Some(i));
    }
}

fn parse_keybindings(cfg: &KeyBindingsConfig) -> HashMap<String, (KeyCode, KeyModifiers)> {
    let mut map = HashMap::new();
    macro_rules! insert {
        ($action:expr, $binding:expr) => {
            match parse_keybinding(&$binding) {
                Some((code, mods)) => {
                    map.insert($action.to_string(), (code, mods));
                }
                None => warn!("Unrecognised key binding '{}' for '{}'", $binding, $action),
            }
        };
    }
    insert!("quit", cfg.quit);
    insert!("help", cfg.help);
    insert!("next_tab", cfg.next_tab);
    insert!("prev_tab", cfg.prev_tab);
    insert!("up", cfg.up);
    insert!("down", cfg.down);
    insert!("left", cfg.left);
    insert!("right", cfg.right);
    insert!("enter", cfg.enter);
    insert!("filter", cfg.filter);
    insert!("toggle_view", cfg.toggle_view);
    insert!("clear_filter", cfg.clear_filter);
    insert!("refresh", cfg.refresh);
    map
}

pub fn parse_keybinding(s: &str) -> Option<(KeyCode, KeyModifiers)> {
    let s = s.trim();
    let mut mods = KeyModifiers::empty();
    let mut key = s;
    if let Some(stripped) = key.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        key = stripped;
    }
    if let Some(stripped) = key.strip_prefix("Alt+") {
        mods |= KeyModifiers::ALT;
        key = stripped;
    }
    if let Some(stripped) = key.strip_prefix("Shift+") {
        mods |= KeyModifiers::SHIFT;
        key = stripped;
    }
    let mut chars = key.chars();
    let code = match (chars.next(), chars.next()) {
        // Single characters keep their case: "F" and "f" are different keys.
        (Some(c), None) => KeyCode::Char(c),
        _ => match key.to_lowercase().as_str() {
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            _ => return None,
        },
    };
    Some((code, mods))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::item::sample;
    use crate::listing::ViewMode;
    use crate::provider::StaticProvider;

    pub(crate) fn test_app() -> App {
        let (_tx, rx) = mpsc::unbounded_channel();
        let provider = StaticProvider(vec![
            sample("a", "Nike", 50.0),
            sample("b", "Zara", 150.0),
            sample("c", "Adidas", 90.0),
        ]);
        let mut app = App::new(Arc::new(Config::default()), Box::new(provider), rx);
        app.reload_items();
        app
    }

    #[test]
    fn views_cycle_both_ways() {
        let mut view = AppView::Dashboard;
        for _ in 0..AppView::ALL.len() {
            view = view.next();
        }
        assert_eq!(view, AppView::Dashboard);
        assert_eq!(AppView::Dashboard.previous(), AppView::Logs);
        assert_eq!(AppView::Config.index(), 3);
    }

    #[test]
    fn reload_keeps_filter_and_view() {
        let mut app = test_app();
        app.listing.toggle_view();
        app.filter_form.brands = "zara".to_string();
        app.apply_filter_form();
        app.reload_items();
        assert_eq!(app.listing.view(), ViewMode::List);
        assert_eq!(app.listing.visible_len(), 1);
        assert_eq!(app.listing.total_len(), 3);
    }

    #[test]
    fn invalid_filter_keeps_previous_state() {
        let mut app = test_app();
        app.open_filter_form();
        app.filter_form.min = "200".to_string();
        app.filter_form.max = "100".to_string();
        app.apply_filter_form();
        assert_eq!(app.input_mode, InputMode::FilterForm);
        assert!(app.filter_form.error.as_deref().unwrap().contains("inverted"));
        assert!(app.listing.filter().is_unrestricted());
        assert_eq!(app.listing.visible_len(), 3);
    }

    #[test]
    fn filter_form_prefills_from_current_filter() {
        let mut app = test_app();
        app.listing
            .set_filter(FilterState::from_input("Nike, Zara", "10", "").unwrap());
        app.open_filter_form();
        assert_eq!(app.filter_form.brands, "Nike, Zara");
        assert_eq!(app.filter_form.min, "10");
        assert_eq!(app.filter_form.max, "");
    }

    #[test]
    fn config_form_applies_for_the_session() {
        let mut app = test_app();
        app.open_config_form();
        app.config_form.chat_id = " -1001234567890 ".to_string();
        app.config_form.currency = String::new();
        app.config_form.country_allowlist = "fr, de,,es".to_string();
        app.save_config_form();
        assert_eq!(app.telegram.chat_id.as_deref(), Some("-1001234567890"));
        assert_eq!(app.telegram.bot_token, None);
        assert_eq!(app.preferences.currency, "EUR");
        assert_eq!(app.preferences.country_allowlist, ["FR", "DE", "ES"]);
        assert!(app.config.telegram.chat_id.is_none());
    }

    #[test]
    fn log_buffer_is_capped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut config = Config::default();
        config.interface.max_log_entries = 2;
        let mut app = App::new(Arc::new(config), Box::new(StaticProvider(Vec::new())), rx);
        for i in 0..5 {
            tx.send(UILogEntry {
                timestamp: String::new(),
                level: Level::INFO,
                target: "test".to_string(),
                message: format!("entry {}", i),
            })
            .unwrap();
        }
        app.drain_logs();
        assert_eq!(app.log_entries.len(), 2);
        assert_eq!(app.log_entries[0].message, "entry 3");
        assert_eq!(app.log_list_state.selected(), Some(1));
    }

    #[test]
    fn keybindings_parse() {
        assert_eq!(parse_keybinding("Tab"), Some((KeyCode::Tab, KeyModifiers::empty())));
        assert_eq!(
            parse_keybinding("Ctrl+r"),
            Some((KeyCode::Char('r'), KeyModifiers::CONTROL))
        );
        assert_eq!(parse_keybinding("F"), Some((KeyCode::Char('F'), KeyModifiers::empty())));
        assert_eq!(parse_keybinding("PageDown"), None);
    }
}
