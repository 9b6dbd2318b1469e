use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct AppTheme {
    // General
    pub primary_foreground: Color,
    pub secondary_foreground: Color,
    pub tertiary_foreground: Color,
    pub accent: Color, // Vinted teal
    pub border_primary: Color,
    pub border_secondary: Color,
    pub border_accent: Color,
    pub highlight_style: Style,
    pub error_text: Color,
    pub success_text: Color,
    pub help_text: Color,

    // Header bar
    pub status_bar_background: Color,
    pub status_bar_foreground: Color,
    pub status_bar_mode_normal_bg: Color,
    pub status_bar_mode_filter_bg: Color,
    pub status_bar_mode_config_bg: Color,
    pub status_bar_view_name_fg: Color,

    // Navigation
    pub nav_active: Style,
    pub nav_inactive: Style,

    // Item cards and rows
    pub price_tag: Style,
    pub card_title: Style,
    pub card_brand: Style,
    pub card_border: Color,
    pub card_border_selected: Color,
    pub tag_style: Style,
    pub items_header: Style,
    pub detail_label: Style,

    // Log View
    pub log_level_trace: Style,
    pub log_level_debug: Style,
    pub log_level_info: Style,
    pub log_level_warn: Style,
    pub log_level_error: Style,
    pub log_timestamp: Style,
    pub log_target: Style,

    // Popup
    pub popup_background: Color,
    pub input_active: Style,
}

impl Default for AppTheme {
    fn default() -> Self {
        let teal = Color::Rgb(9, 177, 186);
        Self {
            // General
            primary_foreground: Color::White,
            secondary_foreground: Color::Gray,
            tertiary_foreground: Color::DarkGray,
            accent: teal,
            border_primary: Color::DarkGray,
            border_secondary: Color::Gray,
            border_accent: teal,
            highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            error_text: Color::Red,
            success_text: Color::Green,
            help_text: Color::DarkGray,

            // Header bar
            status_bar_background: Color::Rgb(0, 95, 100),
            status_bar_foreground: Color::White,
            status_bar_mode_normal_bg: Color::Rgb(0, 130, 137),
            status_bar_mode_filter_bg: Color::LightMagenta,
            status_bar_mode_config_bg: Color::LightGreen,
            status_bar_view_name_fg: Color::Yellow,

            // Navigation
            nav_active: Style::default().fg(Color::Black).bg(teal).add_modifier(Modifier::BOLD),
            nav_inactive: Style::default().fg(Color::Gray),

            // Item cards and rows
            price_tag: Style::default().fg(Color::Black).bg(teal).add_modifier(Modifier::BOLD),
            card_title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            card_brand: Style::default().fg(Color::Gray),
            card_border: Color::DarkGray,
            card_border_selected: teal,
            tag_style: Style::default().fg(Color::Gray).bg(Color::Rgb(50, 50, 50)),
            items_header: Style::default().fg(Color::Gray),
            detail_label: Style::default().fg(Color::Gray),

            // Log View
            log_level_trace: Style::default().fg(Color::Magenta),
            log_level_debug: Style::default().fg(Color::Green),
            log_level_info: Style::default().fg(Color::Cyan),
            log_level_warn: Style::default().fg(Color::Yellow),
            log_level_error: Style::default().fg(Color::Red),
            log_timestamp: Style::default().fg(Color::DarkGray),
            log_target: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),

            // Popup
            popup_background: Color::Rgb(30, 30, 30),
            input_active: Style::default().fg(teal).add_modifier(Modifier::BOLD),
        }
    }
}
