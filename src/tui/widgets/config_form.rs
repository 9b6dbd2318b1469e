use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::{App, InputMode};

/// Configuration page. Read-only summary in normal mode, editable fields
/// while the config form is active.
pub struct ConfigFormWidget;

impl ConfigFormWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let editing = app.input_mode == InputMode::ConfigForm;

        let block = Block::default()
            .title("Configuration")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if editing { theme.border_accent } else { theme.border_primary }));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Bot token
                Constraint::Length(3), // Chat ID
                Constraint::Length(3), // Currency
                Constraint::Length(3), // Country allowlist
                Constraint::Length(1), // Proxies
                Constraint::Length(1), // Status
                Constraint::Min(0),
                Constraint::Length(1), // Instructions
            ])
            .split(inner);

        let form = &app.config_form;
        let not_set = "(not set)".to_string();
        let values: [String; 4] = if editing {
            [
                form.bot_token.clone(),
                form.chat_id.clone(),
                form.currency.clone(),
                form.country_allowlist.clone(),
            ]
        } else {
            [
                app.telegram.masked_token().unwrap_or_else(|| not_set.clone()),
                app.telegram.chat_id.clone().unwrap_or_else(|| not_set.clone()),
                app.preferences.currency.clone(),
                if app.preferences.country_allowlist.is_empty() {
                    "(all countries)".to_string()
                } else {
                    app.preferences.country_allowlist.join(", ")
                },
            ]
        };
        let titles = ["Telegram bot token", "Telegram chat ID", "Currency", "Country allowlist"];

        for (idx, (title, value)) in titles.iter().zip(values).enumerate() {
            let mut field = Paragraph::new(value).block(Block::default().borders(Borders::ALL).title(*title));
            if editing && form.active_idx == idx {
                field = field.style(theme.input_active);
            }
            f.render_widget(field, chunks[idx]);
        }

        let proxies = match app.config.proxies.len() {
            0 => "none configured".to_string(),
            n => format!("{} configured", n),
        };
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Proxies: ", Style::default().fg(theme.secondary_foreground)),
                Span::raw(proxies),
            ])),
            chunks[4],
        );

        if let Some(status) = &form.status {
            f.render_widget(
                Paragraph::new(status.as_str()).style(Style::default().fg(theme.success_text).bold()),
                chunks[5],
            );
        }

        let hint = if editing {
            "Tab to switch fields, Enter to save for this session, Esc to cancel."
        } else {
            "Press Enter to edit. Changes last for this session only."
        };
        f.render_widget(
            Paragraph::new(hint).style(Style::default().fg(theme.help_text)),
            chunks[7],
        );
    }
}
