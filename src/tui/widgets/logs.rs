use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use tracing::Level;

use crate::tui::App;

pub struct LogsWidget;

impl LogsWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = &app.theme;
        let block = Block::default()
            .title("Logs")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary));

        let log_items: Vec<ListItem> = app
            .log_entries
            .iter()
            .map(|log_entry| {
                let level_style = match log_entry.level {
                    Level::ERROR => theme.log_level_error,
                    Level::WARN => theme.log_level_warn,
                    Level::INFO => theme.log_level_info,
                    Level::DEBUG => theme.log_level_debug,
                    Level::TRACE => theme.log_level_trace,
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", log_entry.timestamp), theme.log_timestamp),
                    Span::styled(
                        format!("{:<5} ", log_entry.level.as_str()),
                        level_style.add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("[{}] ", log_entry.target), theme.log_target),
                    Span::raw(log_entry.message.clone()),
                ]))
            })
            .collect();

        if log_items.is_empty() {
            let placeholder = Paragraph::new("No log entries yet.")
                .block(block)
                .style(Style::default().fg(theme.tertiary_foreground));
            f.render_widget(placeholder, area);
        } else {
            let log_list = List::new(log_items)
                .block(block)
                .highlight_style(theme.highlight_style)
                .highlight_symbol("> ");
            f.render_stateful_widget(log_list, area, &mut app.log_list_state);
        }
    }
}
