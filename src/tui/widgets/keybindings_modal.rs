use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::tui::App;

pub struct KeybindingsModalWidget;

impl KeybindingsModalWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let popup_area = centered_rect(50, 70, area);
        f.render_widget(Clear, popup_area);
        let block = Block::default()
            .title("Keybindings")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_accent))
            .style(Style::default().fg(theme.primary_foreground).bg(theme.popup_background))
            .title_alignment(Alignment::Center);
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let kb = &app.config.keybindings;
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let entries = [
            ("Quit", &kb.quit),
            ("Help", &kb.help),
            ("Next view", &kb.next_tab),
            ("Previous view", &kb.prev_tab),
            ("Up", &kb.up),
            ("Down", &kb.down),
            ("Left", &kb.left),
            ("Right", &kb.right),
            ("Open / edit", &kb.enter),
            ("Filter", &kb.filter),
            ("Grid / list", &kb.toggle_view),
            ("Clear filter", &kb.clear_filter),
            ("Refresh", &kb.refresh),
        ];
        let mut lines: Vec<Line> = entries
            .iter()
            .map(|(name, key)| {
                Line::from(vec![
                    Span::styled(format!("{:<15}", name), bold),
                    Span::raw(key.as_str()),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Esc to close",
            Style::default().fg(theme.help_text),
        )));
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
    }
}
