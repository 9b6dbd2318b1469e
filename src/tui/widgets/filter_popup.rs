use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::tui::App;

pub struct FilterPopupWidget;

impl FilterPopupWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let form = &app.filter_form;

        let popup_area = centered_rect(60, 60, area);
        let block = Block::default()
            .title("Filter items")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_accent))
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(theme.popup_background));

        f.render_widget(Clear, popup_area);
        f.render_widget(block.clone(), popup_area);
        let inner_area = block.inner(popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Brands
                Constraint::Length(3), // Min price
                Constraint::Length(3), // Max price
                Constraint::Length(1), // Error
                Constraint::Min(0),
                Constraint::Length(1), // Instructions
            ])
            .split(inner_area);

        let currency = &app.preferences.currency;
        let fields = [
            ("Brands (comma separated, empty = all)".to_string(), form.brands.as_str()),
            (format!("Min price ({})", currency), form.min.as_str()),
            (format!("Max price ({}, empty = no limit)", currency), form.max.as_str()),
        ];
        for (idx, (title, value)) in fields.into_iter().enumerate() {
            let mut input = Paragraph::new(value)
                .block(Block::default().borders(Borders::ALL).title(title));
            if form.active_idx == idx {
                input = input.style(theme.input_active);
            }
            f.render_widget(input, chunks[idx]);
        }

        if let Some(err) = &form.error {
            f.render_widget(
                Paragraph::new(err.as_str()).style(Style::default().fg(theme.error_text)),
                chunks[3],
            );
        }

        let instructions = Paragraph::new("Tab to switch fields, Enter to apply, Esc to cancel.")
            .style(Style::default().fg(theme.secondary_foreground))
            .alignment(Alignment::Center);
        f.render_widget(instructions, chunks[5]);
    }
}
