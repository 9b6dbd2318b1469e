use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, InputMode};

pub const APP_TITLE: &str = "Vinted Notifications Bot";

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;

        let status_bar_style = Style::default()
            .fg(theme.status_bar_foreground)
            .bg(theme.status_bar_background);

        let status_bar_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(area);

        let (mode_label, mode_bg) = match app.input_mode {
            InputMode::Normal => ("Normal", theme.status_bar_mode_normal_bg),
            InputMode::FilterForm => ("Filter", theme.status_bar_mode_filter_bg),
            InputMode::ConfigForm => ("Config", theme.status_bar_mode_config_bg),
        };

        let status_spans_left = Line::from(vec![
            Span::styled(APP_TITLE, status_bar_style.bold()),
            Span::styled(" | View: ", status_bar_style),
            Span::styled(
                app.active_view.title(),
                Style::default()
                    .fg(theme.status_bar_view_name_fg)
                    .bg(theme.status_bar_background)
                    .bold(),
            ),
            Span::styled(" | ", status_bar_style),
            Span::styled(
                format!(" {} ", mode_label),
                Style::default().fg(theme.primary_foreground).bg(mode_bg).bold(),
            ),
            Span::styled(
                format!(
                    " | {}/{} items ",
                    app.listing.visible_len(),
                    app.listing.total_len()
                ),
                status_bar_style,
            ),
        ]);
        f.render_widget(
            Paragraph::new(status_spans_left).style(status_bar_style),
            status_bar_layout[0],
        );

        let mut status_spans_right = vec![];
        if app.last_fetch_error.is_some() {
            status_spans_right.push(Span::styled("Fetch failed", Style::default().fg(theme.error_text)));
            status_spans_right.push(Span::raw(" | "));
        }
        status_spans_right.push(Span::from(Local::now().format("%H:%M:%S").to_string()));

        f.render_widget(
            Paragraph::new(Line::from(status_spans_right))
                .style(status_bar_style)
                .alignment(Alignment::Right),
            status_bar_layout[1],
        );
    }
}
