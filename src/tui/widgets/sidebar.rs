use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::tui::app::{App, AppView};

/// Vertical navigation shown on wide terminals.
pub struct SidebarWidget;

impl SidebarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let entries: Vec<ListItem> = AppView::ALL
            .iter()
            .map(|view| {
                let style = if *view == app.active_view {
                    theme.nav_active
                } else {
                    theme.nav_inactive
                };
                let badge = match view {
                    AppView::Items => format!(" ({})", app.listing.visible_len()),
                    AppView::Queries => format!(" ({})", app.config.queries.len()),
                    _ => String::new(),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {}", view.title()), style),
                    Span::styled(badge, Style::default().fg(theme.tertiary_foreground)),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(app.active_view.index()));
        let list = List::new(entries).block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Style::default().fg(theme.border_primary)),
        );
        f.render_stateful_widget(list, area, &mut state);
    }
}
