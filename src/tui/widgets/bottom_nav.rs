use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::tui::app::{App, AppView};

/// Tab bar that replaces the sidebar on narrow terminals.
pub struct BottomNavWidget;

impl BottomNavWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let titles: Vec<Line> = AppView::ALL
            .iter()
            .map(|view| Line::from(view.short_title()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(app.active_view.index())
            .style(theme.nav_inactive)
            .highlight_style(theme.nav_active)
            .divider("|")
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(theme.border_primary)),
            );
        f.render_widget(tabs, area);
    }
}
