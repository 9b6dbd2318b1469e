use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::App;

pub struct QueriesWidget;

impl QueriesWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = &app.theme;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let block = Block::default()
            .title("Queries")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary));

        if app.config.queries.is_empty() {
            f.render_widget(
                Paragraph::new("No queries configured.")
                    .style(Style::default().fg(theme.tertiary_foreground))
                    .block(block),
                chunks[0],
            );
        } else {
            let rows: Vec<ListItem> = app
                .config
                .queries
                .iter()
                .map(|query| {
                    ListItem::new(vec![
                        Line::from(Span::styled(query.name.clone(), theme.card_title)),
                        Line::from(Span::styled(
                            query.url.clone(),
                            Style::default().fg(theme.secondary_foreground),
                        )),
                    ])
                })
                .collect();
            let list = List::new(rows)
                .block(block)
                .highlight_style(theme.highlight_style)
                .highlight_symbol("> ");
            f.render_stateful_widget(list, chunks[0], &mut app.query_list_state);
        }

        f.render_widget(
            Paragraph::new("Coming soon: full query management")
                .style(Style::default().fg(theme.help_text)),
            chunks[1],
        );
    }
}
