use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::item_card::{self, CARD_HEIGHT, CARD_WIDTH};
use crate::tui::App;

/// Landing page: a summary of the loaded items and a gallery of the newest
/// ones passing the current filter.
pub struct DashboardWidget;

impl DashboardWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0)])
            .split(area);

        Self::render_summary(f, app, chunks[0]);
        Self::render_gallery(f, app, chunks[1]);
    }

    fn render_summary(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let listing = &app.listing;
        let label = Style::default().fg(theme.secondary_foreground);

        let prices: Vec<f64> = listing.visible_items().map(|item| item.price).collect();
        let price_span = match (
            prices.iter().copied().reduce(f64::min),
            prices.iter().copied().reduce(f64::max),
        ) {
            (Some(lo), Some(hi)) => format!("{} – {} {}", lo, hi, app.preferences.currency),
            _ => "n/a".to_string(),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("Items:   ", label),
                Span::raw(format!(
                    "{} shown of {} loaded",
                    listing.visible_len(),
                    listing.total_len()
                )),
            ]),
            Line::from(vec![
                Span::styled("Brands:  ", label),
                Span::raw(listing.brand_counts().len().to_string()),
                Span::styled("  filter: ", label),
                Span::raw(listing.filter().brand_summary()),
            ]),
            Line::from(vec![
                Span::styled("Prices:  ", label),
                Span::raw(price_span),
                Span::styled("  range: ", label),
                Span::raw(listing.filter().price().to_string()),
            ]),
            Line::from(vec![
                Span::styled("Queries: ", label),
                Span::raw(app.config.queries.len().to_string()),
            ]),
        ];
        let block = Block::default()
            .title(Span::styled("Overview", Style::default().fg(theme.accent).bold()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_gallery(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let block = Block::default()
            .title("Latest items")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if let Some(err) = &app.last_fetch_error {
            f.render_widget(
                Paragraph::new(format!("Could not load items: {}", err))
                    .style(Style::default().fg(theme.error_text)),
                inner,
            );
            return;
        }
        if app.listing.visible_len() == 0 {
            f.render_widget(
                Paragraph::new("No items to show yet.")
                    .style(Style::default().fg(theme.tertiary_foreground)),
                inner,
            );
            return;
        }

        let columns = (inner.width / CARD_WIDTH).max(1);
        let rows = (inner.height / CARD_HEIGHT).max(1);
        let slots = (columns * rows) as usize;
        let shown = app.listing.visible_items().take(app.config.interface.gallery_size.min(slots));
        for (i, item) in shown.enumerate() {
            let col = i as u16 % columns;
            let row = i as u16 / columns;
            let card_area = Rect {
                x: inner.x + col * CARD_WIDTH,
                y: inner.y + row * CARD_HEIGHT,
                width: CARD_WIDTH.min(inner.width),
                height: CARD_HEIGHT.min(inner.height),
            };
            item_card::render_card(f, theme, item, &app.preferences.currency, false, card_area);
        }
    }
}
