use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::item_card::{self, CARD_HEIGHT, CARD_WIDTH};
use crate::item::Item;
use crate::listing::ViewMode;
use crate::tui::theme::AppTheme;
use crate::tui::App;

// Below this width the detail pane is hidden.
const DETAIL_MIN_WIDTH: u16 = 90;

pub struct ItemsWidget;

impl ItemsWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        Self::render_header(f, app, chunks[0]);

        let body = chunks[1];
        let (list_area, detail_area) = if body.width >= DETAIL_MIN_WIDTH {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(body);
            (panes[0], Some(panes[1]))
        } else {
            (body, None)
        };

        if app.listing.visible_len() == 0 {
            let theme = &app.theme;
            let message = match &app.last_fetch_error {
                Some(err) => Span::styled(format!("Could not load items: {}", err), Style::default().fg(theme.error_text)),
                None if app.listing.total_len() == 0 => {
                    Span::styled("No items loaded.", Style::default().fg(theme.tertiary_foreground))
                }
                None => Span::styled(
                    "No items match the current filter. Press the clear-filter key to reset.",
                    Style::default().fg(theme.tertiary_foreground),
                ),
            };
            f.render_widget(
                Paragraph::new(Line::from(message))
                    .wrap(Wrap { trim: true })
                    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border_primary))),
                list_area,
            );
        } else {
            match app.listing.view() {
                ViewMode::Grid => Self::render_grid(f, app, list_area),
                ViewMode::List => Self::render_list(f, app, list_area),
            }
        }

        if let Some(detail_area) = detail_area {
            Self::render_detail(f, app, detail_area);
        }
    }

    fn render_header(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let filter = app.listing.filter();
        let mut summary = format!(
            "{} items • {}",
            app.listing.visible_len(),
            filter.brand_summary()
        );
        if !filter.price().is_unbounded() {
            summary.push_str(&format!(" • {} {}", filter.price(), app.preferences.currency));
        }
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(12)])
            .split(area);
        f.render_widget(Paragraph::new(summary).style(theme.items_header), chunks[0]);
        f.render_widget(
            Paragraph::new(format!("[{}]", app.listing.view().label()))
                .style(Style::default().fg(theme.accent).bold())
                .alignment(ratatui::layout::Alignment::Right),
            chunks[1],
        );
    }

    fn render_grid(f: &mut Frame, app: &mut App, area: Rect) {
        let columns = (area.width / CARD_WIDTH).max(1);
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        app.grid_columns = columns as usize;

        let selected = app.listing.selected().unwrap_or(0);
        let selected_row = selected / columns as usize;
        let first_row = selected_row.saturating_sub(visible_rows - 1);
        let skip = first_row * columns as usize;
        let take = visible_rows * columns as usize;

        let theme = &app.theme;
        let currency = &app.preferences.currency;
        for (offset, item) in app.listing.visible_items().skip(skip).take(take).enumerate() {
            let col = (offset % columns as usize) as u16;
            let row = (offset / columns as usize) as u16;
            let card_area = Rect {
                x: area.x + col * CARD_WIDTH,
                y: area.y + row * CARD_HEIGHT,
                width: CARD_WIDTH.min(area.width),
                height: CARD_HEIGHT.min(area.height),
            };
            item_card::render_card(f, theme, item, currency, skip + offset == selected, card_area);
        }
    }

    fn render_list(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = &app.theme;
        let currency = &app.preferences.currency;
        let rows: Vec<ListItem> = app
            .listing
            .visible_items()
            .map(|item| ListItem::new(list_row(theme, item, currency)))
            .collect();

        let list = List::new(rows)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border_primary)),
            )
            .highlight_style(theme.highlight_style)
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(app.listing.selected());
        f.render_stateful_widget(list, area, &mut state);
    }

    fn render_detail(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let block = Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_secondary));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(item) = app.listing.selected_item() else {
            f.render_widget(
                Paragraph::new("Nothing selected").style(Style::default().fg(theme.tertiary_foreground)),
                inner,
            );
            return;
        };

        let label = |name: &'static str| Span::styled(format!("{:<10}", name), theme.detail_label);
        let mut lines = vec![
            Line::from(Span::styled(item.title.clone(), theme.card_title)),
            Line::from(""),
            Line::from(vec![label("Price"), Span::styled(format!(" {} ", item.price_label(&app.preferences.currency)), theme.price_tag)]),
            Line::from(vec![label("Brand"), Span::raw(item.brand.clone())]),
            Line::from(vec![label("Condition"), Span::raw(item.condition.label())]),
            Line::from(vec![label("Location"), Span::raw(item.location.clone())]),
            Line::from(vec![label("Seller"), Span::raw(format!("{:.1} ★", item.seller))]),
            Line::from(vec![label("Posted"), Span::raw(item.time.clone())]),
        ];
        if !item.url.is_empty() {
            lines.push(Line::from(vec![label("Link"), Span::raw(item.url.clone())]));
        }
        if !item.tags.is_empty() {
            lines.push(Line::from(""));
            lines.push(tag_line(theme, &item.tags));
        }
        f.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }), inner);
    }
}

fn tag_line<'a>(theme: &AppTheme, tags: &'a [String]) -> Line<'a> {
    let mut spans = Vec::with_capacity(tags.len() * 2);
    for tag in tags {
        spans.push(Span::styled(format!(" {} ", tag), theme.tag_style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn list_row<'a>(theme: &AppTheme, item: &'a Item, currency: &str) -> Text<'a> {
    let mut second = vec![Span::styled(
        format!("{} • {}", item.brand, item.location),
        theme.card_brand,
    )];
    if !item.tags.is_empty() {
        second.push(Span::raw("  "));
        second.extend(tag_line(theme, &item.tags).spans);
    }
    Text::from(vec![
        Line::from(vec![
            Span::styled(format!(" {} ", item.price_label(currency)), theme.price_tag),
            Span::raw(" "),
            Span::styled(item.title.as_str(), theme.card_title),
        ]),
        Line::from(second),
    ])
}
