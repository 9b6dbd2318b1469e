use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::item::Item;
use crate::tui::theme::AppTheme;

pub const CARD_WIDTH: u16 = 26;
pub const CARD_HEIGHT: u16 = 5;

/// Shortens `text` to at most `width` columns, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut result = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            if width > 0 {
                while used + 1 > width {
                    match result.pop() {
                        Some(c) => used -= c.width().unwrap_or(0),
                        None => break,
                    }
                }
                result.push('…');
            }
            return result;
        }
        used += w;
        result.push(ch);
    }
    result
}

/// Draws one gallery card: price tag, brand and title.
pub fn render_card(
    f: &mut Frame,
    theme: &AppTheme,
    item: &Item,
    currency: &str,
    selected: bool,
    area: Rect,
) {
    let border = if selected { theme.card_border_selected } else { theme.card_border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let lines = vec![
        Line::from(Span::styled(format!(" {} ", item.price_label(currency)), theme.price_tag)),
        Line::from(Span::styled(truncate(&item.brand, width), theme.card_brand)),
        Line::from(Span::styled(truncate(&item.title, width), theme.card_title)),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("Nike Air Max", 20), "Nike Air Max");
        assert_eq!(truncate("Nike Air Max", 6), "Nike …");
        assert_eq!(truncate("日本語", 4), "日…");
        assert_eq!(truncate("abc", 0), "");
    }
}
