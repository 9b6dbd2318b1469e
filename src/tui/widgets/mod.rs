use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub mod bottom_nav;
pub mod config_form;
pub mod dashboard;
pub mod filter_popup;
pub mod item_card;
pub mod items;
pub mod keybindings_modal;
pub mod logs;
pub mod queries;
pub mod sidebar;
pub mod status_bar;

/// Helper for creating a centered popup.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
