use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::app::{App, AppView, InputMode};
use super::widgets::{
    bottom_nav::BottomNavWidget, config_form::ConfigFormWidget, dashboard::DashboardWidget,
    filter_popup::FilterPopupWidget, items::ItemsWidget, keybindings_modal::KeybindingsModalWidget,
    logs::LogsWidget, queries::QueriesWidget, sidebar::SidebarWidget, status_bar::StatusBarWidget,
};

const SIDEBAR_WIDTH: u16 = 20;

pub fn ui(f: &mut Frame, app: &mut App) {
    let size = f.size();
    let narrow = size.width < app.config.interface.narrow_width;

    // Header on top, content in the middle and, on narrow terminals, the
    // navigation tabs at the bottom.
    let main_layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                            // Header
            Constraint::Min(0),                               // Main content
            Constraint::Length(if narrow { 2 } else { 0 }),   // Bottom navigation
        ])
        .split(size);

    StatusBarWidget::render(f, app, main_layout_chunks[0]);

    let main_content_area = if narrow {
        BottomNavWidget::render(f, app, main_layout_chunks[2]);
        main_layout_chunks[1]
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(main_layout_chunks[1]);
        SidebarWidget::render(f, app, columns[0]);
        columns[1]
    };

    match app.active_view {
        AppView::Dashboard => DashboardWidget::render(f, app, main_content_area),
        AppView::Items => ItemsWidget::render(f, app, main_content_area),
        AppView::Queries => QueriesWidget::render(f, app, main_content_area),
        AppView::Config => ConfigFormWidget::render(f, app, main_content_area),
        AppView::Logs => LogsWidget::render(f, app, main_content_area),
    }

    // Popups over the main content
    if app.input_mode == InputMode::FilterForm {
        FilterPopupWidget::render(f, app, size);
    }
    if app.show_keybindings_modal {
        KeybindingsModalWidget::render(f, app, size);
    }
}
