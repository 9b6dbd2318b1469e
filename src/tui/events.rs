// src/tui/events.rs

use anyhow::{anyhow, Result};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::time::{Duration, Instant};
use tracing::warn;

use super::app::{App, AppEvent, AppView, ConfigForm, FilterForm, InputMode};
use super::ui::ui;
use crate::listing::ViewMode;

pub async fn run_app_loop<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let mut last_tick = Instant::now();
    let mut event_receiver = app
        .event_receiver
        .take()
        .ok_or_else(|| anyhow!("App event receiver already taken"))?;
    let mut crossterm_events = EventStream::new();

    // Initial data fetch
    app.reload_items();

    loop {
        app.drain_logs();
        terminal.draw(|f| ui(f, &mut app))?;

        let tick_duration = Duration::from_millis(app.config.interface.refresh_interval_ms);

        tokio::select! {
            Some(event) = event_receiver.recv() => {
                match event {
                    AppEvent::ReloadItems => app.reload_items(),
                }
            }

            Some(Ok(event)) = crossterm_events.next() => {
                match event {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => on_key(&mut app, key),
                    CrosstermEvent::Mouse(mouse) => on_mouse_event(&mut app, mouse),
                    _ => {}
                }
            }

            // Redraw for the clock; items are only refetched on request
            _ = tokio::time::sleep(tick_duration) => {
                if last_tick.elapsed() >= tick_duration {
                    app.tick();
                    last_tick = Instant::now();
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn on_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.input_mode != InputMode::Normal {
        return;
    }
    match mouse_event.kind {
        MouseEventKind::ScrollUp => move_up(app),
        MouseEventKind::ScrollDown => move_down(app),
        _ => {}
    }
}

fn key_matches(app: &App, action: &str, key_event: &KeyEvent) -> bool {
    let Some((code, mods)) = app.keybinding_map.get(action) else {
        return false;
    };
    if key_event.code != *code {
        return false;
    }
    match key_event.code {
        // Terminals report SHIFT for upper-case characters and BackTab.
        KeyCode::Char(_) | KeyCode::BackTab => {
            key_event.modifiers.difference(KeyModifiers::SHIFT) == mods.difference(KeyModifiers::SHIFT)
        }
        _ => key_event.modifiers == *mods,
    }
}

pub fn on_key(app: &mut App, key_event: KeyEvent) {
    if app.show_keybindings_modal {
        if key_matches(app, "help", &key_event) || key_event.code == KeyCode::Esc {
            app.show_keybindings_modal = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode_key(app, key_event),
        InputMode::FilterForm => handle_filter_form_key(app, key_event),
        InputMode::ConfigForm => handle_config_form_key(app, key_event),
    }
}

fn move_up(app: &mut App) {
    match app.active_view {
        AppView::Items => match app.listing.view() {
            ViewMode::Grid => app.listing.select_offset(-(app.grid_columns.max(1) as isize)),
            ViewMode::List => app.listing.select_previous(),
        },
        AppView::Queries => app.select_previous_query(),
        AppView::Logs => app.scroll_logs_up(),
        AppView::Dashboard | AppView::Config => {}
    }
}

fn move_down(app: &mut App) {
    match app.active_view {
        AppView::Items => match app.listing.view() {
            ViewMode::Grid => app.listing.select_offset(app.grid_columns.max(1) as isize),
            ViewMode::List => app.listing.select_next(),
        },
        AppView::Queries => app.select_next_query(),
        AppView::Logs => app.scroll_logs_down(),
        AppView::Dashboard | AppView::Config => {}
    }
}

fn handle_normal_mode_key(app: &mut App, key_event: KeyEvent) {
    if key_matches(app, "quit", &key_event) {
        app.should_quit = true;
    } else if key_matches(app, "help", &key_event) {
        app.show_keybindings_modal = true;
    } else if key_matches(app, "next_tab", &key_event) {
        app.active_view = app.active_view.next();
    } else if key_matches(app, "prev_tab", &key_event) {
        app.active_view = app.active_view.previous();
    } else if key_matches(app, "down", &key_event) || key_event.code == KeyCode::Char('j') {
        move_down(app);
    } else if key_matches(app, "up", &key_event) || key_event.code == KeyCode::Char('k') {
        move_up(app);
    } else if key_matches(app, "left", &key_event) || key_event.code == KeyCode::Char('h') {
        if app.active_view == AppView::Items && app.listing.view() == ViewMode::Grid {
            app.listing.select_offset(-1);
        }
    } else if key_matches(app, "right", &key_event) || key_event.code == KeyCode::Char('l') {
        if app.active_view == AppView::Items && app.listing.view() == ViewMode::Grid {
            app.listing.select_offset(1);
        }
    } else if key_matches(app, "enter", &key_event) {
        match app.active_view {
            AppView::Dashboard => app.active_view = AppView::Items,
            AppView::Config => app.open_config_form(),
            _ => {}
        }
    } else if key_matches(app, "filter", &key_event) {
        if matches!(app.active_view, AppView::Dashboard | AppView::Items) {
            app.active_view = AppView::Items;
            app.open_filter_form();
        }
    } else if key_matches(app, "toggle_view", &key_event) {
        if app.active_view == AppView::Items {
            app.listing.toggle_view();
        }
    } else if key_matches(app, "clear_filter", &key_event) {
        if matches!(app.active_view, AppView::Dashboard | AppView::Items) {
            app.clear_filter();
        }
    } else if key_matches(app, "refresh", &key_event) {
        if app.event_sender.send(AppEvent::ReloadItems).is_err() {
            warn!("Event loop is gone; refresh ignored");
        }
    }
}

fn handle_filter_form_key(app: &mut App, key_event: KeyEvent) {
    let form = &mut app.filter_form;
    match key_event.code {
        KeyCode::Enter => app.apply_filter_form(),
        KeyCode::Esc => {
            form.error = None;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            form.active_idx = (form.active_idx + 1) % FilterForm::FIELD_COUNT;
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.active_idx = (form.active_idx + FilterForm::FIELD_COUNT - 1) % FilterForm::FIELD_COUNT;
        }
        KeyCode::Backspace => {
            form.active_field_mut().pop();
        }
        KeyCode::Char(c) => form.active_field_mut().push(c),
        _ => {}
    }
}

fn handle_config_form_key(app: &mut App, key_event: KeyEvent) {
    let form = &mut app.config_form;
    match key_event.code {
        KeyCode::Enter => app.save_config_form(),
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Tab | KeyCode::Down => {
            form.active_idx = (form.active_idx + 1) % ConfigForm::FIELD_COUNT;
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.active_idx = (form.active_idx + ConfigForm::FIELD_COUNT - 1) % ConfigForm::FIELD_COUNT;
        }
        KeyCode::Backspace => {
            form.active_field_mut().pop();
        }
        KeyCode::Char(c) => form.active_field_mut().push(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::test_app;

    fn press(app: &mut App, code: KeyCode) {
        on_key(app, KeyEvent::new(code, KeyModifiers::empty()));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn tab_cycles_views() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_view, AppView::Items);
        on_key(&mut app, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        on_key(&mut app, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(app.active_view, AppView::Logs);
    }

    #[test]
    fn filter_form_applies_brand_filter() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.input_mode, InputMode::FilterForm);
        assert_eq!(app.active_view, AppView::Items);
        type_text(&mut app, "NIKE");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.listing.visible_len(), 1);
        assert_eq!(app.listing.selected_item().unwrap().id, "a");
    }

    #[test]
    fn filter_form_typing_goes_to_active_field() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "60");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1x0");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "00");
        assert_eq!(app.filter_form.min, "60");
        assert_eq!(app.filter_form.max, "100");
        press(&mut app, KeyCode::Enter);
        let ids: Vec<&str> = app.listing.visible_items().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["c"]);
    }

    #[test]
    fn escape_cancels_filter_form() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('f'));
        type_text(&mut app, "zara");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.listing.visible_len(), 3);
    }

    #[test]
    fn toggle_and_clear_on_items_view() {
        let mut app = test_app();
        let mut rx = app.event_receiver.take().unwrap();
        app.active_view = AppView::Items;
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.listing.view(), ViewMode::List);
        assert_eq!(app.listing.total_len(), 3);
        assert_eq!(app.listing.visible_len(), 3);
        assert!(rx.try_recv().is_err());
        app.listing
            .set_filter(crate::filter::FilterState::from_input("zara", "", "").unwrap());
        press(&mut app, KeyCode::Char('c'));
        assert!(app.listing.filter().is_unrestricted());
        assert_eq!(app.listing.view(), ViewMode::List);
    }

    #[test]
    fn grid_navigation_moves_by_rows() {
        let mut app = test_app();
        app.active_view = AppView::Items;
        app.grid_columns = 2;
        assert_eq!(app.listing.selected(), Some(0));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.listing.selected(), Some(2));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.listing.selected(), Some(1));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.listing.selected(), Some(0));
    }

    #[test]
    fn refresh_requests_reload() {
        let mut app = test_app();
        let mut rx = app.event_receiver.take().unwrap();
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(rx.try_recv().unwrap(), AppEvent::ReloadItems);
    }

    #[test]
    fn help_modal_swallows_keys_until_closed() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_keybindings_modal);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_keybindings_modal);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn config_form_edits_session_settings() {
        let mut app = test_app();
        app.active_view = AppView::Config;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::ConfigForm);
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "42");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.telegram.chat_id.as_deref(), Some("42"));
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
