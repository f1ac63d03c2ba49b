//! Event handling for the TUI

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use super::app::App;

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Wait up to one tick for input and handle it
pub fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(POLL_TIMEOUT)? {
        handle_event(app, event::read()?);
    }
    Ok(())
}

pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(width, _) => app.resize(width),
        Event::FocusLost => app.focus_lost(),
        Event::FocusGained => app.focus_gained(),
        _ => {}
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Confirmation dialog swallows everything else
    if app.has_pending_delete() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.confirm_delete();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
        return;
    }

    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Navigation
        KeyCode::Char('l') | KeyCode::Right => {
            app.select_next();
        }
        KeyCode::Char('h') | KeyCode::Left => app.select_prev(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_down();
        }
        KeyCode::Char('k') | KeyCode::Up => app.select_up(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),

        // List actions
        KeyCode::Char('r') | KeyCode::F(5) => {
            app.refresh();
        }
        KeyCode::Char('m') => {
            app.request_load_more();
        }
        KeyCode::Char('D') | KeyCode::Delete => {
            app.request_delete();
        }

        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('t') => app.cycle_theme(),
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.has_pending_delete() || app.show_help {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollDown => {
            app.select_down();
        }
        MouseEventKind::ScrollUp => app.select_up(),
        MouseEventKind::Down(MouseButton::Left) => {
            app.select_at(mouse.column, mouse.row);
        }
        // Right click stands in for a long press
        MouseEventKind::Down(MouseButton::Right) => {
            if app.select_at(mouse.column, mouse.row) {
                app.request_delete();
            }
        }
        _ => {}
    }
}
