use super::app_logic::TuiApp;
use super::app_state::AppMode;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn route_key(app: &mut TuiApp, key_event: KeyEvent) {
    match app.mode {
        AppMode::Browsing => app.handle_browsing_input(key_event),
        AppMode::EditingRoot => app.handle_root_input(key_event),
    }
}

/// Wait briefly for one terminal event and apply it. Returns whether the
/// screen needs to be redrawn.
pub(super) fn handle_events(app: &mut TuiApp) -> Result<bool> {
    if !event::poll(POLL_INTERVAL)? {
        return Ok(false);
    }
    match event::read()? {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            route_key(app, key_event);
            Ok(true)
        }
        Event::Resize(_, _) => Ok(true),
        _ => Ok(false),
    }
}
