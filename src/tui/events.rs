//! Event Handling - Keyboard input processing

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use super::state::{AppState, PanelFocus};
use crate::engine::MetricKey;

/// Actions that can be triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Toggle(u8),
    ResetGrid,
    SelectMetric(MetricKey),
    NextPanel,
    PrevPanel,
    None,
}

/// Handle keyboard events
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Action {
    // Global keybindings
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => return Action::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Action::Quit,

        (KeyModifiers::NONE, KeyCode::Tab) => {
            state.focus = state.focus.next();
            return Action::NextPanel;
        }
        (_, KeyCode::BackTab) => {
            state.focus = state.focus.prev();
            return Action::PrevPanel;
        }
        _ => {}
    }

    // Direct widget bindings (work from any panel)
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let id = c as u8 - b'0';
            state.toggle_element(id);
            return Action::Toggle(id);
        }
        KeyCode::Char('r') => {
            state.parity.reset();
            state.status = None;
            return Action::ResetGrid;
        }
        KeyCode::Char('c') => return select(state, MetricKey::Campuses),
        KeyCode::Char('f') => return select(state, MetricKey::Faculty),
        KeyCode::Char('s') => return select(state, MetricKey::Schools),
        _ => {}
    }

    // Panel-specific keybindings
    match (state.focus, key.code) {
        (PanelFocus::Parity, KeyCode::Left | KeyCode::Char('h')) => state.move_cursor(-1),
        (PanelFocus::Parity, KeyCode::Right | KeyCode::Char('l')) => state.move_cursor(1),
        (PanelFocus::Parity, KeyCode::Enter | KeyCode::Char(' ')) => {
            if let Some(id) = state.cursor_element() {
                state.toggle_element(id);
                return Action::Toggle(id);
            }
        }
        (PanelFocus::Metric, KeyCode::Left | KeyCode::Char('h')) => {
            let key = state.metric.selected().prev();
            return select(state, key);
        }
        (PanelFocus::Metric, KeyCode::Right | KeyCode::Char('l')) => {
            let key = state.metric.selected().next();
            return select(state, key);
        }
        // The stage panel is purely time-driven
        _ => {}
    }

    Action::None
}

fn select(state: &mut AppState, key: MetricKey) -> Action {
    state.metric.select(key);
    Action::SelectMetric(key)
}

/// Poll for keyboard events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            return Ok(Some(key));
        }
    }
    Ok(None)
}
