//! AppState - Domain Layer
//!
//! Holds the user-driven widgets and UI bookkeeping. The timer-driven stage
//! widget lives in the app itself because it needs the async runtime.

use crate::config::DiagramConfig;
use crate::engine::{MetricSelectorWidget, ToggleParityWidget};

// ─────────────────────────────────────────────────────────────────────────────
// Core State
// ─────────────────────────────────────────────────────────────────────────────

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub parity: ToggleParityWidget,
    pub metric: MetricSelectorWidget,

    // UI state
    pub focus: PanelFocus,
    /// Index into `element_ids` for keyboard toggling
    pub cursor: usize,
    pub element_ids: Vec<u8>,
    pub status: Option<String>,
    pub frame: u64,
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&DiagramConfig::default())
    }
}

impl AppState {
    pub fn new(config: &DiagramConfig) -> Self {
        let parity = ToggleParityWidget::new(&config.parity);
        let element_ids = parity.table().element_ids().collect();

        Self {
            parity,
            metric: MetricSelectorWidget::new(&config.metrics),
            focus: PanelFocus::Parity,
            cursor: 0,
            element_ids,
            status: None,
            frame: 0,
            should_quit: false,
        }
    }

    /// Advance the animation frame counter
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Element under the keyboard cursor
    pub fn cursor_element(&self) -> Option<u8> {
        self.element_ids.get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.element_ids.len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Toggle an element, recording a status line on rejection
    pub fn toggle_element(&mut self, id: u8) {
        match self.parity.toggle(id) {
            Ok(_) => {
                if let Some(pos) = self.element_ids.iter().position(|e| *e == id) {
                    self.cursor = pos;
                }
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Focus
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelFocus {
    Parity,
    Stage,
    Metric,
}

impl PanelFocus {
    pub fn next(&self) -> Self {
        match self {
            Self::Parity => Self::Stage,
            Self::Stage => Self::Metric,
            Self::Metric => Self::Parity,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Parity => Self::Metric,
            Self::Stage => Self::Parity,
            Self::Metric => Self::Stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles() {
        let mut focus = PanelFocus::Parity;
        for _ in 0..3 {
            focus = focus.next();
        }
        assert_eq!(focus, PanelFocus::Parity);
        assert_eq!(PanelFocus::Parity.prev(), PanelFocus::Metric);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut state = AppState::default();
        assert_eq!(state.cursor_element(), Some(0));
        state.move_cursor(-1);
        assert_eq!(state.cursor_element(), Some(4));
        state.move_cursor(1);
        assert_eq!(state.cursor_element(), Some(0));
    }

    #[test]
    fn test_rejected_toggle_sets_status() {
        let mut state = AppState::default();
        state.toggle_element(7);
        assert!(state.status.as_deref().unwrap().contains("DIAG-001"));
        assert!(state.parity.toggled().is_empty());

        state.toggle_element(3);
        assert!(state.status.is_none());
        assert_eq!(state.cursor_element(), Some(3));
    }
}
