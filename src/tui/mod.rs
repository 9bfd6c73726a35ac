//! TUI Module - Diagram Dashboard
//!
//! Terminal rendering of the three diagram widgets.
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        UI LAYER (widgets/)                          │
//! │  Pure rendering. No derivation logic. Receives engine views.        │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ ParityView / StageView / MetricView
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      DOMAIN LAYER (state.rs)                        │
//! │  AppState: parity + metric widgets, focus, cursor, status line.     │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ watch::Receiver<usize>
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       TIMER LAYER (engine)                          │
//! │  CyclicStageWidget mounted by TuiApp, unmounted on exit.            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;

pub mod widgets;

pub use app::{render_frame, TuiApp};
pub use events::Action;
pub use state::{AppState, PanelFocus};
pub use theme::{icons, CampusTheme};

use crate::config::DiagramConfig;

/// Run the TUI dashboard
pub async fn run(config: DiagramConfig) -> anyhow::Result<()> {
    let app = TuiApp::new(config);
    app.run().await
}
