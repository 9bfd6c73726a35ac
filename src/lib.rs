//! Diagram Engine - interactive diagrams for the network landing page
//!
//! ## Module Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        DOMAIN MODEL                          │
//! │  engine/    Widgets + pure derived views                     │
//! │    parity   ToggleParityWidget  (toggle → odd-count lights)  │
//! │    stage    CyclicStageWidget   (timer → stage mod N)        │
//! │    metric   MetricSelectorWidget (select → bar geometry)     │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     PRESENTATION LAYER                       │
//! │  tui/       Ratatui dashboard rendering the views            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`engine`] | Widget state, parity rule, stage cycle, bar geometry |
//! | [`config`] | Static tables (YAML), validation, defaults |
//! | [`tui`] | Terminal dashboard and ratatui widgets |
//! | [`util`] | Number formatting |
//! | [`error`] | Error types with fix suggestions |

// ═══════════════════════════════════════════════════════════════
// DOMAIN MODEL
// ═══════════════════════════════════════════════════════════════
pub mod engine;

// ═══════════════════════════════════════════════════════════════
// PRESENTATION
// ═══════════════════════════════════════════════════════════════
pub mod tui;
pub mod util;

// ═══════════════════════════════════════════════════════════════
// CROSS-CUTTING - Error handling, configuration
// ═══════════════════════════════════════════════════════════════
pub mod config;
pub mod error;

// ═══════════════════════════════════════════════════════════════
// PUBLIC API RE-EXPORTS
// ═══════════════════════════════════════════════════════════════

pub use config::DiagramConfig;
pub use engine::{
    BarGeometry, CyclicStageWidget, DerivedView, MetricKey, MetricSelectorWidget, MetricView,
    ParityView, StageCycle, StageView, ToggleParityWidget,
};
pub use error::{DiagramError, FixSuggestion, Result};
