//! Diagram Engine
//!
//! Three independent widgets sharing one pattern: user input (or a timer)
//! mutates a small piece of owned state, and a render description is derived
//! from that state plus immutable configuration on every read.
//!
//! ```text
//! ┌──────────────┐   toggle/select/tick   ┌──────────────┐   view()   ┌────────────┐
//! │ static config│ ─────────────────────▶ │ widget state │ ─────────▶ │ *View      │
//! └──────────────┘                        └──────────────┘            │ (Serialize)│
//!                                                                     └────────────┘
//! ```
//!
//! | Widget | State | View |
//! |--------|-------|------|
//! | [`ToggleParityWidget`] | toggled element set | [`ParityView`] |
//! | [`CyclicStageWidget`] | stage counter (timer driven) | [`StageView`] |
//! | [`MetricSelectorWidget`] | selected metric | [`MetricView`] |

pub mod metric;
pub mod parity;
pub mod stage;

pub use metric::{BarGeometry, MetricKey, MetricOption, MetricSelectorWidget, MetricView};
pub use parity::{
    AdjacencyTable, ElementView, IndicatorCategory, IndicatorView, ParityView, ToggleParityWidget,
};
pub use stage::{
    ComponentView, CyclicStageWidget, StageComponent, StageCycle, StageTimer, StageView,
};

/// A widget whose render description is derived purely from its state
///
/// Implementations must not cache derived values: calling `view()` twice
/// without an intervening mutation yields equal output.
pub trait DerivedView {
    type View;

    fn view(&self) -> Self::View;
}
