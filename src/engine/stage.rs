//! Cyclic Stage Indicator
//!
//! A certification pathway (Syllabus → Training → Qualified) that advances on
//! its own every interval and wraps around forever.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CyclicStageWidget                                          │
//! │  ├── StageTimer (tokio interval task + CancellationToken)   │
//! │  │     tick → StageCycle::advance() → watch::Sender<usize>  │
//! │  └── watch::Receiver<usize> → view()                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The timer is an owned resource: dropping the widget (or calling
//! [`CyclicStageWidget::unmount`]) cancels it, so no tick can fire after
//! teardown.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::DerivedView;
use crate::config::{StageConfig, StageSpec};
use crate::error::{DiagramError, Result};

/// The three boxes of the pathway diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageComponent {
    Syllabus,
    Training,
    Qualified,
}

impl StageComponent {
    pub const ALL: [StageComponent; 3] = [Self::Syllabus, Self::Training, Self::Qualified];

    /// Arrows between neighbouring components
    pub const CONNECTORS: usize = Self::ALL.len() - 1;

    pub fn label(&self) -> &'static str {
        match self {
            Self::Syllabus => "Syllabus",
            Self::Training => "Training",
            Self::Qualified => "Qualified",
        }
    }
}

/// One pathway box in the render description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentView {
    pub component: StageComponent,
    pub label: &'static str,
    pub highlighted: bool,
}

/// Render description of the stage indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageView {
    pub index: usize,
    pub count: usize,
    pub label: String,
    pub icon: String,
    pub scanning: bool,
    pub components: Vec<ComponentView>,
    /// Lit state per connector, left to right
    pub connectors: Vec<bool>,
    /// Progress dots, one per stage; `true` marks the current one
    pub dots: Vec<bool>,
}

/// Pure view derivation shared by [`StageCycle`] and [`CyclicStageWidget`]
fn render_stage(stages: &[StageSpec], index: usize) -> StageView {
    let spec = &stages[index];

    StageView {
        index,
        count: stages.len(),
        label: spec.label.clone(),
        icon: spec.icon.clone(),
        scanning: spec.scanning,
        components: StageComponent::ALL
            .iter()
            .map(|c| ComponentView {
                component: *c,
                label: c.label(),
                highlighted: spec.focus == *c,
            })
            .collect(),
        connectors: (0..StageComponent::CONNECTORS)
            .map(|i| i < spec.lit_connectors)
            .collect(),
        dots: (0..stages.len()).map(|i| i == index).collect(),
    }
}

// ═══════════════════════════════════════════
// PURE STATE MACHINE
// ═══════════════════════════════════════════

/// Bounded stage counter: `0 <= current < len`, advanced modulo `len`
#[derive(Debug, Clone)]
pub struct StageCycle {
    stages: Vec<StageSpec>,
    current: usize,
}

impl StageCycle {
    /// Start at stage 0
    ///
    /// Empty stage tables and a zero interval are rejected.
    pub fn new(config: &StageConfig) -> Result<Self> {
        Self::at(config, 0)
    }

    /// Start at an arbitrary stage (used to render a single frame)
    pub fn at(config: &StageConfig, stage: usize) -> Result<Self> {
        config.validate()?;
        if stage >= config.stages.len() {
            return Err(DiagramError::StageOutOfRange {
                stage,
                count: config.stages.len(),
            });
        }
        Ok(Self {
            stages: config.stages.clone(),
            current: stage,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Move to the next stage, wrapping to 0 after the last
    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.stages.len();
        self.current
    }
}

impl DerivedView for StageCycle {
    type View = StageView;

    fn view(&self) -> StageView {
        render_stage(&self.stages, self.current)
    }
}

// ═══════════════════════════════════════════
// TIMER
// ═══════════════════════════════════════════

/// Cancellable repeating timer bound to its owner's lifetime
///
/// The first tick fires one full `period` after start. Ticks run sequentially
/// on a single task, so they never overlap.
pub struct StageTimer {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl StageTimer {
    /// Spawn the ticking task on the current tokio runtime
    ///
    /// A zero period is rejected before anything is spawned.
    pub fn start<F>(period: Duration, mut on_tick: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        if period.is_zero() {
            return Err(DiagramError::InvalidConfig {
                reason: "stage timer period must be greater than 0".to_string(),
            });
        }

        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => on_tick(),
                }
            }
            tracing::trace!("stage timer stopped");
        });

        Ok(Self {
            cancel,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel and wait for the task to finish
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    tracing::error!("stage timer task panicked: {}", e);
                }
            }
        }
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

// ═══════════════════════════════════════════
// MOUNTED WIDGET
// ═══════════════════════════════════════════

/// Timer-driven stage widget
///
/// Must be mounted inside a tokio runtime. Each instance owns its own timer
/// and counter.
pub struct CyclicStageWidget {
    stages: Vec<StageSpec>,
    interval: Duration,
    rx: watch::Receiver<usize>,
    timer: StageTimer,
}

impl CyclicStageWidget {
    /// Start at stage 0 and begin ticking
    ///
    /// The stage table is validated first; nothing is spawned on error.
    pub fn mount(config: &StageConfig) -> Result<Self> {
        let interval = Duration::from_millis(config.interval_ms);
        let mut cycle = StageCycle::new(config)?;
        let (tx, rx) = watch::channel(cycle.current());

        let timer = StageTimer::start(interval, move || {
            let next = cycle.advance();
            tracing::trace!(stage = next, "stage advanced");
            tx.send_replace(next);
        })?;

        tracing::info!(
            stages = config.stages.len(),
            interval_ms = config.interval_ms,
            "stage widget mounted"
        );

        Ok(Self {
            stages: config.stages.clone(),
            interval,
            rx,
            timer,
        })
    }

    pub fn current(&self) -> usize {
        *self.rx.borrow()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Receiver that observes every stage change
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.rx.clone()
    }

    /// Stop the timer and wait for it to wind down
    pub async fn unmount(self) {
        let Self { timer, .. } = self;
        timer.stop().await;
        tracing::info!("stage widget unmounted");
    }
}

impl DerivedView for CyclicStageWidget {
    type View = StageView;

    fn view(&self) -> StageView {
        render_stage(&self.stages, self.current())
    }
}
