//! Toggle-Parity Grid
//!
//! Elements ("teaching modules") are toggled on and off by the user. Each
//! element influences an ordered list of indicators ("milestones"); an
//! indicator lights up iff an odd number of toggled elements influence it.
//!
//! ```text
//!   (0)────[P0]────(1)        toggled {0, 1}
//!    │              │           P0: 0,1   → 2 → off
//!  [T1]    (4)    [T2]          T1: 0     → 1 → on
//!    │              │           T2: 1     → 1 → on
//!   (2)────[P3]────(3)          P3: —     → 0 → off
//! ```
//!
//! The active set is recomputed from scratch on every read so it can never
//! drift from the toggled set.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::DerivedView;
use crate::config::{GridPosition, ParityConfig};
use crate::error::{DiagramError, Result};

/// Fixed sub-type of an indicator, never affected by toggling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    /// Category A
    Pedagogy,
    /// Category B
    Tech,
}

impl IndicatorCategory {
    /// Single-letter tag drawn inside the indicator
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pedagogy => "P",
            Self::Tech => "T",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pedagogy => "Pedagogy",
            Self::Tech => "Tech",
        }
    }
}

/// Element id → ordered indicator ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyTable {
    entries: BTreeMap<u8, Vec<u8>>,
    indicators: Vec<u8>,
}

impl AdjacencyTable {
    pub fn new(
        entries: impl IntoIterator<Item = (u8, Vec<u8>)>,
        indicators: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            indicators: indicators.into_iter().collect(),
        }
    }

    pub fn from_config(config: &ParityConfig) -> Self {
        Self::new(
            config
                .elements
                .iter()
                .map(|e| (e.id, e.influences.clone())),
            config.indicators.iter().map(|i| i.id),
        )
    }

    pub fn contains_element(&self, id: u8) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn element_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.keys().copied()
    }

    pub fn indicator_ids(&self) -> &[u8] {
        &self.indicators
    }

    pub fn influences(&self, element: u8) -> &[u8] {
        self.entries.get(&element).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of toggled elements whose entry lists `indicator`
    pub fn influence_count(&self, toggled: &BTreeSet<u8>, indicator: u8) -> usize {
        toggled
            .iter()
            .filter(|id| self.influences(**id).contains(&indicator))
            .count()
    }

    /// Indicators with an odd influence count, in indicator order
    pub fn active_indicators(&self, toggled: &BTreeSet<u8>) -> Vec<u8> {
        self.indicators
            .iter()
            .copied()
            .filter(|ind| self.influence_count(toggled, *ind) % 2 == 1)
            .collect()
    }
}

/// One element in the render description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementView {
    pub id: u8,
    pub toggled: bool,
    pub position: GridPosition,
}

/// One indicator in the render description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorView {
    pub id: u8,
    pub category: IndicatorCategory,
    pub active: bool,
    pub influence_count: usize,
    pub position: GridPosition,
}

/// Render description of the parity grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParityView {
    pub elements: Vec<ElementView>,
    pub indicators: Vec<IndicatorView>,
    pub active_count: usize,
    pub caption: String,
}

/// Parity grid widget state
#[derive(Debug, Clone)]
pub struct ToggleParityWidget {
    config: ParityConfig,
    table: AdjacencyTable,
    toggled: BTreeSet<u8>,
}

impl ToggleParityWidget {
    pub fn new(config: &ParityConfig) -> Self {
        Self {
            table: AdjacencyTable::from_config(config),
            config: config.clone(),
            toggled: BTreeSet::new(),
        }
    }

    /// Flip an element's membership in the toggled set
    ///
    /// Returns the element's new state. Unknown ids are rejected and leave
    /// the state untouched.
    pub fn toggle(&mut self, id: u8) -> Result<bool> {
        if !self.table.contains_element(id) {
            tracing::warn!(id, "rejected toggle of unknown element");
            return Err(DiagramError::UnknownElement {
                id,
                known: self
                    .table
                    .element_ids()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        let now_on = if self.toggled.remove(&id) {
            false
        } else {
            self.toggled.insert(id);
            true
        };
        tracing::debug!(id, toggled = now_on, "element toggled");
        Ok(now_on)
    }

    /// Clear every toggle (same state as a fresh mount)
    pub fn reset(&mut self) {
        self.toggled.clear();
    }

    pub fn is_toggled(&self, id: u8) -> bool {
        self.toggled.contains(&id)
    }

    pub fn toggled(&self) -> &BTreeSet<u8> {
        &self.toggled
    }

    pub fn table(&self) -> &AdjacencyTable {
        &self.table
    }

    pub fn active_indicators(&self) -> Vec<u8> {
        self.table.active_indicators(&self.toggled)
    }
}

impl DerivedView for ToggleParityWidget {
    type View = ParityView;

    fn view(&self) -> ParityView {
        let elements = self
            .config
            .elements
            .iter()
            .map(|e| ElementView {
                id: e.id,
                toggled: self.is_toggled(e.id),
                position: e.position,
            })
            .collect();

        let indicators: Vec<IndicatorView> = self
            .config
            .indicators
            .iter()
            .map(|i| {
                let influence_count = self.table.influence_count(&self.toggled, i.id);
                IndicatorView {
                    id: i.id,
                    category: i.category,
                    active: influence_count % 2 == 1,
                    influence_count,
                    position: i.position,
                }
            })
            .collect();

        let active_count = indicators.iter().filter(|i| i.active).count();
        let caption = if self.toggled.is_empty() {
            "Start your training.".to_string()
        } else {
            format!("Active progress in {} competency areas.", active_count)
        };

        ParityView {
            elements,
            indicators,
            active_count,
            caption,
        }
    }
}
