//! Diagram Configuration Module
//!
//! Static tables for the three widgets: the module/milestone adjacency grid,
//! the certification stage table and the network metric series.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Explicit path (`--config FILE`)
//! 2. Environment variable (`DIAGRAMS_CONFIG`)
//! 3. Built-in defaults (the dataset shipped with the page)
//!
//! Configuration is immutable once a widget is constructed from it.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::metric::MetricKey;
use crate::engine::parity::IndicatorCategory;
use crate::engine::stage::StageComponent;
use crate::error::{DiagramError, Result};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "DIAGRAMS_CONFIG";

/// Default stage interval (ms)
pub const DEFAULT_STAGE_INTERVAL_MS: u64 = 2000;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiagramConfig {
    #[serde(default)]
    pub parity: ParityConfig,

    #[serde(default)]
    pub stages: StageConfig,

    #[serde(default)]
    pub metrics: MetricConfig,
}

// ═══════════════════════════════════════════
// PARITY GRID
// ═══════════════════════════════════════════

/// Position inside the widget box, in percent of width/height
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridPosition {
    pub x: u8,
    pub y: u8,
}

impl GridPosition {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// A toggleable element and the indicators it influences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementSpec {
    pub id: u8,
    pub position: GridPosition,
    /// Ordered indicator ids (the element's adjacency entry)
    pub influences: Vec<u8>,
}

/// A derived indicator with its fixed category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorSpec {
    pub id: u8,
    pub category: IndicatorCategory,
    pub position: GridPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParityConfig {
    pub elements: Vec<ElementSpec>,
    pub indicators: Vec<IndicatorSpec>,
}

impl Default for ParityConfig {
    fn default() -> Self {
        let element = |id, x, y, influences: &[u8]| ElementSpec {
            id,
            position: GridPosition::new(x, y),
            influences: influences.to_vec(),
        };
        let indicator = |id, category, x, y| IndicatorSpec {
            id,
            category,
            position: GridPosition::new(x, y),
        };

        Self {
            elements: vec![
                element(0, 20, 20, &[0, 1]),
                element(1, 80, 20, &[0, 2]),
                element(2, 20, 80, &[1, 3]),
                element(3, 80, 80, &[2, 3]),
                // Centre module touches every milestone
                element(4, 50, 50, &[0, 1, 2, 3]),
            ],
            indicators: vec![
                indicator(0, IndicatorCategory::Pedagogy, 50, 20),
                indicator(1, IndicatorCategory::Tech, 20, 50),
                indicator(2, IndicatorCategory::Tech, 80, 50),
                indicator(3, IndicatorCategory::Pedagogy, 50, 80),
            ],
        }
    }
}

// ═══════════════════════════════════════════
// STAGE CYCLE
// ═══════════════════════════════════════════

/// Static display configuration for one stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageSpec {
    pub label: String,
    /// Style token; renderers map it to a glyph or icon
    pub icon: String,
    /// Component highlighted while this stage is current
    pub focus: StageComponent,
    /// Scanning-line effect on the focused component
    #[serde(default)]
    pub scanning: bool,
    /// Number of connectors lit, counted from the left
    #[serde(default)]
    pub lit_connectors: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    pub stages: Vec<StageSpec>,
}

fn default_interval_ms() -> u64 {
    DEFAULT_STAGE_INTERVAL_MS
}

impl Default for StageConfig {
    fn default() -> Self {
        let stage = |label: &str, icon: &str, focus, scanning, lit_connectors| StageSpec {
            label: label.to_string(),
            icon: icon.to_string(),
            focus,
            scanning,
            lit_connectors,
        };

        Self {
            interval_ms: DEFAULT_STAGE_INTERVAL_MS,
            stages: vec![
                stage("Syllabus", "grid", StageComponent::Syllabus, false, 0),
                stage("Training", "book", StageComponent::Training, true, 1),
                stage("Training", "book", StageComponent::Training, false, 1),
                stage("Qualified", "award", StageComponent::Qualified, false, 2),
            ],
        }
    }
}

// ═══════════════════════════════════════════
// METRIC SERIES
// ═══════════════════════════════════════════

/// Prior/current values for one metric
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSeries {
    pub key: MetricKey,
    pub prior: f64,
    pub current: f64,
    /// Full label shown on the chart
    pub label: String,
    /// Button label
    pub short_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricConfig {
    #[serde(default = "default_metric")]
    pub default: MetricKey,
    pub prior_period: String,
    pub current_period: String,
    pub series: Vec<MetricSeries>,
}

fn default_metric() -> MetricKey {
    MetricKey::Faculty
}

impl Default for MetricConfig {
    fn default() -> Self {
        let series = |key, prior, current, label: &str, short_label: &str| MetricSeries {
            key,
            prior,
            current,
            label: label.to_string(),
            short_label: short_label.to_string(),
        };

        Self {
            default: MetricKey::Faculty,
            prior_period: "2024".to_string(),
            current_period: "2025".to_string(),
            series: vec![
                series(MetricKey::Campuses, 12.0, 16.0, "Campuses", "Campuses"),
                series(MetricKey::Faculty, 2000.0, 2500.0, "Faculty Trained", "Faculty"),
                series(MetricKey::Schools, 30.0, 45.0, "Partner Schools", "Schools"),
            ],
        }
    }
}

// ═══════════════════════════════════════════
// LOADING + VALIDATION
// ═══════════════════════════════════════════

impl DiagramConfig {
    /// Resolve the config path from an explicit flag or the environment
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        std::env::var(CONFIG_ENV_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// Load configuration, falling back to defaults when no path is given
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::from_file(&path),
            None => {
                tracing::debug!("no config file given, using built-in dataset");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a YAML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| DiagramError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(path = %path.display(), "loaded diagram config");
        Ok(config)
    }

    /// Parse and validate YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every cross-table constraint
    pub fn validate(&self) -> Result<()> {
        self.parity.validate()?;
        self.stages.validate()?;
        self.metrics.validate()
    }
}

fn invalid(reason: impl Into<String>) -> DiagramError {
    DiagramError::InvalidConfig {
        reason: reason.into(),
    }
}

fn check_position(what: &str, id: u8, pos: GridPosition) -> Result<()> {
    if pos.x > 100 || pos.y > 100 {
        return Err(invalid(format!(
            "{} {} position ({}, {}) is outside 0..=100",
            what, id, pos.x, pos.y
        )));
    }
    Ok(())
}

impl ParityConfig {
    fn validate(&self) -> Result<()> {
        if self.elements.is_empty() {
            return Err(invalid("parity grid needs at least one element"));
        }

        let mut indicator_ids = BTreeSet::new();
        for indicator in &self.indicators {
            if !indicator_ids.insert(indicator.id) {
                return Err(invalid(format!("duplicate indicator id {}", indicator.id)));
            }
            check_position("indicator", indicator.id, indicator.position)?;
        }

        let mut element_ids = BTreeSet::new();
        for element in &self.elements {
            if !element_ids.insert(element.id) {
                return Err(invalid(format!("duplicate element id {}", element.id)));
            }
            check_position("element", element.id, element.position)?;

            let mut seen = BTreeSet::new();
            for target in &element.influences {
                if !indicator_ids.contains(target) {
                    return Err(invalid(format!(
                        "element {} influences unknown indicator {}",
                        element.id, target
                    )));
                }
                // Repeated entries are ambiguous
                if !seen.insert(*target) {
                    return Err(invalid(format!(
                        "element {} lists indicator {} more than once",
                        element.id, target
                    )));
                }
            }
        }
        Ok(())
    }
}

impl StageConfig {
    /// Reject tables the stage widget cannot cycle through
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(invalid("stage table needs at least one stage"));
        }
        if self.interval_ms == 0 {
            return Err(invalid("stage interval must be greater than 0 ms"));
        }
        for (idx, stage) in self.stages.iter().enumerate() {
            if stage.lit_connectors > StageComponent::CONNECTORS {
                return Err(invalid(format!(
                    "stage {} lights {} connectors (max {})",
                    idx,
                    stage.lit_connectors,
                    StageComponent::CONNECTORS
                )));
            }
        }
        Ok(())
    }
}

impl MetricConfig {
    fn validate(&self) -> Result<()> {
        for key in MetricKey::ALL {
            let count = self.series.iter().filter(|s| s.key == key).count();
            if count != 1 {
                return Err(invalid(format!(
                    "metric '{}' must appear exactly once (found {})",
                    key, count
                )));
            }
        }
        for series in &self.series {
            if !series.current.is_finite() || series.current <= 0.0 {
                return Err(invalid(format!(
                    "metric '{}' current value must be positive (got {})",
                    series.key, series.current
                )));
            }
            if !series.prior.is_finite() || series.prior < 0.0 {
                return Err(invalid(format!(
                    "metric '{}' prior value must be non-negative (got {})",
                    series.key, series.prior
                )));
            }
        }
        Ok(())
    }

    /// Lookup a series by key
    pub fn series(&self, key: MetricKey) -> Option<&MetricSeries> {
        self.series.iter().find(|s| s.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        DiagramConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_dataset_matches_page() {
        let config = DiagramConfig::default();
        assert_eq!(config.parity.elements.len(), 5);
        assert_eq!(config.parity.indicators.len(), 4);
        assert_eq!(config.parity.elements[4].influences, vec![0, 1, 2, 3]);
        assert_eq!(config.stages.stages.len(), 4);
        assert_eq!(config.stages.interval_ms, 2000);
        let labels: Vec<&str> = config.stages.stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Syllabus", "Training", "Training", "Qualified"]);
        assert_eq!(config.metrics.default, MetricKey::Faculty);

        let faculty = config.metrics.series(MetricKey::Faculty).unwrap();
        assert_eq!(faculty.prior, 2000.0);
        assert_eq!(faculty.current, 2500.0);
        assert_eq!(faculty.label, "Faculty Trained");
    }

    #[test]
    fn test_yaml_roundtrip_preserves_config() {
        let config = DiagramConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = DiagramConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_indicator_rejected() {
        let mut config = DiagramConfig::default();
        config.parity.elements[0].influences.push(9);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unknown indicator 9"));
    }

    #[test]
    fn test_duplicate_adjacency_entry_rejected() {
        let mut config = DiagramConfig::default();
        config.parity.elements[1].influences = vec![0, 0];
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), "DIAG-012");
        assert!(err.to_string().contains("indicator 0 more than once"));
    }

    #[test]
    fn test_duplicate_element_rejected() {
        let mut config = DiagramConfig::default();
        config.parity.elements[1].id = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate element id 0"));
    }

    #[test]
    fn test_empty_stage_table_rejected() {
        let mut config = DiagramConfig::default();
        config.stages.stages.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = DiagramConfig::default();
        config.stages.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_current_rejected() {
        let mut config = DiagramConfig::default();
        config.metrics.series[0].current = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_missing_metric_rejected() {
        let mut config = DiagramConfig::default();
        config.metrics.series.pop();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("schools"));
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = "stages:\n  interval_ms: 500\n  stages:\n    - label: Only\n      icon: grid\n      focus: syllabus\n";
        let config = DiagramConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.stages.interval_ms, 500);
        assert_eq!(config.stages.stages.len(), 1);
        assert_eq!(config.parity, ParityConfig::default());
        assert_eq!(config.metrics, MetricConfig::default());
    }

    #[test]
    fn test_from_file_reads_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", DiagramConfig::default().to_yaml().unwrap()).unwrap();
        let config = DiagramConfig::from_file(file.path()).unwrap();
        assert_eq!(config, DiagramConfig::default());
    }

    #[test]
    fn test_missing_file_is_config_read_error() {
        let err = DiagramConfig::from_file(Path::new("/nonexistent/diagrams.yaml")).unwrap_err();
        assert_eq!(err.code(), "DIAG-010");
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("explicit.yaml");
        assert_eq!(
            DiagramConfig::resolve_path(Some(path)),
            Some(PathBuf::from("explicit.yaml"))
        );
    }
}
