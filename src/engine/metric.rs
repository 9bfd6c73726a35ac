//! Metric Selector Bar Chart
//!
//! The user picks one of a fixed set of network metrics; the chart shows the
//! prior and current period as two bars scaled against `current × 1.2`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DerivedView;
use crate::config::{MetricConfig, MetricSeries};
use crate::error::{DiagramError, Result};
use crate::util::format_number;

/// Headroom above the current value on the chart scale
pub const SCALE_HEADROOM: f64 = 1.2;

/// Smallest current-bar height, as a fraction of the chart height
pub const MIN_BAR_FRACTION: f64 = 0.01;

/// Closed set of metric keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Campuses,
    Faculty,
    Schools,
}

impl MetricKey {
    pub const ALL: [MetricKey; 3] = [Self::Campuses, Self::Faculty, Self::Schools];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Campuses => "campuses",
            Self::Faculty => "faculty",
            Self::Schools => "schools",
        }
    }

    fn position(&self) -> usize {
        match self {
            Self::Campuses => 0,
            Self::Faculty => 1,
            Self::Schools => 2,
        }
    }

    /// Next key, wrapping
    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous key, wrapping
    pub fn prev(&self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = DiagramError;

    /// Accepts the key name (any case) or its ordinal (`0`, `1`, `2`)
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "campuses" | "0" => Ok(Self::Campuses),
            "faculty" | "1" => Ok(Self::Faculty),
            "schools" | "2" => Ok(Self::Schools),
            _ => Err(DiagramError::UnknownMetric { key: s.to_string() }),
        }
    }
}

/// Bar heights as fractions of the chart height
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarGeometry {
    /// `current × 1.2`; `None` when the current value is not positive
    pub max_scale: Option<f64>,
    pub prior_fraction: f64,
    pub current_fraction: f64,
}

impl BarGeometry {
    pub fn compute(prior: f64, current: f64) -> Self {
        if !current.is_finite() || current <= 0.0 {
            // No scale to divide by: flat prior bar, floor-height current bar
            return Self {
                max_scale: None,
                prior_fraction: 0.0,
                current_fraction: MIN_BAR_FRACTION,
            };
        }

        let max_scale = current * SCALE_HEADROOM;
        Self {
            max_scale: Some(max_scale),
            prior_fraction: prior / max_scale,
            current_fraction: (current / max_scale).max(MIN_BAR_FRACTION),
        }
    }
}

/// One selector button in the render description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricOption {
    pub key: MetricKey,
    pub label: String,
    pub selected: bool,
}

/// Render description of the bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricView {
    pub selected: MetricKey,
    pub label: String,
    pub prior_period: String,
    pub current_period: String,
    pub prior_value: f64,
    pub current_value: f64,
    pub prior_display: String,
    pub current_display: String,
    pub geometry: BarGeometry,
    pub options: Vec<MetricOption>,
}

/// Metric selector widget state
#[derive(Debug, Clone)]
pub struct MetricSelectorWidget {
    config: MetricConfig,
    selected: MetricKey,
}

impl MetricSelectorWidget {
    pub fn new(config: &MetricConfig) -> Self {
        Self {
            selected: config.default,
            config: config.clone(),
        }
    }

    pub fn selected(&self) -> MetricKey {
        self.selected
    }

    pub fn select(&mut self, key: MetricKey) {
        if key != self.selected {
            tracing::debug!(from = %self.selected, to = %key, "metric selected");
        }
        self.selected = key;
    }

    /// Parse and select; unknown keys leave the selection unchanged
    pub fn select_str(&mut self, key: &str) -> Result<MetricKey> {
        match key.parse::<MetricKey>() {
            Ok(parsed) => {
                self.select(parsed);
                Ok(parsed)
            }
            Err(e) => {
                tracing::warn!(key, "rejected unknown metric key");
                Err(e)
            }
        }
    }

    pub fn select_next(&mut self) -> MetricKey {
        self.select(self.selected.next());
        self.selected
    }

    pub fn select_prev(&mut self) -> MetricKey {
        self.select(self.selected.prev());
        self.selected
    }

    /// Series for the current selection
    pub fn series(&self) -> Option<&MetricSeries> {
        self.config.series(self.selected)
    }

    pub fn bar_geometry(&self) -> BarGeometry {
        match self.series() {
            Some(s) => BarGeometry::compute(s.prior, s.current),
            None => BarGeometry::compute(0.0, 0.0),
        }
    }
}

impl DerivedView for MetricSelectorWidget {
    type View = MetricView;

    fn view(&self) -> MetricView {
        let (label, prior, current) = match self.series() {
            Some(s) => (s.label.clone(), s.prior, s.current),
            None => (self.selected.to_string(), 0.0, 0.0),
        };

        let options = MetricKey::ALL
            .iter()
            .map(|key| MetricOption {
                key: *key,
                label: self
                    .config
                    .series(*key)
                    .map(|s| s.short_label.clone())
                    .unwrap_or_else(|| key.to_string()),
                selected: *key == self.selected,
            })
            .collect();

        MetricView {
            selected: self.selected,
            label,
            prior_period: self.config.prior_period.clone(),
            current_period: self.config.current_period.clone(),
            prior_value: prior,
            current_value: current,
            prior_display: format_number(prior),
            current_display: format_number(current),
            geometry: self.bar_geometry(),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_default_selection_is_faculty() {
        let widget = MetricSelectorWidget::new(&MetricConfig::default());
        assert_eq!(widget.selected(), MetricKey::Faculty);
    }

    #[test]
    fn test_faculty_geometry() {
        let widget = MetricSelectorWidget::new(&MetricConfig::default());
        let geo = widget.bar_geometry();
        assert_eq!(geo.max_scale, Some(3000.0));
        assert!(approx(geo.prior_fraction, 0.667));
        assert!(approx(geo.current_fraction, 0.833));
    }

    #[test]
    fn test_current_fraction_is_constant_for_positive_values() {
        // current / (current × 1.2) never depends on the value
        for key in MetricKey::ALL {
            let mut widget = MetricSelectorWidget::new(&MetricConfig::default());
            widget.select(key);
            assert!(approx(widget.bar_geometry().current_fraction, 1.0 / 1.2));
        }
    }

    #[test]
    fn test_zero_current_is_guarded() {
        let geo = BarGeometry::compute(10.0, 0.0);
        assert_eq!(geo.max_scale, None);
        assert_eq!(geo.prior_fraction, 0.0);
        assert_eq!(geo.current_fraction, MIN_BAR_FRACTION);

        let geo = BarGeometry::compute(10.0, -5.0);
        assert_eq!(geo.max_scale, None);
    }

    #[test]
    fn test_switch_and_back_is_identical() {
        let mut widget = MetricSelectorWidget::new(&MetricConfig::default());
        let before = widget.view();
        widget.select(MetricKey::Schools);
        assert_ne!(widget.view(), before);
        widget.select(MetricKey::Faculty);
        assert_eq!(widget.view(), before);
    }

    #[test]
    fn test_unknown_key_does_not_mutate() {
        let mut widget = MetricSelectorWidget::new(&MetricConfig::default());
        widget.select(MetricKey::Campuses);
        let err = widget.select_str("alumni").unwrap_err();
        assert_eq!(err.code(), "DIAG-002");
        assert_eq!(widget.selected(), MetricKey::Campuses);
    }

    #[test]
    fn test_select_str_accepts_names_and_ordinals() {
        let mut widget = MetricSelectorWidget::new(&MetricConfig::default());
        assert_eq!(widget.select_str("Schools").unwrap(), MetricKey::Schools);
        assert_eq!(widget.select_str("0").unwrap(), MetricKey::Campuses);
        assert_eq!(widget.selected(), MetricKey::Campuses);
    }

    #[test]
    fn test_next_prev_wrap() {
        assert_eq!(MetricKey::Schools.next(), MetricKey::Campuses);
        assert_eq!(MetricKey::Campuses.prev(), MetricKey::Schools);
        assert_eq!(MetricKey::Faculty.next().prev(), MetricKey::Faculty);
    }

    #[test]
    fn test_view_formats_values() {
        let widget = MetricSelectorWidget::new(&MetricConfig::default());
        let view = widget.view();
        assert_eq!(view.label, "Faculty Trained");
        assert_eq!(view.prior_display, "2,000");
        assert_eq!(view.current_display, "2,500");
        assert_eq!(view.prior_period, "2024");
        assert_eq!(view.current_period, "2025");

        let selected: Vec<_> = view.options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "Faculty");
    }

    #[test]
    fn test_missing_series_renders_empty_chart() {
        let mut config = MetricConfig::default();
        config.series.retain(|s| s.key != MetricKey::Faculty);
        let widget = MetricSelectorWidget::new(&config);
        let view = widget.view();
        assert_eq!(view.geometry.max_scale, None);
        assert_eq!(view.label, "faculty");
    }
}
