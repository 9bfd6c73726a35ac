//! Error types with fix suggestions
//!
//! Error code ranges:
//! - DIAG-000-009: Contract violations (ids or keys outside the configured domain)
//! - DIAG-010-019: Configuration errors
//! - DIAG-020-029: Terminal errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiagramError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
#[derive(Error, Debug)]
pub enum DiagramError {
    // ─────────────────────────────────────────────────────────────
    // Contract violations (DIAG-001 to DIAG-003)
    // ─────────────────────────────────────────────────────────────
    #[error("[DIAG-001] Unknown element id {id} (known: {known})")]
    UnknownElement { id: u8, known: String },

    #[error("[DIAG-002] Unknown metric key '{key}'")]
    UnknownMetric { key: String },

    #[error("[DIAG-003] Stage {stage} is out of range (stage count: {count})")]
    StageOutOfRange { stage: usize, count: usize },

    // ─────────────────────────────────────────────────────────────
    // Configuration errors (DIAG-010 to DIAG-012)
    // ─────────────────────────────────────────────────────────────
    #[error("[DIAG-010] Failed to read config '{path}': {reason}")]
    ConfigRead { path: String, reason: String },

    #[error("[DIAG-011] Failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("[DIAG-012] Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // ─────────────────────────────────────────────────────────────
    // Terminal errors (DIAG-020)
    // ─────────────────────────────────────────────────────────────
    #[error("[DIAG-020] Terminal error: {reason}")]
    TuiError { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiagramError {
    /// Error code (e.g. "DIAG-001") for programmatic matching
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownElement { .. } => "DIAG-001",
            Self::UnknownMetric { .. } => "DIAG-002",
            Self::StageOutOfRange { .. } => "DIAG-003",
            Self::ConfigRead { .. } => "DIAG-010",
            Self::ConfigParse(_) => "DIAG-011",
            Self::InvalidConfig { .. } => "DIAG-012",
            Self::TuiError { .. } => "DIAG-020",
            Self::Io(_) => "DIAG-029",
        }
    }

    /// True for errors caused by input outside the configured domain
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::UnknownElement { .. } | Self::UnknownMetric { .. } | Self::StageOutOfRange { .. }
        )
    }
}

impl FixSuggestion for DiagramError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            DiagramError::UnknownElement { .. } => {
                Some("Use one of the element ids listed in the adjacency table")
            }
            DiagramError::UnknownMetric { .. } => Some("Use one of: campuses, faculty, schools"),
            DiagramError::StageOutOfRange { .. } => {
                Some("Stage ordinals start at 0 and stay below the stage count")
            }
            DiagramError::ConfigRead { .. } => Some("Check the config path and permissions"),
            DiagramError::ConfigParse(_) => Some("Check YAML syntax: indentation and quoting"),
            DiagramError::InvalidConfig { .. } => {
                Some("Run `diagrams config --dump` to see a valid configuration")
            }
            DiagramError::TuiError { .. } => Some("Run inside an interactive terminal"),
            DiagramError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
