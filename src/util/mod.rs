//! Utilities Module - shared helpers
//!
//! - `format`: Number formatting for display (thousands grouping)

pub mod format;

pub use format::format_number;
