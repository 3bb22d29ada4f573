//! Output formatting for CLI results.

pub mod json;
pub mod text;
