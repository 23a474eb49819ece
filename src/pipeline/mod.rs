pub mod merge;
pub mod normalize;
pub mod preprocess;
pub mod sample;

use crate::models::error::{PipelineError, Result};

/// Index of a named column, tolerating padded headers.
pub(crate) fn column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| PipelineError::Config(format!("input CSV has no '{}' column", name)))
}
