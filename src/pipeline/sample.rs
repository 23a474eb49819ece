//! Sampler/exporter
//!
//! Draws a fixed-seed uniform sample of cleaned messages and writes them as
//! a plain-text labeling file, one message per line. Embedded newlines are
//! not escaped, so multi-line messages corrupt the line-based format; the
//! normalizer's whitespace collapse prevents that for its own output.

use std::fs;
use std::path::Path;

use log::info;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::models::error::{PipelineError, Result};
use crate::pipeline::column;

/// Export `n` sampled cleaned messages from the preprocessed CSV.
///
/// The same input, `n` and `seed` always produce a byte-identical file.
pub fn export_sample(input: &Path, output: &Path, n: usize, seed: u64) -> Result<()> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();
    let text_idx = column(&headers, "cleaned_text")?;

    let mut messages = Vec::new();
    for row in reader.records() {
        let row = row?;
        // defensive: preprocessed data should have no empty cells here
        if let Some(text) = row.get(text_idx) {
            if !text.is_empty() {
                messages.push(text.to_string());
            }
        }
    }

    if messages.len() < n {
        return Err(PipelineError::InsufficientRows {
            wanted: n,
            available: messages.len(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::new();
    for i in index::sample(&mut rng, messages.len(), n).iter() {
        out.push_str(&messages[i]);
        out.push('\n');
    }
    fs::write(output, out)?;
    info!(
        "Exported {} sample messages to '{}'",
        n,
        output.display()
    );
    Ok(())
}
