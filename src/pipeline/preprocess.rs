//! Preprocessing pass
//!
//! Cleans every raw message and persists the reduced dataset: rows with no
//! raw text are dropped before cleaning, rows whose cleaned text comes out
//! empty are dropped after.

use std::path::Path;

use log::info;

use crate::models::error::Result;
use crate::pipeline::column;
use crate::pipeline::normalize::clean;

pub const PREPROCESSED_HEADER: [&str; 3] = ["Channel Title", "Channel Username", "cleaned_text"];

/// Transform the combined raw CSV into the preprocessed dataset.
/// Returns the number of rows kept.
pub fn preprocess(input: &Path, output: &Path) -> Result<u64> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();
    let title_idx = column(&headers, "Channel Title")?;
    let user_idx = column(&headers, "Channel Username")?;
    let text_idx = column(&headers, "Message Text")?;

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(&PREPROCESSED_HEADER)?;

    let mut kept = 0u64;
    for row in reader.records() {
        let row = row?;
        let raw = match row.get(text_idx) {
            Some(text) if !text.is_empty() => text,
            _ => continue,
        };
        let cleaned = clean(raw);
        if cleaned.is_empty() {
            continue;
        }
        writer.write_record(&[
            row.get(title_idx).unwrap_or(""),
            row.get(user_idx).unwrap_or(""),
            cleaned.as_str(),
        ])?;
        kept += 1;
    }
    writer.flush()?;
    info!(
        "Saved the final preprocessed data to: {} ({} rows)",
        output.display(),
        kept
    );
    Ok(kept)
}
