//! Dataset merger
//!
//! Concatenates per-run CSV exports into one combined raw dataset. Row order
//! inside each source file is preserved; the order *across* files follows
//! filesystem discovery and callers must not rely on it.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::models::error::{PipelineError, Result};

/// Merge every CSV under `scrape_dir` (recursively) whose file name ends
/// with `suffix` into `out_path`. Returns the number of data rows written.
pub fn merge(scrape_dir: &Path, suffix: &str, out_path: &Path) -> Result<u64> {
    let mut files = Vec::new();
    if scrape_dir.is_dir() {
        discover(scrape_dir, suffix, &mut files)?;
    }
    if files.is_empty() {
        return Err(PipelineError::NoFilesFound(format!(
            "{}/**/*{}",
            scrape_dir.display(),
            suffix
        )));
    }
    info!("Found {} CSV files to merge.", files.len());

    let mut writer = csv::Writer::from_path(out_path)?;
    let mut header_written = false;
    let mut total = 0u64;
    for file in &files {
        let mut reader = csv::Reader::from_path(file)?;
        if !header_written {
            writer.write_record(reader.headers()?)?;
            header_written = true;
        }
        for row in reader.records() {
            writer.write_record(&row?)?;
            total += 1;
        }
    }
    writer.flush()?;
    info!(
        "Saved the combined raw data to: {} ({} rows)",
        out_path.display(),
        total
    );
    Ok(total)
}

fn discover(dir: &Path, suffix: &str, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    // sorted per directory so repeated runs see the same order
    entries.sort();
    for path in entries {
        if path.is_dir() {
            discover(&path, suffix, out)?;
        } else if path
            .file_name()
            .and_then(|f| f.to_str())
            .map(|f| f.ends_with(suffix))
            .unwrap_or(false)
        {
            out.push(path);
        }
    }
    Ok(())
}
