use crate::utils::version::VERSION_STRING;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version = VERSION_STRING, about = "Telegram channel scraper and Amharic preprocessing pipeline")]
pub struct RunOptions {
    #[arg(short, long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: PipelineCommand,
}

#[derive(Subcommand)]
pub enum PipelineCommand {
    /// Scrape the configured channel list into the raw CSV
    Scrape,
    /// Combine per-run CSV exports into one raw dataset
    Merge {
        /// Only merge files whose names end with this suffix
        #[arg(long, default_value = "_data.csv")]
        suffix: String,
    },
    /// Clean raw message text and write the reduced dataset
    Preprocess,
    /// Export a fixed-seed sample of cleaned messages for labeling
    Sample {
        #[arg(short, long, default_value_t = 50)]
        n: usize,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
    },
}

impl RunOptions {
    pub fn new() -> Self {
        Self::parse()
    }
}
