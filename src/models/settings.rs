//! Process configuration
//!
//! Everything the pipeline reads from the environment is collected here once
//! at startup; components never touch `std::env` themselves.

use crate::models::error::{PipelineError, Result};
use std::path::PathBuf;
use std::time::Duration;

const DATA_DIR_KEY: &str = "DATA_DIR";
const SCRAPED_DATA_DIR_KEY: &str = "SCRAPED_DATA_DIR";
const MESSAGE_LIMIT_KEY: &str = "MESSAGE_LIMIT";
const DOWNLOAD_TIMEOUT_KEY: &str = "DOWNLOAD_TIMEOUT";
const SESSION_FILE_KEY: &str = "TG_SESSION_FILE";

const API_ID_KEY: &str = "TG_API_ID";
const API_HASH_KEY: &str = "TG_API_HASH";
const PHONE_KEY: &str = "phone";

const DEFAULT_MESSAGE_LIMIT: usize = 2000;
const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 60;

/// Paths and tunables shared by every pipeline step.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root data directory; everything below is derived from it.
    pub data_dir: PathBuf,
    pub media_dir: PathBuf,
    pub channel_list_path: PathBuf,
    pub raw_csv_path: PathBuf,
    /// Directory scanned by `merge` for per-run CSV exports.
    pub scraped_data_dir: PathBuf,
    pub combined_csv_path: PathBuf,
    pub preprocessed_csv_path: PathBuf,
    pub labeling_file_path: PathBuf,
    /// Maximum messages scraped per channel; `None` means no limit.
    pub message_limit: Option<usize>,
    pub download_timeout: Duration,
    pub session_path: PathBuf,
}

impl Settings {
    /// Build settings from the environment, falling back to the project's
    /// conventional `data/` layout.
    pub fn from_env() -> Result<Self> {
        let data_dir = PathBuf::from(env_or(DATA_DIR_KEY, "data"));
        let raw_dir = data_dir.join("raw");

        let message_limit = match std::env::var(MESSAGE_LIMIT_KEY) {
            Err(_) => Some(DEFAULT_MESSAGE_LIMIT),
            Ok(raw) => {
                let n: usize = raw.trim().parse().map_err(|_| {
                    PipelineError::Config(format!("{} must be an integer", MESSAGE_LIMIT_KEY))
                })?;
                // 0 is the "scrape everything" sentinel
                if n == 0 {
                    None
                } else {
                    Some(n)
                }
            }
        };

        let timeout_secs = match std::env::var(DOWNLOAD_TIMEOUT_KEY) {
            Err(_) => DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            Ok(raw) => raw.trim().parse().map_err(|_| {
                PipelineError::Config(format!("{} must be an integer", DOWNLOAD_TIMEOUT_KEY))
            })?,
        };

        Ok(Settings {
            media_dir: raw_dir.join("media"),
            channel_list_path: raw_dir.join("channels_to_crawl.csv"),
            raw_csv_path: raw_dir.join("telegram_data_raw.csv"),
            scraped_data_dir: PathBuf::from(
                std::env::var(SCRAPED_DATA_DIR_KEY)
                    .unwrap_or_else(|_| data_dir.join("scraped_data").to_string_lossy().to_string()),
            ),
            combined_csv_path: data_dir.join("combined_telegram_data_raw.csv"),
            preprocessed_csv_path: data_dir.join("preprocessed_telegram_data.csv"),
            labeling_file_path: data_dir.join("messages_to_label.txt"),
            message_limit,
            download_timeout: Duration::from_secs(timeout_secs),
            session_path: PathBuf::from(env_or(SESSION_FILE_KEY, "scraping_session.session")),
            data_dir,
        })
    }
}

/// Telegram API credentials, required only by the scrape step.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_id: i32,
    pub api_hash: String,
    pub phone: String,
}

impl Credentials {
    /// Read credentials from the environment; any missing value is fatal
    /// before a connection is attempted.
    pub fn from_env() -> Result<Self> {
        let api_id_raw = required(API_ID_KEY)?;
        let api_id = api_id_raw
            .trim()
            .parse()
            .map_err(|_| PipelineError::Config(format!("{} must be an integer", API_ID_KEY)))?;
        Ok(Credentials {
            api_id,
            api_hash: required(API_HASH_KEY)?,
            phone: required(PHONE_KEY)?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| String::from(default))
}

fn required(key: &'static str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PipelineError::MissingCredentials(key)),
    }
}
