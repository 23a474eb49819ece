//! Error types for the scraping and preprocessing pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors surfaced by the scraper and the dataset passes.
///
/// Channel-level failures (`ChannelUnresolvable`, `Client`) are recoverable:
/// the orchestrator logs them and moves on to the next channel. Everything
/// else aborts the current command.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("channel list file not found: {0}")]
    ChannelListMissing(PathBuf),

    #[error("channel list {0} contains no usable identifiers")]
    ChannelListEmpty(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingCredentials(&'static str),

    #[error("could not access channel '{channel}': {reason}")]
    ChannelUnresolvable { channel: String, reason: String },

    #[error("no files matching '{0}' were found")]
    NoFilesFound(String),

    #[error("not enough rows to sample: wanted {wanted}, have {available}")]
    InsufficientRows { wanted: usize, available: usize },

    #[error("telegram client error: {0}")]
    Client(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("logger init error: {0}")]
    Logger(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PipelineError {
    /// True for failures that are isolated to a single channel and must not
    /// abort the run.
    pub fn is_channel_recoverable(&self) -> bool {
        matches!(
            self,
            PipelineError::ChannelUnresolvable { .. } | PipelineError::Client(_)
        )
    }
}

impl From<fern::InitError> for PipelineError {
    fn from(e: fern::InitError) -> Self {
        PipelineError::Logger(format!("{:?}", e))
    }
}

impl From<log::SetLoggerError> for PipelineError {
    fn from(e: log::SetLoggerError) -> Self {
        PipelineError::Logger(format!("{:?}", e))
    }
}

/// Failure taxonomy at the messaging-client boundary.
///
/// `NotFound`, `Private` and `Invalid` mean the channel itself is unusable;
/// `Download` is a per-message media failure; `Transport` covers everything
/// the underlying connection can throw.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("channel not found: {0}")]
    NotFound(String),

    #[error("channel is private: {0}")]
    Private(String),

    #[error("invalid channel identifier: {0}")]
    Invalid(String),

    #[error("media download failed: {0}")]
    Download(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl ClientError {
    /// True when resolution failed because the channel is private, invalid
    /// or unknown, as opposed to a transport problem.
    pub fn is_unresolvable(&self) -> bool {
        matches!(
            self,
            ClientError::NotFound(_) | ClientError::Private(_) | ClientError::Invalid(_)
        )
    }
}
