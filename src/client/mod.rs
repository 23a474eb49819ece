//! External messaging collaborator
//!
//! The scraper only talks to Telegram through the [`MessagingClient`] trait;
//! the real MTProto implementation lives in [`tg`] behind the `tg` feature so
//! the pipeline and its tests build without network credentials.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::models::error::ClientError;

#[cfg(feature = "tg")]
pub mod tg;

/// A channel entity as handed back by resolution: the display title plus the
/// client's own handle for subsequent history calls.
#[derive(Debug, Clone)]
pub struct ResolvedChannel<C> {
    pub title: String,
    pub inner: C,
}

/// One message as delivered by the client, before any inclusion decision.
#[derive(Debug, Clone)]
pub struct RawMessage<M> {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub text: String,
    pub views: Option<i64>,
    pub media: Option<M>,
}

/// Contract the scraper requires from a messaging backend.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    type Channel: Send + Sync;
    type Media: Send + Sync;

    /// Resolve a channel identifier (with or without the leading `@`) to an
    /// entity usable for history iteration.
    async fn resolve(
        &self,
        identifier: &str,
    ) -> Result<ResolvedChannel<Self::Channel>, ClientError>;

    /// Fetch one page of message history, newest first.
    ///
    /// Parameters:
    ///  - channel: entity from [`MessagingClient::resolve`]
    ///  - offset_id: id of the last message of the previous page; `None`
    ///    starts at the most recent message
    ///  - page_size: maximum messages to return; an empty page means the
    ///    history is exhausted
    async fn history(
        &self,
        channel: &Self::Channel,
        offset_id: Option<i32>,
        page_size: usize,
    ) -> Result<Vec<RawMessage<Self::Media>>, ClientError>;

    /// Download `media` to `dest_stem`, appending an extension chosen from
    /// the media kind. Returns the final path on disk.
    async fn download_media(
        &self,
        media: &Self::Media,
        dest_stem: &Path,
    ) -> Result<PathBuf, ClientError>;

    /// Release the connection, persisting session state where applicable.
    async fn close(&self) -> Result<(), ClientError>;
}
