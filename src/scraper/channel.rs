//! Channel scraper
//!
//! Walks one channel's history newest-first and appends one CSV row per kept
//! message. Media failures degrade to a sentinel and never block text capture.

use std::fs::File;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};
use tokio::time::timeout;

use crate::client::MessagingClient;
use crate::models::error::{PipelineError, Result};
use crate::models::message_record::{MessageRecord, DOWNLOAD_FAILED};
use crate::models::settings::Settings;

const PAGE_SIZE: usize = 100;

/// Scrape a single channel into the shared sink.
///
/// Parameters:
///  - client: messaging backend
///  - channel_username: identifier from the channel list (with or without `@`)
///  - writer: the run's single CSV sink
///  - shutdown: cooperative cancellation flag, checked between messages
///
/// Return: number of rows written for this channel
pub async fn scrape_channel<C: MessagingClient>(
    client: &C,
    channel_username: &str,
    writer: &mut csv::Writer<File>,
    settings: &Settings,
    shutdown: &AtomicBool,
) -> Result<u64> {
    info!("--- Starting scrape for {} ---", channel_username);
    let channel = client.resolve(channel_username).await.map_err(|e| {
        if e.is_unresolvable() {
            PipelineError::ChannelUnresolvable {
                channel: channel_username.to_string(),
                reason: e.to_string(),
            }
        } else {
            PipelineError::Client(e.to_string())
        }
    })?;

    let mut remaining = settings.message_limit;
    let mut offset_id: Option<i32> = None;
    let mut written = 0u64;

    'pages: loop {
        let page_size = remaining.map_or(PAGE_SIZE, |r| r.min(PAGE_SIZE));
        if page_size == 0 {
            break;
        }
        let page = client
            .history(&channel.inner, offset_id, page_size)
            .await
            .map_err(|e| PipelineError::Client(e.to_string()))?;
        if page.is_empty() {
            break;
        }
        offset_id = page.last().map(|m| m.id);
        // the limit counts iterated messages, kept or not
        if let Some(r) = remaining.as_mut() {
            *r -= page.len().min(*r);
        }

        for message in page {
            if shutdown.load(Ordering::SeqCst) {
                break 'pages;
            }
            // keep only messages that carry text or media
            if message.text.is_empty() && message.media.is_none() {
                continue;
            }
            let media_path = match &message.media {
                None => None,
                Some(media) => {
                    Some(fetch_media(client, channel_username, message.id, media, settings).await)
                }
            };
            let record = MessageRecord {
                channel_title: channel.title.clone(),
                channel_username: channel_username.to_string(),
                message_id: message.id,
                date: message.date,
                text: message.text,
                views: message.views,
                media_path,
            };
            writer.write_record(&record.to_row())?;
            // one row on disk per message, even if the run dies later
            writer.flush()?;
            written += 1;
        }
    }

    info!(
        "--- Finished scraping for {}. {} messages kept. ---",
        channel_username, written
    );
    Ok(written)
}

/// One download attempt with a hard timeout; any failure yields the sentinel
/// so text capture is never blocked by media.
async fn fetch_media<C: MessagingClient>(
    client: &C,
    channel_username: &str,
    message_id: i32,
    media: &C::Media,
    settings: &Settings,
) -> String {
    let stem = format!("{}_{}", channel_username.trim_start_matches('@'), message_id);
    let dest = settings.media_dir.join(&stem);
    match timeout(settings.download_timeout, client.download_media(media, &dest)).await {
        Ok(Ok(path)) => relative_media_path(&path),
        Ok(Err(e)) => {
            warn!(
                "Could not download media for message {} from {}: {}",
                message_id, channel_username, e
            );
            String::from(DOWNLOAD_FAILED)
        }
        Err(_) => {
            warn!(
                "Media download for message {} from {} timed out",
                message_id, channel_username
            );
            String::from(DOWNLOAD_FAILED)
        }
    }
}

/// Path recorded in the CSV, relative to the raw data directory.
fn relative_media_path(path: &Path) -> String {
    match path.file_name().and_then(|f| f.to_str()) {
        Some(name) => format!("media/{}", name),
        None => path.to_string_lossy().to_string(),
    }
}
