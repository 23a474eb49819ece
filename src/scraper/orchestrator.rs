//! Scrape orchestrator
//!
//! Reads the channel list, opens the single CSV sink for the run and drives
//! the channel scraper strictly sequentially; one bad channel never aborts
//! the run, and the client connection is released however the loop ends.

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{error, info, warn};

use crate::client::MessagingClient;
use crate::models::error::{PipelineError, Result};
use crate::models::message_record::RAW_HEADER;
use crate::models::settings::Settings;
use crate::scraper::channel::scrape_channel;

/// Run a full scrape over the configured channel list, stopping early on
/// Ctrl-C.
pub async fn run<C: MessagingClient>(client: &C, settings: &Settings) -> Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    spawn_shutdown_listener(Arc::clone(&shutdown));
    run_with_shutdown(client, settings, &shutdown).await
}

/// Like [`run`], but with a caller-owned cancellation flag. The flag is
/// checked between channels and between messages; everything written before
/// it is raised stays on disk.
pub async fn run_with_shutdown<C: MessagingClient>(
    client: &C,
    settings: &Settings,
    shutdown: &AtomicBool,
) -> Result<()> {
    // both list errors abort before any network activity
    let channels = read_channel_list(&settings.channel_list_path)?;
    info!(
        "Found {} channels to scrape from '{}'.",
        channels.len(),
        settings.channel_list_path.display()
    );

    fs::create_dir_all(&settings.media_dir)?;
    let mut writer = csv::Writer::from_path(&settings.raw_csv_path)?;
    writer.write_record(&RAW_HEADER)?;
    writer.flush()?;

    let result = scrape_all(client, &channels, &mut writer, settings, shutdown).await;

    // sink and connection are released no matter how the loop exited; the
    // client is closed even when the final flush fails
    let flushed = writer.flush();
    if let Err(e) = client.close().await {
        warn!("Error while disconnecting client: {}", e);
    }
    result?;
    flushed?;

    info!(
        "Scraping complete. All data saved to '{}'",
        settings.raw_csv_path.display()
    );
    Ok(())
}

async fn scrape_all<C: MessagingClient>(
    client: &C,
    channels: &[String],
    writer: &mut csv::Writer<File>,
    settings: &Settings,
    shutdown: &AtomicBool,
) -> Result<()> {
    for channel in channels {
        if shutdown.load(Ordering::SeqCst) {
            warn!("Shutdown requested; stopping before {}", channel);
            break;
        }
        match scrape_channel(client, channel, writer, settings, shutdown).await {
            Ok(count) => info!("{}: {} rows written", channel, count),
            Err(e) if e.is_channel_recoverable() => {
                error!("Skipping channel {}: {}", channel, e);
            }
            // writer and IO failures are not channel problems; surface them
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Read the newline-delimited channel list; blank lines are ignored.
pub fn read_channel_list(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            PipelineError::ChannelListMissing(path.to_path_buf())
        } else {
            PipelineError::Io(e)
        }
    })?;
    let channels: Vec<String> = raw
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    if channels.is_empty() {
        return Err(PipelineError::ChannelListEmpty(path.to_path_buf()));
    }
    Ok(channels)
}

fn spawn_shutdown_listener(flag: Arc<AtomicBool>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received; finishing the current message and stopping.");
            flag.store(true, Ordering::SeqCst);
        }
    });
}
