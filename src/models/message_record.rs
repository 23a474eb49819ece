//! One scraped message as it appears in the raw CSV.

use chrono::{DateTime, Utc};

/// Literal recorded in the media column when a download attempt failed.
pub const DOWNLOAD_FAILED: &str = "download_failed";

/// Header of the raw scrape CSV; one row per kept message.
pub const RAW_HEADER: [&str; 7] = [
    "Channel Title",
    "Channel Username",
    "Message ID",
    "Date",
    "Message Text",
    "Views",
    "Media Path",
];

/// A kept message, immutable once written to the sink.
///
/// Emitted only if `text` is non-empty or media was present on the source
/// message; `media_path` is `None` (no media), a relative path, or the
/// `download_failed` sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    pub channel_title: String,
    pub channel_username: String,
    pub message_id: i32,
    pub date: DateTime<Utc>,
    pub text: String,
    pub views: Option<i64>,
    pub media_path: Option<String>,
}

impl MessageRecord {
    /// CSV row projection; absent views and media become empty cells.
    pub fn to_row(&self) -> [String; 7] {
        [
            self.channel_title.clone(),
            self.channel_username.clone(),
            self.message_id.to_string(),
            self.date.to_rfc3339(),
            self.text.clone(),
            self.views.map(|v| v.to_string()).unwrap_or_default(),
            self.media_path.clone().unwrap_or_default(),
        ]
    }
}
