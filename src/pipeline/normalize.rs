//! Amharic text normalizer
//!
//! Pure, total cleaning function: URLs, mentions, hashtags and emoji are
//! stripped, then every character outside the allow-set (Ethiopic block
//! U+1200–U+137F including the marks ፡ ። ፣ ፤ ፥ ፦, ASCII letters, digits,
//! whitespace and `. , ! ? -`) is removed and whitespace is collapsed.
//!
//! Two historical variants of this cleaner existed, one without emoji
//! stripping and with a narrower punctuation set; this module is the
//! superset of both. Changing it after messages have been labeled
//! invalidates those labels, so treat the allow-set as frozen.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_RE: Regex = Regex::new(r"(?:https?://|www\.)\S+").unwrap();
    static ref MENTION_RE: Regex = Regex::new(r"@\w+").unwrap();
    static ref HASHTAG_RE: Regex = Regex::new(r"#\w+").unwrap();
    // misc symbols, dingbats, flags, pictographs/emoticons/transport/supplemental
    static ref EMOJI_RE: Regex =
        Regex::new(r"[\x{2600}-\x{27BF}\x{1F1E6}-\x{1F1FF}\x{1F300}-\x{1F9FF}]").unwrap();
    static ref DISALLOWED_RE: Regex =
        Regex::new(r"[^\x{1200}-\x{137F}A-Za-z0-9\s.,!?-]").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Clean one raw message text.
///
/// Deterministic and never fails; an empty result means nothing survived
/// cleaning and the row should be dropped downstream.
pub fn clean(raw: &str) -> String {
    let text = URL_RE.replace_all(raw, "");
    let text = MENTION_RE.replace_all(&text, "");
    let text = HASHTAG_RE.replace_all(&text, "");
    let text = EMOJI_RE.replace_all(&text, "");
    let text = DISALLOWED_RE.replace_all(&text, "");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}
