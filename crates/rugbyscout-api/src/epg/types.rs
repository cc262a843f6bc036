//! EPG response and match types.

use serde::Deserialize;

/// Raw `epg.json` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct EpgResponse {
    /// Listing entries; absent or `null` means no programs.
    #[serde(default)]
    pub epg_list: Option<Vec<RawProgram>>,
}

/// One raw listing entry as sent by the API.
#[derive(Debug, Deserialize)]
pub(crate) struct RawProgram {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A single program in a channel's daily listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramEntry {
    /// Program title (empty when the API omits it).
    pub title: String,
    /// Program description, if any.
    pub description: Option<String>,
    /// ISO-like start timestamp, e.g. `2025-10-01T14:00:00`.
    pub start: String,
    /// ISO-like end timestamp.
    pub end: String,
}

impl From<RawProgram> for ProgramEntry {
    fn from(raw: RawProgram) -> Self {
        Self {
            title: raw.title.unwrap_or_default(),
            description: raw.desc,
            start: raw.start_date.unwrap_or_default(),
            end: raw.end_date.unwrap_or_default(),
        }
    }
}

/// A program that mentions rugby, tagged with its channel name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RugbyMatch {
    /// Channel display name.
    pub channel: String,
    /// Program title.
    pub title: String,
    /// Start timestamp as sent by the API.
    pub start: String,
    /// End timestamp as sent by the API.
    pub end: String,
    /// Description (empty when absent).
    pub description: String,
}

impl RugbyMatch {
    /// Deduplication key: `(channel, title, start)`.
    #[must_use]
    pub fn dedup_key(&self) -> (String, String, String) {
        (
            self.channel.clone(),
            self.title.clone(),
            self.start.clone(),
        )
    }

    /// Date portion of `start` (first 10 characters).
    #[must_use]
    pub fn start_date(&self) -> &str {
        self.start.get(..10).unwrap_or(&self.start)
    }

    /// `HH:MM` portion of `start`, or `""` when `start` is too short.
    #[must_use]
    pub fn start_time(&self) -> &str {
        if self.start.len() > 16 {
            self.start.get(11..16).unwrap_or_default()
        } else {
            ""
        }
    }
}
