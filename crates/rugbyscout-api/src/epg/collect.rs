//! Rugby match collection across channels and days.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use tracing::instrument;

use super::api::LocalEpgApi;
use super::client::date_stamp;
use super::filter::find_rugby;
use super::types::RugbyMatch;

/// A channel to query, as handed over by the channel store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpgChannel {
    /// EPG channel identifier.
    pub channel_id: String,
    /// Display name used in match records.
    pub name: String,
}

/// Accumulates matches, dropping repeats of a `(channel, title, start)` key.
#[derive(Debug, Default)]
pub struct MatchCollector {
    seen: HashSet<(String, String, String)>,
    matches: Vec<RugbyMatch>,
}

impl MatchCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds matches; the first occurrence of a key wins.
    ///
    /// Returns how many were new.
    pub fn extend(&mut self, matches: impl IntoIterator<Item = RugbyMatch>) -> usize {
        let before = self.matches.len();
        for m in matches {
            if self.seen.insert(m.dedup_key()) {
                self.matches.push(m);
            }
        }
        self.matches.len().saturating_sub(before)
    }

    /// Number of distinct matches collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Consumes the collector, returning matches sorted by `start`.
    ///
    /// The sort is stable, so equal starts keep collection order.
    #[must_use]
    pub fn into_sorted(mut self) -> Vec<RugbyMatch> {
        self.matches.sort_by(|a, b| a.start.cmp(&b.start));
        self.matches
    }
}

/// Checks every channel for every day in `[today, today + days)` and
/// returns the deduplicated rugby matches sorted by start.
///
/// Requests run one after another. A failed (channel, day) lookup is
/// logged and skipped; it never stops the remaining lookups.
#[instrument(skip_all, fields(channels = channels.len(), days = days))]
pub async fn collect_rugby_matches(
    api: &(impl LocalEpgApi + Sync),
    channels: &[EpgChannel],
    today: NaiveDate,
    days: u32,
) -> Vec<RugbyMatch> {
    let mut collector = MatchCollector::new();

    for day_offset in 0..days {
        let Some(date) = today.checked_add_days(Days::new(u64::from(day_offset))) else {
            tracing::warn!(day_offset, "Date out of range, stopping");
            break;
        };
        tracing::debug!("{}", date.format("%A, %B %d, %Y"));

        for channel in channels {
            tracing::debug!(channel = %channel.name, id = %channel.channel_id, date = %date_stamp(date), "Checking channel");

            let programs = match api.fetch_epg(&channel.channel_id, date).await {
                Ok(programs) => programs,
                Err(e) => {
                    tracing::warn!(
                        channel = %channel.name,
                        id = %channel.channel_id,
                        date = %date_stamp(date),
                        "Error fetching EPG for channel {}: {e:#}",
                        channel.channel_id
                    );
                    continue;
                }
            };

            let added = collector.extend(find_rugby(&programs, &channel.name));
            if added > 0 {
                tracing::debug!(channel = %channel.name, added, "Rugby programs found");
            }
        }
    }

    if collector.is_empty() {
        tracing::debug!("No rugby programs in any listing");
    } else {
        tracing::debug!(total = collector.len(), "Collection finished");
    }
    collector.into_sorted()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::collections::HashMap;
    use std::sync::Mutex;

    use anyhow::{Result, bail};

    use super::*;
    use crate::epg::types::ProgramEntry;

    /// In-memory EPG keyed by `(channel_id, YYYYMMDD)`; `None` simulates a network failure.
    #[derive(Default)]
    struct MockEpg {
        listings: HashMap<(String, String), Option<Vec<ProgramEntry>>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockEpg {
        fn with(mut self, channel_id: &str, stamp: &str, programs: Option<Vec<ProgramEntry>>) -> Self {
            self.listings
                .insert((String::from(channel_id), String::from(stamp)), programs);
            self
        }
    }

    impl LocalEpgApi for MockEpg {
        async fn fetch_epg(&self, channel_id: &str, date: NaiveDate) -> Result<Vec<ProgramEntry>> {
            let key = (String::from(channel_id), date_stamp(date));
            self.calls.lock().unwrap().push(key.clone());
            match self.listings.get(&key) {
                Some(Some(programs)) => Ok(programs.clone()),
                Some(None) => bail!("connection refused"),
                None => Ok(Vec::new()),
            }
        }
    }

    fn program(title: &str, start: &str) -> ProgramEntry {
        ProgramEntry {
            title: String::from(title),
            description: Some(String::new()),
            start: String::from(start),
            end: String::new(),
        }
    }

    fn nova_channels() -> Vec<EpgChannel> {
        [
            ("6263", "Nova Sport 1"),
            ("7401", "Nova Sport 2"),
            ("7747", "Nova Sport 3"),
            ("7612", "Nova Sport 4"),
            ("392147", "Nova Sport 5"),
            ("392164", "Nova Sport 6"),
        ]
        .into_iter()
        .map(|(id, name)| EpgChannel {
            channel_id: String::from(id),
            name: String::from(name),
        })
        .collect()
    }

    fn oct_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    #[tokio::test]
    async fn test_single_rugby_program() {
        // Arrange
        let api = MockEpg::default().with(
            "6263",
            "20251001",
            Some(vec![program("Rugby World Cup Final", "2025-10-01T14:00:00")]),
        );

        // Act
        let matches = collect_rugby_matches(&api, &nova_channels()[..1], oct_first(), 1).await;

        // Assert
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].channel, "Nova Sport 1");
        assert_eq!(matches[0].title, "Rugby World Cup Final");
    }

    #[tokio::test]
    async fn test_empty_listing_yields_nothing() {
        // Arrange
        let api = MockEpg::default().with("6263", "20251001", Some(Vec::new()));

        // Act
        let matches = collect_rugby_matches(&api, &nova_channels(), oct_first(), 1).await;

        // Assert
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_one_failing_channel_does_not_stop_others() {
        // Arrange
        let channels = nova_channels();
        let mut api = MockEpg::default();
        for (i, ch) in channels.iter().enumerate() {
            let listing = if ch.channel_id == "7401" {
                None
            } else {
                Some(vec![program(
                    &format!("Rugby Match {i}"),
                    &format!("2025-10-01T1{i}:00:00"),
                )])
            };
            api = api.with(&ch.channel_id, "20251001", listing);
        }

        // Act
        let matches = collect_rugby_matches(&api, &channels, oct_first(), 1).await;

        // Assert
        assert_eq!(matches.len(), 5);
        assert!(matches.iter().all(|m| m.channel != "Nova Sport 2"));
        assert_eq!(api.calls.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_duplicates_across_days_are_dropped() {
        // Arrange: the next day's listing repeats the late-night broadcast
        let late = program("Rugby Replay", "2025-10-01T23:30:00");
        let api = MockEpg::default()
            .with("6263", "20251001", Some(vec![late.clone()]))
            .with("6263", "20251002", Some(vec![late]));

        // Act
        let matches = collect_rugby_matches(&api, &nova_channels()[..1], oct_first(), 2).await;

        // Assert
        assert_eq!(matches.len(), 1);
    }

    #[tokio::test]
    async fn test_same_program_on_two_channels_is_kept_twice() {
        // Arrange
        let p = program("Rugby Simulcast", "2025-10-01T18:00:00");
        let api = MockEpg::default()
            .with("6263", "20251001", Some(vec![p.clone()]))
            .with("7401", "20251001", Some(vec![p]));

        // Act
        let matches = collect_rugby_matches(&api, &nova_channels()[..2], oct_first(), 1).await;

        // Assert
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn test_results_sorted_by_start_across_days() {
        // Arrange
        let api = MockEpg::default()
            .with(
                "6263",
                "20251001",
                Some(vec![
                    program("Rugby Evening", "2025-10-01T20:00:00"),
                    program("Rugby Morning", "2025-10-01T08:00:00"),
                ]),
            )
            .with(
                "7401",
                "20251002",
                Some(vec![program("Rugby Tomorrow", "2025-10-02T06:00:00")]),
            )
            .with(
                "7401",
                "20251001",
                Some(vec![program("Rugby Noon", "2025-10-01T12:00:00")]),
            );

        // Act
        let matches = collect_rugby_matches(&api, &nova_channels()[..2], oct_first(), 2).await;

        // Assert
        let starts: Vec<&str> = matches.iter().map(|m| m.start.as_str()).collect();
        assert_eq!(
            starts,
            vec![
                "2025-10-01T08:00:00",
                "2025-10-01T12:00:00",
                "2025-10-01T20:00:00",
                "2025-10-02T06:00:00",
            ]
        );
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_each_channel_day_requested_once_in_order() {
        // Arrange
        let api = MockEpg::default();

        // Act
        collect_rugby_matches(&api, &nova_channels()[..2], oct_first(), 2).await;

        // Assert
        let calls = api.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                (String::from("6263"), String::from("20251001")),
                (String::from("7401"), String::from("20251001")),
                (String::from("6263"), String::from("20251002")),
                (String::from("7401"), String::from("20251002")),
            ]
        );
    }

    #[tokio::test]
    async fn test_zero_days_makes_no_requests() {
        // Arrange
        let api = MockEpg::default();

        // Act
        let matches = collect_rugby_matches(&api, &nova_channels(), oct_first(), 0).await;

        // Assert
        assert!(matches.is_empty());
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_collector_first_occurrence_wins() {
        // Arrange
        let mut collector = MatchCollector::new();
        let first = RugbyMatch {
            channel: String::from("Nova Sport 1"),
            title: String::from("Rugby"),
            start: String::from("2025-10-01T14:00:00"),
            end: String::from("2025-10-01T16:00:00"),
            description: String::from("first"),
        };
        let repeat = RugbyMatch {
            description: String::from("second"),
            ..first.clone()
        };

        // Act
        let added_first = collector.extend([first]);
        let added_repeat = collector.extend([repeat]);
        let matches = collector.into_sorted();

        // Assert
        assert_eq!(added_first, 1);
        assert_eq!(added_repeat, 0);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].description, "first");
    }

    #[test]
    fn test_collector_len_counts_distinct_matches() {
        // Arrange
        let mut collector = MatchCollector::new();
        let base = RugbyMatch {
            channel: String::from("Nova Sport 2"),
            title: String::from("Rugby Sevens"),
            start: String::from("2025-10-02T09:00:00"),
            end: String::new(),
            description: String::new(),
        };
        let later = RugbyMatch {
            start: String::from("2025-10-02T11:00:00"),
            ..base.clone()
        };

        // Act
        let empty_before = collector.is_empty();
        collector.extend([base.clone(), base, later]);

        // Assert
        assert!(empty_before);
        assert!(!collector.is_empty());
        assert_eq!(collector.len(), 2);
    }
}
