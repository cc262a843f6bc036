//! `CalendarClient` - public iCalendar feed client.

use anyhow::{Context, Result};
use tracing::instrument;
use url::Url;

use super::ics::parse_calendar;
use super::types::CalendarEvent;
use crate::fetch::{FetchStrategy, Fetcher, TransportConfig};

/// Name of the default feed.
pub const DEFAULT_FEED_NAME: &str = "international";

/// Mike Riversdale's public international rugby calendar.
pub const DEFAULT_FEED_URL: &str = "https://www.google.com/calendar/ical/ct240d39oc9kq21cq3bn70jii8%40group.calendar.google.com/public/basic.ics";

/// Calendar feed client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CalendarClient {
    fetcher: Fetcher,
}

impl CalendarClient {
    /// Creates a client over the given transport and strategies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(transport: TransportConfig, strategies: Vec<FetchStrategy>) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(transport, strategies)?,
        })
    }

    /// Fetches and parses one feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the body is not a calendar.
    pub async fn try_fetch_events(&self, feed_name: &str, url: &Url) -> Result<Vec<CalendarEvent>> {
        let body = self
            .fetcher
            .fetch_text(url)
            .await
            .with_context(|| format!("failed to fetch calendar {feed_name}"))?;
        parse_calendar(&body, feed_name)
            .with_context(|| format!("failed to parse calendar {feed_name}"))
    }

    /// Fetches one feed, degrading any failure to an empty list.
    ///
    /// Failures are logged, never returned.
    #[instrument(skip_all, fields(feed = %feed_name))]
    pub async fn fetch_events(&self, feed_name: &str, url: &Url) -> Vec<CalendarEvent> {
        tracing::debug!(%url, strategies = ?self.fetcher.strategies(), "Fetching calendar");
        match self.try_fetch_events(feed_name, url).await {
            Ok(events) => {
                tracing::debug!(count = events.len(), "Got events");
                events
            }
            Err(e) => {
                tracing::warn!("Error fetching calendar: {e:#}");
                Vec::new()
            }
        }
    }
}
