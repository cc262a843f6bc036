//! Calendar event types.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Start or end of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    /// All-day value (`VALUE=DATE`).
    Date(NaiveDate),
    /// Wall-clock date and time.
    DateTime(NaiveDateTime),
}

impl EventTime {
    /// Calendar date of this value.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(d) => *d,
            Self::DateTime(dt) => dt.date(),
        }
    }

    /// Time of day, only for date-time values.
    #[must_use]
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            Self::Date(_) => None,
            Self::DateTime(dt) => Some(dt.time()),
        }
    }

    /// Ordering key; an all-day value sorts at midnight.
    #[must_use]
    pub fn sort_key(&self) -> NaiveDateTime {
        match self {
            Self::Date(d) => d.and_time(NaiveTime::MIN),
            Self::DateTime(dt) => *dt,
        }
    }
}

/// One `VEVENT` from a calendar feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// `SUMMARY`.
    pub title: String,
    /// `DTSTART`; `None` when absent or unparseable.
    pub start: Option<EventTime>,
    /// `DTEND`.
    pub end: Option<EventTime>,
    /// `LOCATION` (empty when absent).
    pub location: String,
    /// `DESCRIPTION`, truncated.
    pub description: String,
    /// Name of the feed the event came from.
    pub feed: String,
}
