//! Upcoming-window filtering for calendar events.

use chrono::{Days, NaiveDate, NaiveDateTime};

use super::types::CalendarEvent;

/// Keeps events starting in `[today, today + days]` (both ends inclusive),
/// sorted by start.
///
/// Events without a start are dropped. Ties keep feed order.
#[must_use]
pub fn events_in_window(
    events: Vec<CalendarEvent>,
    today: NaiveDate,
    days: u32,
) -> Vec<CalendarEvent> {
    let last = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);

    let mut kept: Vec<CalendarEvent> = events
        .into_iter()
        .filter(|e| {
            e.start
                .is_some_and(|s| (today..=last).contains(&s.date()))
        })
        .collect();

    kept.sort_by_key(|e| e.start.map_or(NaiveDateTime::MAX, |s| s.sort_key()));
    kept
}
