//! Maps parsed iCalendar `VEVENT`s to `CalendarEvent`.
//!
//! Line unfolding, parameter splitting and component nesting are handled
//! by `ical`; nested components such as `VALARM` never reach the event's
//! own property list.

use anyhow::{Result, anyhow, bail};
use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use ical::IcalParser;
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;

use super::types::{CalendarEvent, EventTime};

/// Maximum number of characters kept from `DESCRIPTION`.
pub const DESCRIPTION_LIMIT: usize = 200;

/// Parses calendar text and returns its `VEVENT`s in feed order.
///
/// # Errors
///
/// Returns an error if the text is not an iCalendar document.
pub fn parse_calendar(text: &str, feed: &str) -> Result<Vec<CalendarEvent>> {
    let preview = || text.chars().take(80).collect::<String>();

    let mut events = Vec::new();
    let mut calendars = 0_usize;
    for calendar in IcalParser::new(text.as_bytes()) {
        let calendar =
            calendar.map_err(|e| anyhow!("not an iCalendar document: {e} ({:?})", preview()))?;
        calendars = calendars.saturating_add(1);
        events.extend(calendar.events.iter().map(|e| to_calendar_event(e, feed)));
    }

    if calendars == 0 {
        bail!("not an iCalendar document: {:?}", preview());
    }
    Ok(events)
}

/// First property named `name`. Later duplicates are ignored.
fn first_property<'a>(event: &'a IcalEvent, name: &str) -> Option<&'a Property> {
    event
        .properties
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

fn text_property(event: &IcalEvent, name: &str) -> String {
    first_property(event, name)
        .and_then(|p| p.value.as_deref())
        .map(unescape_text)
        .unwrap_or_default()
}

fn to_calendar_event(event: &IcalEvent, feed: &str) -> CalendarEvent {
    CalendarEvent {
        title: text_property(event, "SUMMARY"),
        start: first_property(event, "DTSTART").and_then(parse_event_time),
        end: first_property(event, "DTEND").and_then(parse_event_time),
        location: text_property(event, "LOCATION"),
        description: truncate_chars(&text_property(event, "DESCRIPTION"), DESCRIPTION_LIMIT),
        feed: String::from(feed),
    }
}

/// Value of parameter `key` on `prop`.
fn param<'a>(prop: &'a Property, key: &str) -> Option<&'a str> {
    prop.params
        .as_ref()?
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}

/// Parses `DTSTART`/`DTEND`.
///
/// `YYYYMMDD` is an all-day date, `YYYYMMDDTHHMMSS` a floating time, and a
/// trailing `Z` marks UTC, which is converted to the local time zone. A
/// `TZID` parameter is not resolved; its wall-clock value is kept as is.
fn parse_event_time(prop: &Property) -> Option<EventTime> {
    let value = prop.value.as_deref().unwrap_or_default().trim();
    let is_date =
        param(prop, "VALUE").is_some_and(|v| v.eq_ignore_ascii_case("DATE")) || value.len() == 8;

    let parsed = if is_date {
        NaiveDate::parse_from_str(value, "%Y%m%d")
            .ok()
            .map(EventTime::Date)
    } else if let Some(utc) = value.strip_suffix(['Z', 'z']) {
        NaiveDateTime::parse_from_str(utc, "%Y%m%dT%H%M%S")
            .ok()
            .map(|ndt| EventTime::DateTime(utc_to_local(ndt)))
    } else {
        NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S")
            .ok()
            .map(EventTime::DateTime)
    };

    if parsed.is_none() {
        tracing::debug!(property = %prop.name, %value, "Unparseable calendar time, treating as missing");
    }
    parsed
}

/// Converts a UTC wall-clock value to local wall-clock.
pub(crate) fn utc_to_local(ndt: NaiveDateTime) -> NaiveDateTime {
    Utc.from_utc_datetime(&ndt)
        .with_timezone(&Local)
        .naive_local()
}

/// Reverses TEXT escaping (`\n`, `\,`, `\;`, `\\`); `ical` returns values
/// with their escapes in place.
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Keeps at most `limit` characters.
fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}
