//! iCalendar feed client module.
//!
//! Fetches a public rugby fixture calendar, extracts its `VEVENT`
//! components and narrows them to an upcoming date window.

mod client;
mod ics;
mod types;
mod window;

#[allow(clippy::module_name_repetitions)]
pub use client::{CalendarClient, DEFAULT_FEED_NAME, DEFAULT_FEED_URL};
pub use ics::{DESCRIPTION_LIMIT, parse_calendar};
#[allow(clippy::module_name_repetitions)]
pub use types::{CalendarEvent, EventTime};
pub use window::events_in_window;
