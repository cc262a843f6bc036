//! Remote data sources for rugbyscout.
//!
//! Provides the EPG API client with its rugby filter and match collection,
//! the iCalendar feed client, and the shared fetch layer both sit on.

/// iCalendar feed client and event windowing.
pub mod calendar;

/// EPG API client, rugby filter and match collection.
pub mod epg;

/// Transport configuration and ordered fetch strategies.
pub mod fetch;
