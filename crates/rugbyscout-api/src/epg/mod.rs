//! EPG API client module.
//!
//! Fetches per-channel, per-day listings from the `epg.pw` JSON API,
//! picks out rugby programs and collects them across a date window.

mod api;
mod client;
mod collect;
mod filter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{EpgApi, LocalEpgApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_ENDPOINT, EpgClient, EpgClientBuilder, date_stamp};
pub use collect::{EpgChannel, MatchCollector, collect_rugby_matches};
pub use filter::find_rugby;
pub use types::{ProgramEntry, RugbyMatch};
