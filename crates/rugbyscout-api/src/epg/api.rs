//! `EpgApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use chrono::NaiveDate;

use super::types::ProgramEntry;

/// EPG API trait.
///
/// Abstracts the listing lookup for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(EpgApi: Send)]
pub trait LocalEpgApi {
    /// Fetches the program list of one channel for one day.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, timeout, non-success status,
    /// or a malformed JSON body.
    async fn fetch_epg(&self, channel_id: &str, date: NaiveDate) -> Result<Vec<ProgramEntry>>;
}
