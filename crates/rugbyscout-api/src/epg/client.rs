//! `EpgClient` - `epg.pw` JSON API client implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::instrument;
use url::Url;

use super::api::LocalEpgApi;
use super::types::{EpgResponse, ProgramEntry};
use crate::fetch::{FetchStrategy, Fetcher, TransportConfig};

/// Default EPG endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://epg.pw/api/epg.json";

/// Default listing language.
const DEFAULT_LANG: &str = "en";

/// Formats a date as the API's `date` parameter (`YYYYMMDD`).
#[must_use]
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// EPG API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct EpgClient {
    /// Fetch layer (strategy list + transport).
    fetcher: Fetcher,
    /// Endpoint URL without query.
    endpoint: Url,
    /// `lang` query parameter.
    lang: String,
}

/// Builder for `EpgClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct EpgClientBuilder {
    endpoint: Option<Url>,
    lang: Option<String>,
    transport: Option<TransportConfig>,
    strategies: Vec<FetchStrategy>,
}

impl EpgClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            endpoint: None,
            lang: None,
            transport: None,
            strategies: Vec::new(),
        }
    }

    /// Overrides the endpoint (for wiremock in tests).
    #[must_use]
    pub fn endpoint(mut self, url: Url) -> Self {
        self.endpoint = Some(url);
        self
    }

    /// Sets the listing language (default: `en`).
    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Sets the transport configuration (required).
    #[must_use]
    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the ordered fetch strategies (default: `[Http]`).
    #[must_use]
    pub fn strategies(mut self, strategies: Vec<FetchStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `transport` is not set.
    /// - The default endpoint fails to parse.
    /// - The HTTP client build fails.
    pub fn build(self) -> Result<EpgClient> {
        let transport = self.transport.context("transport is required")?;

        let endpoint = if let Some(url) = self.endpoint {
            url
        } else {
            Url::parse(DEFAULT_ENDPOINT).context("invalid default EPG endpoint")?
        };

        let fetcher = Fetcher::new(transport, self.strategies)?;

        Ok(EpgClient {
            fetcher,
            endpoint,
            lang: self.lang.unwrap_or_else(|| String::from(DEFAULT_LANG)),
        })
    }
}

impl EpgClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> EpgClientBuilder {
        EpgClientBuilder::new()
    }

    /// Builds the request URL for one channel and day.
    fn request_url(&self, channel_id: &str, date: NaiveDate) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("lang", &self.lang)
            .append_pair("date", &date_stamp(date))
            .append_pair("channel_id", channel_id);
        url
    }

    /// Parses an `epg.json` body.
    pub(crate) fn parse_epg_response(json: &str) -> Result<Vec<ProgramEntry>> {
        let raw_result: std::result::Result<EpgResponse, _> = serde_json::from_str(json);
        let response = raw_result.with_context(|| {
            let preview_len = json.floor_char_boundary(200);
            format!(
                "EPG JSON decoding failed (len={}): {}",
                json.len(),
                json.get(..preview_len).unwrap_or_default()
            )
        })?;
        Ok(response
            .epg_list
            .map_or_else(Vec::new, |list| list.into_iter().map(ProgramEntry::from).collect()))
    }
}

impl LocalEpgApi for EpgClient {
    #[instrument(skip_all, fields(%channel_id, %date))]
    async fn fetch_epg(&self, channel_id: &str, date: NaiveDate) -> Result<Vec<ProgramEntry>> {
        let url = self.request_url(channel_id, date);
        tracing::debug!(%url, strategies = ?self.fetcher.strategies(), "Fetching EPG");

        let body = self
            .fetcher
            .fetch_text(&url)
            .await
            .with_context(|| format!("failed to fetch EPG for channel {channel_id}"))?;

        let programs = Self::parse_epg_response(&body)
            .with_context(|| format!("failed to parse EPG for channel {channel_id}"))?;
        tracing::debug!(count = programs.len(), "Got programs");
        Ok(programs)
    }
}
