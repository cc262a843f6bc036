//! Ordered fetch strategies.

use std::fmt;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use super::transport::TransportConfig;

/// One way of retrieving a URL's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(clippy::module_name_repetitions)]
pub enum FetchStrategy {
    /// Direct request through the `reqwest` client.
    Http,
    /// External `curl` subprocess.
    Curl,
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Curl => write!(f, "curl"),
        }
    }
}

/// Fetches URL bodies by trying each configured strategy in order.
#[derive(Debug)]
pub struct Fetcher {
    strategies: Vec<FetchStrategy>,
    transport: TransportConfig,
    http_client: Client,
}

impl Fetcher {
    /// Creates a fetcher. An empty strategy list falls back to `[Http]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(transport: TransportConfig, strategies: Vec<FetchStrategy>) -> Result<Self> {
        let strategies = if strategies.is_empty() {
            vec![FetchStrategy::Http]
        } else {
            strategies
        };
        let http_client = transport.build_http_client()?;
        Ok(Self {
            strategies,
            transport,
            http_client,
        })
    }

    /// Configured strategies, in the order they are tried.
    #[must_use]
    pub fn strategies(&self) -> &[FetchStrategy] {
        &self.strategies
    }

    /// Fetches `url` as text.
    ///
    /// Each strategy is attempted once. A failure is logged and the next
    /// strategy is tried; the last error is returned when all fail.
    ///
    /// # Errors
    ///
    /// Returns the last strategy's error if no strategy succeeds.
    #[instrument(skip_all, fields(%url))]
    pub async fn fetch_text(&self, url: &Url) -> Result<String> {
        let mut last_err = None;

        for strategy in &self.strategies {
            let result = match strategy {
                FetchStrategy::Http => self.fetch_http(url).await,
                FetchStrategy::Curl => self.fetch_curl(url).await,
            };
            match result {
                Ok(body) => {
                    tracing::debug!(%strategy, body_len = body.len(), "Response body received");
                    return Ok(body);
                }
                Err(e) => {
                    tracing::warn!(%strategy, error = %format!("{e:#}"), "Fetch strategy failed");
                    last_err = Some(e.context(format!("{strategy} fetch failed")));
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("no fetch strategy configured for {url}")))
    }

    async fn fetch_http(&self, url: &Url) -> Result<String> {
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request failed: {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {status} from {url}");
        }

        response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {url}"))
    }

    async fn fetch_curl(&self, url: &Url) -> Result<String> {
        let output = tokio::process::Command::new(&self.transport.curl_program)
            .args(self.transport.curl_args())
            .arg(url.as_str())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| {
                format!(
                    "failed to spawn {}",
                    self.transport.curl_program.display()
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("curl exited with {}: {}", output.status, stderr.trim());
        }

        String::from_utf8(output.stdout).context("curl output is not valid UTF-8")
    }
}
