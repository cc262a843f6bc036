//! Transport configuration shared by every fetch strategy.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default allowed cipher set (OpenSSL cipher-list syntax).
pub const DEFAULT_CIPHERS: &str = "HIGH:!DH:!aNULL";

/// TLS policy applied to outgoing requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPolicy {
    /// Allowed cipher set, handed to `curl --ciphers`.
    ///
    /// The `rustls` backend used by the HTTP strategy offers only
    /// suites inside `HIGH:!DH:!aNULL` and has no cipher-list knob.
    pub ciphers: Option<String>,
    /// Skip certificate verification.
    pub accept_invalid_certs: bool,
}

impl Default for TlsPolicy {
    fn default() -> Self {
        Self {
            ciphers: Some(String::from(DEFAULT_CIPHERS)),
            accept_invalid_certs: false,
        }
    }
}

/// Transport settings for one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct TransportConfig {
    /// Bounded wait per request; exceeding it counts as a network failure.
    pub timeout: Duration,
    /// User-Agent sent by every strategy.
    pub user_agent: String,
    /// TLS policy.
    pub tls: TlsPolicy,
    /// `curl` executable used by the subprocess strategy.
    pub curl_program: PathBuf,
}

impl TransportConfig {
    /// Creates a config with default timeout and TLS policy.
    #[must_use]
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: user_agent.into(),
            tls: TlsPolicy::default(),
            curl_program: PathBuf::from("curl"),
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the TLS policy.
    #[must_use]
    pub fn tls(mut self, tls: TlsPolicy) -> Self {
        self.tls = tls;
        self
    }

    /// Overrides the `curl` executable.
    #[must_use]
    pub fn curl_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.curl_program = program.into();
        self
    }

    /// Builds the `reqwest` client for the HTTP strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if the `reqwest::Client` build fails.
    pub fn build_http_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .gzip(true)
            .danger_accept_invalid_certs(self.tls.accept_invalid_certs)
            .build()
            .context("failed to build HTTP client")
    }

    /// Arguments passed to `curl` ahead of the URL.
    pub(crate) fn curl_args(&self) -> Vec<String> {
        let mut args = vec![
            String::from("--silent"),
            String::from("--show-error"),
            String::from("--fail"),
            String::from("--location"),
            String::from("--max-time"),
            self.timeout.as_secs().max(1).to_string(),
            String::from("--user-agent"),
            self.user_agent.clone(),
        ];
        if let Some(ref ciphers) = self.tls.ciphers {
            args.push(String::from("--ciphers"));
            args.push(ciphers.clone());
        }
        if self.tls.accept_invalid_certs {
            args.push(String::from("--insecure"));
        }
        args
    }
}
