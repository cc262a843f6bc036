//! `AppConfig` struct, TOML read/write and config file location.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use rugbyscout_api::calendar::{DEFAULT_FEED_NAME, DEFAULT_FEED_URL};
use rugbyscout_api::epg::DEFAULT_ENDPOINT;
use rugbyscout_api::fetch::{DEFAULT_CIPHERS, FetchStrategy, TlsPolicy, TransportConfig};
use rugbyscout_db::{ChannelSeed, home_dir};
use serde::{Deserialize, Serialize};
use url::Url;

/// Resolves the config file path: `{dir}/config.toml`, or
/// `~/.config/rugbyscout/config.toml` without `--dir`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(d) => Ok(d.join("config.toml")),
        None => Ok(home_dir()?.join(".config").join("rugbyscout").join("config.toml")),
    }
}

/// Nova Sport channels on `epg.pw`.
const NOVA_CHANNELS: &[(&str, &str)] = &[
    ("6263", "Nova Sport 1"),
    ("7401", "Nova Sport 2"),
    ("7747", "Nova Sport 3"),
    ("7612", "Nova Sport 4"),
    ("392147", "Nova Sport 5"),
    ("392164", "Nova Sport 6"),
];

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// EPG API settings.
    #[serde(default)]
    pub epg: EpgConfig,
    /// Fetch layer settings.
    #[serde(default)]
    pub transport: TransportSettings,
    /// Calendar feeds.
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Channel store seed list.
    #[serde(default)]
    pub channels: ChannelsConfig,
    /// Default day window per command.
    #[serde(default)]
    pub days: DaysConfig,
}

/// EPG API configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EpgConfig {
    /// Endpoint URL without query.
    pub endpoint: String,
    /// Listing language.
    pub lang: String,
}

impl Default for EpgConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(DEFAULT_ENDPOINT),
            lang: String::from("en"),
        }
    }
}

/// Transport configuration as written in the config file.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransportSettings {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Fetch strategies, tried in order.
    pub strategies: Vec<FetchStrategy>,
    /// Allowed cipher set.
    pub ciphers: Option<String>,
    /// Skip certificate verification.
    pub accept_invalid_certs: bool,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            strategies: vec![FetchStrategy::Http],
            ciphers: Some(String::from(DEFAULT_CIPHERS)),
            accept_invalid_certs: false,
        }
    }
}

impl TransportSettings {
    /// Builds the transport configuration handed to the clients.
    #[must_use]
    pub fn to_transport(&self, user_agent: &str) -> TransportConfig {
        TransportConfig::new(user_agent)
            .timeout(Duration::from_secs(self.timeout_secs))
            .tls(TlsPolicy {
                ciphers: self.ciphers.clone().filter(|c| !c.is_empty()),
                accept_invalid_certs: self.accept_invalid_certs,
            })
    }
}

/// Calendar feed list.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CalendarConfig {
    /// Feeds to check, in order.
    pub feeds: Vec<FeedConfig>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            feeds: vec![FeedConfig {
                name: String::from(DEFAULT_FEED_NAME),
                url: String::from(DEFAULT_FEED_URL),
            }],
        }
    }
}

/// One named calendar feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedConfig {
    /// Feed label shown in logs.
    pub name: String,
    /// Feed URL.
    pub url: String,
}

impl FeedConfig {
    /// Parses the feed URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn parsed_url(&self) -> Result<Url> {
        Url::parse(&self.url).with_context(|| format!("invalid URL for feed {}", self.name))
    }
}

/// Channel seed list.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChannelsConfig {
    /// Channels written by `init-db`.
    pub seed: Vec<SeedChannel>,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            seed: NOVA_CHANNELS
                .iter()
                .map(|(id, name)| SeedChannel {
                    channel_id: String::from(*id),
                    name: String::from(*name),
                })
                .collect(),
        }
    }
}

impl ChannelsConfig {
    /// Converts the seed list for the channel store.
    #[must_use]
    pub fn to_seeds(&self) -> Vec<ChannelSeed> {
        self.seed
            .iter()
            .map(|s| ChannelSeed::new(s.channel_id.clone(), s.name.clone()))
            .collect()
    }
}

/// One seed channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedChannel {
    /// EPG channel identifier.
    pub channel_id: String,
    /// Display name.
    pub name: String,
}

/// Default day windows when `--days` is not given.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DaysConfig {
    /// `tv`: days of listings to scan.
    pub tv: u32,
    /// `events`: days ahead to include.
    pub events: u32,
    /// `rugbypass`: days ahead to check.
    pub rugbypass: u32,
}

impl Default for DaysConfig {
    fn default() -> Self {
        Self {
            tv: 1,
            events: 14,
            rugbypass: 7,
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Parses the EPG endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL.
    pub fn epg_endpoint(&self) -> Result<Url> {
        Url::parse(&self.epg.endpoint)
            .with_context(|| format!("invalid EPG endpoint: {}", self.epg.endpoint))
    }
}
