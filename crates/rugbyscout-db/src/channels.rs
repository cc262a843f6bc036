//! Channel table operations.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// A channel identifier/name pair used to seed the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSeed {
    /// EPG channel identifier.
    pub channel_id: String,
    /// Display name.
    pub name: String,
}

impl ChannelSeed {
    /// Creates a new seed entry.
    #[must_use]
    pub fn new(channel_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            name: name.into(),
        }
    }
}

/// A channel row read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredChannel {
    /// Internal row id.
    pub id: i64,
    /// EPG channel identifier (unique).
    pub channel_id: String,
    /// Display name, if one was recorded.
    pub name: Option<String>,
}

impl StoredChannel {
    /// Name to show for this channel, falling back to `Channel {channel_id}`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Channel {}", self.channel_id))
    }
}

/// Inserts seed channels, ignoring identifiers that already exist.
///
/// Returns the number of rows actually inserted.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn seed_channels(conn: &Connection, seeds: &[ChannelSeed]) -> Result<usize> {
    let tx = conn
        .unchecked_transaction()
        .context("failed to begin transaction")?;

    let mut stmt = tx
        .prepare("INSERT OR IGNORE INTO channels (channel_id, name) VALUES (?1, ?2)")
        .context("failed to prepare channels insert")?;

    let mut inserted: usize = 0;
    for seed in seeds {
        let changed = stmt
            .execute(rusqlite::params![seed.channel_id, seed.name])
            .with_context(|| format!("failed to insert channel {}", seed.channel_id))?;
        inserted = inserted.saturating_add(changed);
    }

    drop(stmt);
    tx.commit().context("failed to commit channels")?;
    Ok(inserted)
}

/// Loads all channels in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_channels(conn: &Connection) -> Result<Vec<StoredChannel>> {
    let mut stmt = conn
        .prepare("SELECT id, channel_id, name FROM channels ORDER BY id")
        .context("failed to prepare channels query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(StoredChannel {
                id: row.get(0)?,
                channel_id: row.get(1)?,
                name: row.get(2)?,
            })
        })
        .context("failed to query channels")?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to read channels rows")
}
