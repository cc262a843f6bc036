//! Store file location and connection management.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OpenFlags};

use super::channels::{ChannelSeed, seed_channels};
use super::migrations::run_migrations;

/// File name of the channel store inside the data directory.
pub const STORE_FILE_NAME: &str = "stations.db";

/// Home directory from `HOME`; the root of the default data and config
/// locations.
///
/// # Errors
///
/// Returns an error if `HOME` is not set.
pub fn home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .context("HOME environment variable is not set")
}

/// Resolves the channel store file path.
///
/// - If `dir` is `Some`, uses `{dir}/stations.db`.
/// - Otherwise uses `~/.local/share/rugbyscout/stations.db`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_store_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(STORE_FILE_NAME));
    }

    Ok(home_dir()?
        .join(".local")
        .join("share")
        .join("rugbyscout")
        .join(STORE_FILE_NAME))
}

/// Opens an existing channel store and brings its schema up to date.
///
/// The store is never created here: a missing file means the channel
/// table was never seeded, and there is nothing to check.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be opened, or
/// migrations fail.
pub fn open_store(path: &Path) -> Result<Connection> {
    if !path.exists() {
        bail!(
            "channel store not found: {} (run `rugbyscout init-db` first)",
            path.display()
        );
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("failed to open channel store {}", path.display()))?;

    run_migrations(&conn).context("channel store migration failed")?;

    Ok(conn)
}

/// Creates (if needed) and seeds the channel store.
///
/// Seeding is idempotent: identifiers already present are left untouched.
/// Returns the open connection and the number of newly inserted channels.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created, migrations
/// fail, or an insert fails.
pub fn init_store(path: &Path, seeds: &[ChannelSeed]) -> Result<(Connection, usize)> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open channel store {}", path.display()))?;

    run_migrations(&conn).context("channel store migration failed")?;

    let inserted = seed_channels(&conn, seeds).context("failed to seed channels")?;
    tracing::debug!(path = %path.display(), inserted, "Channel store initialized");

    Ok((conn, inserted))
}
