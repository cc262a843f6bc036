//! Local channel store.
//!
//! Uses `rusqlite` (bundled `SQLite`) to keep the small table of EPG
//! channel identifiers the TV pipeline iterates over.

/// Channel table operations.
pub mod channels;
mod connection;
mod migrations;

#[allow(clippy::module_name_repetitions)]
pub use channels::{ChannelSeed, StoredChannel, list_channels, seed_channels};
pub use connection::{STORE_FILE_NAME, home_dir, init_store, open_store, resolve_store_path};
