//! Fetch layer.
//!
//! A fetch is an ordered list of strategies (HTTP client, `curl`
//! subprocess) tried in sequence until one returns a body.

mod strategy;
mod transport;

#[allow(clippy::module_name_repetitions)]
pub use strategy::{FetchStrategy, Fetcher};
pub use transport::{DEFAULT_CIPHERS, DEFAULT_TIMEOUT, TlsPolicy, TransportConfig};
