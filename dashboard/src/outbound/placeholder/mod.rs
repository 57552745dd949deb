//! Remote API adapters.
//!
//! [`PlaceholderHttpSource`] reads the three collections over HTTP;
//! [`OfflineSource`] fails every fetch so a load falls back to local data.

mod dto;
mod http_source;
mod offline;

pub use http_source::{DEFAULT_BASE_URL, PlaceholderHttpSource};
pub use offline::OfflineSource;
