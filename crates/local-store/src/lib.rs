//! Durable string-keyed slot storage.
//!
//! This crate provides a small key-value store that persists each slot as
//! one file inside a data directory. It plays the role browser local storage
//! plays for a web page: callers read and write whole string values by key
//! and own any encoding of those values. The crate is independent of the
//! dashboard domain types so it can be exercised on its own.
//!
//! # Example
//!
//! ```
//! use local_store::SlotStore;
//!
//! let dir = tempfile::tempdir().expect("temp dir");
//! let path = camino::Utf8Path::from_path(dir.path()).expect("utf-8 temp dir");
//! let store = SlotStore::open(path).expect("open store");
//!
//! store.set("theme", "dark").expect("write slot");
//! assert_eq!(store.get("theme").expect("read slot").as_deref(), Some("dark"));
//! assert_eq!(store.get("favorites").expect("read slot"), None);
//! ```

mod atomic_io;
mod error;
mod slot_store;

pub use error::StoreError;
pub use slot_store::{SlotStore, is_valid_key};
