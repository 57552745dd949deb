//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **placeholder**: reqwest-backed client for the JSON placeholder API
//! - **storage**: slot-file persistence on top of the `local-store` crate
//!
//! Adapters translate between transport or storage formats and domain
//! records. They contain no business logic.

pub mod placeholder;
pub mod storage;
