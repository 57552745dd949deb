//! Record dashboard library.
//!
//! Users, posts, and comments are fetched from a public REST API and merged
//! with edits persisted on the local machine. The [`domain`] module owns the
//! merge and reconciliation rules; [`outbound`] adapts HTTP and the slot
//! store to its ports, and [`inbound`] drives it from the command line.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::DashboardSettings;
