//! Dashboard settings loaded via OrthoConfig.
//!
//! Every value can be supplied as a `DASHBOARD_*` environment variable; the
//! accessors fall back to defaults when a value is absent.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::MergePolicy;
use crate::outbound::placeholder::DEFAULT_BASE_URL;

const DEFAULT_DATA_DIR: &str = ".dashboard";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the remote API, the local data directory, and logging.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct DashboardSettings {
    /// Base URL of the placeholder API.
    pub api_base_url: Option<String>,
    /// Directory holding the persisted slots.
    pub data_dir: Option<PathBuf>,
    /// Per-request timeout in seconds. Zero disables the timeout.
    pub request_timeout_secs: Option<u64>,
    /// Merge local records by concatenation instead of replacement.
    #[ortho_config(default = false)]
    pub legacy_merge: bool,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl DashboardSettings {
    /// Return the configured API base URL, falling back to the public one.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Return the configured data directory, falling back to `.dashboard`.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Request timeout, or `None` when disabled with zero.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Merge policy selected by `legacy_merge`.
    #[must_use]
    pub const fn merge_policy(&self) -> MergePolicy {
        if self.legacy_merge {
            MergePolicy::Concatenate
        } else {
            MergePolicy::LocalWins
        }
    }
}
