//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod confirmation;
mod local_store;
mod notifier;
mod remote_source;
mod renderer;

use std::sync::Arc;

#[cfg(test)]
pub use confirmation::MockConfirmationGate;
pub use confirmation::{AlwaysConfirm, ConfirmationGate};
#[cfg(test)]
pub use local_store::MockLocalStore;
pub use local_store::{
    FAVORITES_SLOT, FixtureLocalStore, LOCAL_COMMENTS_SLOT, LOCAL_POSTS_SLOT, LOCAL_USERS_SLOT,
    LocalRecords, LocalSnapshot, LocalStore, LocalStoreError, THEME_SLOT,
};
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{FixtureNotifier, NoticeKind, Notifier};
#[cfg(test)]
pub use remote_source::MockRemoteSource;
pub use remote_source::{FixtureRemoteSource, RemoteSnapshot, RemoteSource, RemoteSourceError};
#[cfg(test)]
pub use renderer::MockRenderer;
pub use renderer::{FixtureRenderer, Renderer};

/// Bundle of the driven ports a [`crate::domain::Dashboard`] needs.
#[derive(Clone)]
pub struct DashboardPorts {
    /// Remote collections.
    pub remote: Arc<dyn RemoteSource>,
    /// Persisted local state.
    pub store: Arc<dyn LocalStore>,
    /// Notification sink.
    pub notifier: Arc<dyn Notifier>,
    /// Re-render sink.
    pub renderer: Arc<dyn Renderer>,
    /// Delete confirmation.
    pub gate: Arc<dyn ConfirmationGate>,
}

impl DashboardPorts {
    /// Bundle ports that fetch nothing, store nothing, and confirm every
    /// delete.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard::domain::ports::DashboardPorts;
    ///
    /// let ports = DashboardPorts::fixture();
    /// assert!(ports.gate.confirm("Are you sure?"));
    /// ```
    #[must_use]
    pub fn fixture() -> Self {
        Self {
            remote: Arc::new(FixtureRemoteSource),
            store: Arc::new(FixtureLocalStore),
            notifier: Arc::new(FixtureNotifier),
            renderer: Arc::new(FixtureRenderer),
            gate: Arc::new(AlwaysConfirm),
        }
    }
}
