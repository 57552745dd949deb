//! Driven port for the persisted favourites, local edits, and theme.
//!
//! Reads never fail: a slot that is absent or unreadable comes back empty and
//! its name is reported in [`LocalSnapshot::reset_slots`]. Writes do fail,
//! and the reconciler decides what to tell the user.

use super::define_port_error;
use crate::domain::records::{Comment, Favorites, Post, Theme, User};

/// Slot holding the favourite user ids.
pub const FAVORITES_SLOT: &str = "favorites";
/// Slot holding locally created or edited users.
pub const LOCAL_USERS_SLOT: &str = "localUsers";
/// Slot holding locally created or edited posts.
pub const LOCAL_POSTS_SLOT: &str = "localPosts";
/// Slot holding locally created or edited comments.
pub const LOCAL_COMMENTS_SLOT: &str = "localComments";
/// Slot holding the theme preference.
pub const THEME_SLOT: &str = "theme";

/// The four persisted record collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalRecords {
    /// Favourite user ids.
    pub favorites: Favorites,
    /// Local users.
    pub users: Vec<User>,
    /// Local posts.
    pub posts: Vec<Post>,
    /// Local comments.
    pub comments: Vec<Comment>,
}

/// Everything read from the store at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalSnapshot {
    /// Persisted collections.
    pub records: LocalRecords,
    /// Persisted theme, light when absent.
    pub theme: Theme,
    /// Slots that held unreadable data and were treated as empty.
    pub reset_slots: Vec<String>,
}

define_port_error! {
    /// Errors surfaced while persisting local state.
    pub enum LocalStoreError {
        /// A collection could not be serialised.
        Encode { slot: String, message: String } =>
            "failed to encode slot {slot}: {message}",
        /// The backing store rejected the write.
        Write { slot: String, message: String } =>
            "failed to write slot {slot}: {message}",
    }
}

/// Port for reading and writing the persisted slots.
#[cfg_attr(test, mockall::automock)]
pub trait LocalStore: Send + Sync {
    /// Read every slot, substituting empty values for unreadable ones.
    fn load(&self) -> LocalSnapshot;

    /// Persist all four collections.
    ///
    /// # Errors
    ///
    /// Returns [`LocalStoreError`] when any slot cannot be written. Slots
    /// written before the failure keep their new contents.
    fn save(&self, records: &LocalRecords) -> Result<(), LocalStoreError>;

    /// Persist the theme preference.
    ///
    /// # Errors
    ///
    /// Returns [`LocalStoreError::Write`] when the slot cannot be written.
    fn save_theme(&self, theme: Theme) -> Result<(), LocalStoreError>;
}

/// Fixture implementation that reads nothing and accepts every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureLocalStore;

impl LocalStore for FixtureLocalStore {
    fn load(&self) -> LocalSnapshot {
        LocalSnapshot::default()
    }

    fn save(&self, _records: &LocalRecords) -> Result<(), LocalStoreError> {
        Ok(())
    }

    fn save_theme(&self, _theme: Theme) -> Result<(), LocalStoreError> {
        Ok(())
    }
}
