//! Remote loader and load generations.
//!
//! A load is split into three steps so racing loads can be ordered:
//! [`LoadGenerations::begin`] hands out a ticket, [`RemoteLoader::fetch_all`]
//! runs the three fetches as a fork-join, and [`LoadGenerations::try_commit`]
//! admits only results newer than the last committed load.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{RemoteSnapshot, RemoteSource, RemoteSourceError};

/// Generation number attached to one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    /// Generation number.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// Issued and committed load generations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadGenerations {
    issued: u64,
    committed: u64,
}

impl LoadGenerations {
    /// Issue the next ticket.
    pub const fn begin(&mut self) -> LoadTicket {
        self.issued = self.issued.saturating_add(1);
        LoadTicket(self.issued)
    }

    /// Record `ticket` as committed when it is newer than the last commit.
    ///
    /// Returns `false` for a stale ticket, whose results must be discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard::domain::loader::LoadGenerations;
    ///
    /// let mut generations = LoadGenerations::default();
    /// let first = generations.begin();
    /// let second = generations.begin();
    /// assert!(generations.try_commit(second));
    /// assert!(!generations.try_commit(first));
    /// ```
    pub const fn try_commit(&mut self, ticket: LoadTicket) -> bool {
        if ticket.0 <= self.committed || ticket.0 > self.issued {
            return false;
        }
        self.committed = ticket.0;
        true
    }

    /// Whether any load has committed.
    #[must_use]
    pub const fn has_committed(&self) -> bool {
        self.committed > 0
    }
}

/// Fetches the three remote collections concurrently.
#[derive(Clone)]
pub struct RemoteLoader {
    source: Arc<dyn RemoteSource>,
}

impl RemoteLoader {
    /// Create a loader over `source`.
    #[must_use]
    pub const fn new(source: Arc<dyn RemoteSource>) -> Self {
        Self { source }
    }

    /// Fetch users, posts, and comments. Any single failure fails the load.
    ///
    /// # Errors
    ///
    /// Returns the first [`RemoteSourceError`] observed.
    pub async fn fetch_all(&self) -> Result<RemoteSnapshot, RemoteSourceError> {
        let (users, posts, comments) = tokio::try_join!(
            self.source.fetch_users(),
            self.source.fetch_posts(),
            self.source.fetch_comments(),
        )?;
        debug!(
            users = users.len(),
            posts = posts.len(),
            comments = comments.len(),
            "fetched remote collections"
        );
        Ok(RemoteSnapshot {
            users,
            posts,
            comments,
        })
    }
}
