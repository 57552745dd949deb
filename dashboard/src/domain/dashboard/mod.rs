//! Dashboard controller owning the working and local-only collections.
//!
//! One [`Dashboard`] value is the single owner of all mutable state. The
//! presentation layer reads through its accessors and writes through the
//! mutation operations or the command table in
//! [`crate::domain::commands`].
//!
//! Invariants kept by every operation:
//! - each record in a local-only collection also appears, with identical
//!   fields, as the first working record with its id;
//! - favourites only name users present in the working users;
//! - deleting a post removes its comments from both comment collections.

mod reconcile;

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ids::IdAllocator;
use crate::domain::loader::{LoadGenerations, LoadTicket, RemoteLoader};
use crate::domain::merge::{MergePolicy, merge};
use crate::domain::ports::{
    DashboardPorts, LocalRecords, NoticeKind, RemoteSnapshot, RemoteSourceError,
};
use crate::domain::records::{
    Comment, CommentId, EntityKind, Favorites, Post, PostId, Record, Theme, User, UserId,
};
use crate::domain::search::search_posts;
use crate::domain::views::{PostCard, Summary, UNKNOWN_AUTHOR};

/// Notice after a load that merged remote data.
pub const LOAD_SUCCEEDED: &str = "Data loaded successfully";
/// Notice after a load that fell back to local data.
pub const LOAD_FELL_BACK: &str = "Failed to load data from API, using local data";
/// Notice after a failed write to local storage.
pub const SAVE_FAILED: &str = "Failed to save data to local storage";

/// Result of committing a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadCommit {
    /// The working collections were rebuilt.
    Applied {
        /// `false` when the remote fetch failed and only local data was used.
        from_remote: bool,
    },
    /// A newer load had already committed; nothing changed.
    Stale,
}

/// Outcome of a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation<T> {
    /// The change was applied; carries the stored record.
    Applied(T),
    /// No working record has the requested id.
    NotFound,
    /// No load has committed yet.
    NotLoaded,
}

/// Outcome of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The record was removed.
    Removed {
        /// Comments removed with a deleted post.
        cascaded_comments: usize,
    },
    /// The confirmation gate declined.
    Declined,
    /// No working record has the requested id.
    NotFound,
    /// No load has committed yet.
    NotLoaded,
}

/// Outcome of a favourite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    /// The user is now a favourite.
    Added,
    /// The user is no longer a favourite.
    Removed,
    /// No working user has the requested id.
    NotFound,
    /// No load has committed yet.
    NotLoaded,
}

#[derive(Debug, Clone, Default)]
struct DashboardState {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    local: LocalRecords,
    theme: Theme,
}

/// Controller for the record dashboard.
pub struct Dashboard {
    ports: DashboardPorts,
    state: DashboardState,
    ids: IdAllocator,
    generations: LoadGenerations,
    policy: MergePolicy,
}

impl Dashboard {
    /// Read persisted state and build an unloaded dashboard.
    ///
    /// Slots the store could not read are reported with one info notice.
    pub fn open(ports: DashboardPorts, clock: Arc<dyn Clock>, policy: MergePolicy) -> Self {
        let snapshot = ports.store.load();
        if !snapshot.reset_slots.is_empty() {
            ports.notifier.notify(
                NoticeKind::Info,
                &format!(
                    "Saved data could not be read and was reset: {}",
                    snapshot.reset_slots.join(", ")
                ),
            );
        }
        debug!(
            local_users = snapshot.records.users.len(),
            local_posts = snapshot.records.posts.len(),
            local_comments = snapshot.records.comments.len(),
            favorites = snapshot.records.favorites.len(),
            "opened dashboard"
        );
        Self {
            ports,
            state: DashboardState {
                local: snapshot.records,
                theme: snapshot.theme,
                ..DashboardState::default()
            },
            ids: IdAllocator::new(clock),
            generations: LoadGenerations::default(),
            policy,
        }
    }

    /// Issue a ticket for a new load.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.generations.begin();
        debug!(generation = ticket.generation(), "load started");
        ticket
    }

    /// Loader over the remote port, detached from `self` so a fetch can run
    /// while other operations proceed.
    #[must_use]
    pub fn loader(&self) -> RemoteLoader {
        RemoteLoader::new(Arc::clone(&self.ports.remote))
    }

    /// Merge fetched data into the working collections.
    ///
    /// A failed fetch contributes nothing, so the working collections become
    /// the local-only collections. Results for a ticket no newer than the
    /// last committed load are discarded.
    pub fn commit_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<RemoteSnapshot, RemoteSourceError>,
    ) -> LoadCommit {
        if !self.generations.try_commit(ticket) {
            debug!(generation = ticket.generation(), "discarding stale load");
            return LoadCommit::Stale;
        }
        let (remote, from_remote) = match fetched {
            Ok(snapshot) => (snapshot, true),
            Err(err) => {
                warn!(error = %err, "remote load failed, using local data");
                (RemoteSnapshot::default(), false)
            }
        };
        let working = merge(remote, &self.state.local, self.policy);
        self.state.users = working.users;
        self.state.posts = working.posts;
        self.state.comments = working.comments;
        info!(
            generation = ticket.generation(),
            from_remote,
            users = self.state.users.len(),
            posts = self.state.posts.len(),
            comments = self.state.comments.len(),
            "load committed"
        );
        if from_remote {
            self.notify(NoticeKind::Success, LOAD_SUCCEEDED);
        } else {
            self.notify(NoticeKind::Error, LOAD_FELL_BACK);
        }
        self.render_users();
        self.render_posts();
        self.render_summary();
        LoadCommit::Applied { from_remote }
    }

    /// Fetch remote data and commit it.
    pub async fn load(&mut self) -> LoadCommit {
        let ticket = self.begin_load();
        let fetched = self.loader().fetch_all().await;
        self.commit_load(ticket, fetched)
    }

    /// Whether a load has committed.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.generations.has_committed()
    }

    /// Merge policy in effect.
    #[must_use]
    pub const fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Working users.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    /// Working posts.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.state.posts
    }

    /// Working comments.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.state.comments
    }

    /// Local-only collections and favourites.
    #[must_use]
    pub const fn local(&self) -> &LocalRecords {
        &self.state.local
    }

    /// Favourite user ids.
    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.state.local.favorites
    }

    /// Active colour scheme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.state.theme
    }

    /// First working user with `id`.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        find_first(&self.state.users, id)
    }

    /// First working post with `id`.
    #[must_use]
    pub fn post(&self, id: PostId) -> Option<&Post> {
        find_first(&self.state.posts, id)
    }

    /// First working comment with `id`.
    #[must_use]
    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        find_first(&self.state.comments, id)
    }

    /// Comments attached to `post_id`, in working order.
    #[must_use]
    pub fn comments_for_post(&self, post_id: PostId) -> Vec<&Comment> {
        self.state
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .collect()
    }

    /// Author name for `post`, or [`UNKNOWN_AUTHOR`] when the user is not
    /// loaded.
    #[must_use]
    pub fn author_name(&self, post: &Post) -> &str {
        self.user(post.user_id)
            .map_or(UNKNOWN_AUTHOR, |user| user.name.as_str())
    }

    /// Posts whose title or body contains `query`, ignoring case.
    #[must_use]
    pub fn search_posts(&self, query: &str) -> Vec<&Post> {
        search_posts(&self.state.posts, query)
    }

    /// Counters for the summary cards.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            users: self.state.users.len(),
            posts: self.state.posts.len(),
            comments: self.state.comments.len(),
            favorites: self
                .state
                .local
                .favorites
                .iter()
                .filter(|id| self.user(**id).is_some())
                .count(),
            theme: self.state.theme,
        }
    }

    /// Build table rows for `posts`.
    #[must_use]
    pub fn post_cards<'a>(&self, posts: impl IntoIterator<Item = &'a Post>) -> Vec<PostCard> {
        posts
            .into_iter()
            .map(|post| PostCard {
                post: post.clone(),
                author: self.author_name(post).to_owned(),
                comment_count: self
                    .state
                    .comments
                    .iter()
                    .filter(|comment| comment.post_id == post.id)
                    .count(),
            })
            .collect()
    }

    /// Render the posts matching `query`.
    pub fn render_search(&self, query: &str) {
        let cards = self.post_cards(self.search_posts(query));
        self.ports.renderer.render_posts(&cards);
    }

    /// Render the comments of one post.
    pub fn render_comments(&self, post_id: PostId) {
        let comments: Vec<Comment> = self
            .comments_for_post(post_id)
            .into_iter()
            .cloned()
            .collect();
        self.ports.renderer.render_comments(post_id, &comments);
    }

    /// Flip the colour scheme and persist it.
    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        if let Err(err) = self.ports.store.save_theme(self.state.theme) {
            warn!(error = %err, "failed to persist theme");
            self.notify(NoticeKind::Error, SAVE_FAILED);
        }
        debug!(theme = %self.state.theme, "theme toggled");
        self.render_summary();
        self.state.theme
    }

    fn render_users(&self) {
        self.ports
            .renderer
            .render_users(&self.state.users, &self.state.local.favorites);
    }

    fn render_posts(&self) {
        let cards = self.post_cards(&self.state.posts);
        self.ports.renderer.render_posts(&cards);
    }

    fn render_summary(&self) {
        self.ports.renderer.render_summary(&self.summary());
    }

    fn refresh(&self, kind: EntityKind) {
        if kind == EntityKind::User {
            self.render_users();
        }
        self.render_posts();
        self.render_summary();
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        self.ports.notifier.notify(kind, message);
    }

    fn persist(&self) {
        if let Err(err) = self.ports.store.save(&self.state.local) {
            warn!(error = %err, "failed to persist local records");
            self.notify(NoticeKind::Error, SAVE_FAILED);
        }
    }
}

fn find_first<R: Record>(records: &[R], id: R::Id) -> Option<&R> {
    records.iter().find(|record| record.id() == id)
}
