//! Driven port receiving re-render signals.
//!
//! The reconciler calls these after every load and mutation with the current
//! working collections. Implementations decide what to display.

use crate::domain::records::{Comment, Favorites, PostId, User};
use crate::domain::views::{PostCard, Summary};

/// Port for the presentation layer's views.
#[cfg_attr(test, mockall::automock)]
pub trait Renderer: Send + Sync {
    /// Show the users table with favourite markers.
    fn render_users(&self, users: &[User], favorites: &Favorites);

    /// Show the posts table.
    fn render_posts(&self, posts: &[PostCard]);

    /// Show the comments attached to one post.
    fn render_comments(&self, post_id: PostId, comments: &[Comment]);

    /// Show the counters.
    fn render_summary(&self, summary: &Summary);
}

/// Fixture implementation that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRenderer;

impl Renderer for FixtureRenderer {
    fn render_users(&self, _users: &[User], _favorites: &Favorites) {}

    fn render_posts(&self, _posts: &[PostCard]) {}

    fn render_comments(&self, _post_id: PostId, _comments: &[Comment]) {}

    fn render_summary(&self, _summary: &Summary) {}
}
