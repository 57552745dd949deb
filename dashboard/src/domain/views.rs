//! Read models handed to the renderer.

use crate::domain::records::{Post, Theme};

/// Author label used when a post references a user that is not loaded.
pub const UNKNOWN_AUTHOR: &str = "Unknown User";

/// A post with the labels the posts table shows beside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    /// The post itself.
    pub post: Post,
    /// Author name, or [`UNKNOWN_AUTHOR`].
    pub author: String,
    /// Number of comments whose `post_id` matches.
    pub comment_count: usize,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Working users.
    pub users: usize,
    /// Working posts.
    pub posts: usize,
    /// Working comments.
    pub comments: usize,
    /// Favourites naming a working user.
    pub favorites: usize,
    /// Active colour scheme.
    pub theme: Theme,
}
