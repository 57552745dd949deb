//! Driven port for fetching the three remote collections.
//!
//! The domain owns the record shapes; adapters translate transport payloads
//! into them before returning.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::records::{Comment, Post, User};

/// One successful fetch of every remote collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteSnapshot {
    /// Remote users in server order.
    pub users: Vec<User>,
    /// Remote posts in server order.
    pub posts: Vec<Post>,
    /// Remote comments in server order.
    pub comments: Vec<Comment>,
}

define_port_error! {
    /// Errors surfaced while calling the remote API.
    pub enum RemoteSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "remote transport failed: {message}",
        /// The request exceeded its timeout.
        Timeout { message: String } =>
            "remote timeout: {message}",
        /// The server answered with a non-success status.
        Status { status: u16, message: String } =>
            "remote returned status {status}: {message}",
        /// The response body was not the expected JSON array.
        Decode { message: String } =>
            "remote response decode failed: {message}",
    }
}

/// Port for reading users, posts, and comments from the remote API.
///
/// Each call is independent; the loader issues them concurrently and treats
/// any single failure as failure of the whole load.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch every user.
    async fn fetch_users(&self) -> Result<Vec<User>, RemoteSourceError>;

    /// Fetch every post.
    async fn fetch_posts(&self) -> Result<Vec<Post>, RemoteSourceError>;

    /// Fetch every comment.
    async fn fetch_comments(&self) -> Result<Vec<Comment>, RemoteSourceError>;
}

/// Fixture implementation returning empty collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRemoteSource;

#[async_trait]
impl RemoteSource for FixtureRemoteSource {
    async fn fetch_users(&self) -> Result<Vec<User>, RemoteSourceError> {
        Ok(Vec::new())
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, RemoteSourceError> {
        Ok(Vec::new())
    }

    async fn fetch_comments(&self) -> Result<Vec<Comment>, RemoteSourceError> {
        Ok(Vec::new())
    }
}
