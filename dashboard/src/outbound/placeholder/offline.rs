//! Remote source used when the network is switched off.

use async_trait::async_trait;

use crate::domain::ports::{RemoteSource, RemoteSourceError};
use crate::domain::{Comment, Post, User};

const OFFLINE: &str = "offline mode";

/// Source whose every fetch fails with a transport error.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

#[async_trait]
impl RemoteSource for OfflineSource {
    async fn fetch_users(&self) -> Result<Vec<User>, RemoteSourceError> {
        Err(RemoteSourceError::transport(OFFLINE))
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, RemoteSourceError> {
        Err(RemoteSourceError::transport(OFFLINE))
    }

    async fn fetch_comments(&self) -> Result<Vec<Comment>, RemoteSourceError> {
        Err(RemoteSourceError::transport(OFFLINE))
    }
}
