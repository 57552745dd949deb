//! DTOs for decoding placeholder API responses.
//!
//! Responses decode into these transport shapes first and are then mapped
//! into domain records in one pass. Fields the dashboard does not keep, such
//! as a user's `address` and `company`, are ignored.

use serde::Deserialize;

use crate::domain::{Comment, CommentId, Post, PostId, User, UserId};

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: u64,
    pub(super) name: String,
    pub(super) username: String,
    pub(super) email: String,
    #[serde(default)]
    pub(super) phone: String,
    #[serde(default)]
    pub(super) website: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostDto {
    pub(super) id: u64,
    pub(super) user_id: u64,
    pub(super) title: String,
    pub(super) body: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommentDto {
    pub(super) id: u64,
    pub(super) post_id: u64,
    pub(super) name: String,
    pub(super) email: String,
    pub(super) body: String,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: UserId::new(dto.id),
            name: dto.name,
            username: dto.username,
            email: dto.email,
            phone: dto.phone,
            website: dto.website,
        }
    }
}

impl From<PostDto> for Post {
    fn from(dto: PostDto) -> Self {
        Self {
            id: PostId::new(dto.id),
            user_id: UserId::new(dto.user_id),
            title: dto.title,
            body: dto.body,
        }
    }
}

impl From<CommentDto> for Comment {
    fn from(dto: CommentDto) -> Self {
        Self {
            id: CommentId::new(dto.id),
            post_id: PostId::new(dto.post_id),
            name: dto.name,
            email: dto.email,
            body: dto.body,
        }
    }
}
