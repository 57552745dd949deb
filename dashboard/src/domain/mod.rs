//! Domain model and services.
//!
//! Purpose: define the records, the merge engine, and the reconciler that
//! keeps working and local-only collections consistent. Everything that
//! touches the network, the filesystem, or the terminal sits behind the
//! traits in [`ports`].

pub mod commands;
pub mod dashboard;
pub mod drafts;
pub mod error;
pub mod ids;
pub mod loader;
pub mod merge;
pub mod ports;
pub mod records;
pub mod search;
pub mod views;

pub use self::commands::{Action, Command, CommandOutcome, Fields};
pub use self::dashboard::{Dashboard, FavoriteToggle, LoadCommit, Mutation, Removal};
pub use self::drafts::{CommentDraft, PostDraft, UserDraft};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::merge::MergePolicy;
pub use self::records::{
    Comment, CommentId, EntityKind, Favorites, Post, PostId, Record, Theme, User, UserId,
};
pub use self::views::{PostCard, Summary};
