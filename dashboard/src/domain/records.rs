//! Record types shared by the merge engine, reconciler, and adapters.
//!
//! Field names serialise in camelCase so stored slots stay readable by the
//! same JSON shape the remote API returns.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw identifier value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_record_id! {
    /// Identifier of a [`User`].
    UserId
}

define_record_id! {
    /// Identifier of a [`Post`].
    PostId
}

define_record_id! {
    /// Identifier of a [`Comment`].
    CommentId
}

/// The three record collections the dashboard manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// [`User`] records.
    User,
    /// [`Post`] records.
    Post,
    /// [`Comment`] records.
    Comment,
}

impl EntityKind {
    /// Lower-case noun used in prompts and messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Common view over the record types so collections can be merged and
/// reconciled generically.
pub trait Record: Clone {
    /// Identifier type of the record.
    type Id: Copy + Eq + Hash + fmt::Display + fmt::Debug;

    /// Collection the record belongs to.
    const KIND: EntityKind;

    /// Identifier of this record.
    fn id(&self) -> Self::Id;
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Full name.
    pub name: String,
    /// Login handle.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Phone number, free form.
    #[serde(default)]
    pub phone: String,
    /// Personal website, free form.
    #[serde(default)]
    pub website: String,
}

impl Record for User {
    type Id = UserId;
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> UserId {
        self.id
    }
}

/// A post authored by a user.
///
/// `user_id` is not enforced: it may reference a user that is not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Stable identifier.
    pub id: PostId,
    /// Author reference.
    pub user_id: UserId,
    /// Headline.
    pub title: String,
    /// Text content.
    pub body: String,
}

impl Record for Post {
    type Id = PostId;
    const KIND: EntityKind = EntityKind::Post;

    fn id(&self) -> PostId {
        self.id
    }
}

/// A comment on a post.
///
/// `post_id` is not enforced: it may reference a post that is not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Stable identifier.
    pub id: CommentId,
    /// Parent post reference.
    pub post_id: PostId,
    /// Commenter name or subject line.
    pub name: String,
    /// Commenter email.
    pub email: String,
    /// Text content.
    pub body: String,
}

impl Record for Comment {
    type Id = CommentId;
    const KIND: EntityKind = EntityKind::Comment;

    fn id(&self) -> CommentId {
        self.id
    }
}

/// Set of favourite user ids.
pub type Favorites = BTreeSet<UserId>;

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    /// Light scheme, the default.
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Read a stored value. Anything other than `dark` reads as light.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::Theme;
    ///
    /// assert_eq!(Theme::from_stored("dark"), Theme::Dark);
    /// assert_eq!(Theme::from_stored("purple"), Theme::Light);
    /// ```
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        if raw.trim() == "dark" {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// The opposite scheme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
