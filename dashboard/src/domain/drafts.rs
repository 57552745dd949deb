//! Field sets submitted by the presentation layer for create and update.
//!
//! Drafts are validated with presence checks only; validation happens before
//! any collection is touched.

use crate::domain::DomainError;
use crate::domain::records::{Comment, CommentId, Post, PostId, User, UserId};

/// Message for a missing required field.
pub const MISSING_FIELDS: &str = "Please fill all fields";
/// Message for a post without an author.
pub const MISSING_AUTHOR: &str = "Please select a user";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Editable user fields. `name`, `username`, and `email` are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    /// Full name.
    pub name: String,
    /// Login handle.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Personal website.
    pub website: String,
}

impl UserDraft {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] with [`MISSING_FIELDS`] when a required field is
    /// blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if [&self.name, &self.username, &self.email]
            .into_iter()
            .any(|field| is_blank(field))
        {
            return Err(DomainError::invalid_request(MISSING_FIELDS));
        }
        Ok(())
    }

    pub(crate) fn into_record(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            username: self.username,
            email: self.email,
            phone: self.phone,
            website: self.website,
        }
    }

    pub(crate) fn apply_to(&self, user: &mut User) {
        user.name.clone_from(&self.name);
        user.username.clone_from(&self.username);
        user.email.clone_from(&self.email);
        user.phone.clone_from(&self.phone);
        user.website.clone_from(&self.website);
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            website: user.website.clone(),
        }
    }
}

/// Editable post fields. The author and both text fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    /// Author reference; `None` when no author was chosen.
    pub user_id: Option<UserId>,
    /// Headline.
    pub title: String,
    /// Text content.
    pub body: String,
}

impl PostDraft {
    /// Check the author first, then the text fields.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] with [`MISSING_AUTHOR`] or [`MISSING_FIELDS`].
    pub fn validate(&self) -> Result<UserId, DomainError> {
        let Some(user_id) = self.user_id else {
            return Err(DomainError::invalid_request(MISSING_AUTHOR));
        };
        if is_blank(&self.title) || is_blank(&self.body) {
            return Err(DomainError::invalid_request(MISSING_FIELDS));
        }
        Ok(user_id)
    }

    pub(crate) fn into_record(self, id: PostId, user_id: UserId) -> Post {
        Post {
            id,
            user_id,
            title: self.title,
            body: self.body,
        }
    }

    pub(crate) fn apply_to(&self, post: &mut Post, user_id: UserId) {
        post.user_id = user_id;
        post.title.clone_from(&self.title);
        post.body.clone_from(&self.body);
    }
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self {
            user_id: Some(post.user_id),
            title: post.title.clone(),
            body: post.body.clone(),
        }
    }
}

/// Editable comment fields. Every text field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    /// Parent post reference.
    pub post_id: PostId,
    /// Commenter name.
    pub name: String,
    /// Commenter email.
    pub email: String,
    /// Text content.
    pub body: String,
}

impl CommentDraft {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] with [`MISSING_FIELDS`] when a field is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if [&self.name, &self.email, &self.body]
            .into_iter()
            .any(|field| is_blank(field))
        {
            return Err(DomainError::invalid_request(MISSING_FIELDS));
        }
        Ok(())
    }

    pub(crate) fn into_record(self, id: CommentId) -> Comment {
        Comment {
            id,
            post_id: self.post_id,
            name: self.name,
            email: self.email,
            body: self.body,
        }
    }

    pub(crate) fn apply_to(&self, comment: &mut Comment) {
        comment.post_id = self.post_id;
        comment.name.clone_from(&self.name);
        comment.email.clone_from(&self.email);
        comment.body.clone_from(&self.body);
    }
}

impl From<&Comment> for CommentDraft {
    fn from(comment: &Comment) -> Self {
        Self {
            post_id: comment.post_id,
            name: comment.name.clone(),
            email: comment.email.clone(),
            body: comment.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "test assertions fail fast")]

    use rstest::rstest;

    use super::*;

    fn post_draft(user_id: Option<u64>, title: &str, body: &str) -> PostDraft {
        PostDraft {
            user_id: user_id.map(UserId::new),
            title: title.to_owned(),
            body: body.to_owned(),
        }
    }

    #[rstest]
    #[case::no_author(post_draft(None, "t", "b"), MISSING_AUTHOR)]
    #[case::no_author_and_no_title(post_draft(None, "", ""), MISSING_AUTHOR)]
    #[case::blank_title(post_draft(Some(1), " ", "b"), MISSING_FIELDS)]
    #[case::blank_body(post_draft(Some(1), "t", ""), MISSING_FIELDS)]
    fn post_validation_reports_first_problem(#[case] draft: PostDraft, #[case] expected: &str) {
        let err = draft.validate().expect_err("draft should be rejected");
        assert_eq!(err.message(), expected);
    }

    #[test]
    fn complete_post_returns_author() {
        assert_eq!(post_draft(Some(4), "t", "b").validate(), Ok(UserId::new(4)));
    }

    #[rstest]
    #[case::missing_name("", "bret", "b@x.io", false)]
    #[case::missing_username("Leanne", "", "b@x.io", false)]
    #[case::missing_email("Leanne", "bret", "  ", false)]
    #[case::complete("Leanne", "bret", "b@x.io", true)]
    fn user_validation_requires_identity_fields(
        #[case] name: &str,
        #[case] username: &str,
        #[case] email: &str,
        #[case] valid: bool,
    ) {
        let draft = UserDraft {
            name: name.to_owned(),
            username: username.to_owned(),
            email: email.to_owned(),
            ..UserDraft::default()
        };
        assert_eq!(draft.validate().is_ok(), valid);
    }

    #[test]
    fn comment_validation_requires_every_field() {
        let draft = CommentDraft {
            post_id: PostId::new(1),
            name: "n".to_owned(),
            email: String::new(),
            body: "b".to_owned(),
        };
        let err = draft.validate().expect_err("missing email");
        assert_eq!(err.message(), MISSING_FIELDS);
    }

    #[test]
    fn user_draft_round_trips_through_apply() {
        let mut user = UserDraft {
            name: "A".to_owned(),
            username: "a".to_owned(),
            email: "a@x.io".to_owned(),
            phone: "1".to_owned(),
            website: "a.io".to_owned(),
        }
        .into_record(UserId::new(9));
        let mut edit = UserDraft::from(&user);
        edit.website = "b.io".to_owned();

        edit.apply_to(&mut user);

        assert_eq!(user.website, "b.io");
        assert_eq!(user.id, UserId::new(9));
        assert_eq!(user.name, "A");
    }
}
