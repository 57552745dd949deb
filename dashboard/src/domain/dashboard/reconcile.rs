//! Create, update, and delete operations that keep the working and
//! local-only collections in step.

use tracing::debug;

use super::{Dashboard, FavoriteToggle, Mutation, Removal};
use crate::domain::DomainError;
use crate::domain::drafts::{CommentDraft, PostDraft, UserDraft};
use crate::domain::ids::IdAllocator;
use crate::domain::ports::NoticeKind;
use crate::domain::records::{
    Comment, CommentId, EntityKind, Post, PostId, Record, User, UserId,
};

const USER_CREATED: &str = "User added successfully";
const USER_UPDATED: &str = "User updated successfully";
const USER_DELETED: &str = "User deleted successfully";
const POST_CREATED: &str = "Post added successfully";
const POST_UPDATED: &str = "Post updated successfully";
const POST_DELETED: &str = "Post and its comments deleted successfully";
const COMMENT_CREATED: &str = "Comment added successfully";
const COMMENT_UPDATED: &str = "Comment updated successfully";
const COMMENT_DELETED: &str = "Comment deleted successfully";
const FAVORITE_ADDED: &str = "User added to favorites";
const FAVORITE_REMOVED: &str = "User removed from favorites";

fn delete_prompt(kind: EntityKind) -> String {
    format!("Are you sure you want to delete this {kind}?")
}

impl Dashboard {
    /// Create a user with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when a required field is blank. Nothing is
    /// changed and an error notice is emitted.
    pub fn create_user(&mut self, draft: UserDraft) -> Result<Mutation<User>, DomainError> {
        if !self.is_loaded() {
            return Ok(Mutation::NotLoaded);
        }
        self.checked(draft.validate())?;
        let id = UserId::new(next_id(
            &mut self.ids,
            &self.state.users,
            &self.state.local.users,
        ));
        let user = draft.into_record(id);
        insert_created(&mut self.state.users, &mut self.state.local.users, &user);
        self.persist();
        debug!(user_id = %id, "user created");
        self.notify(NoticeKind::Success, USER_CREATED);
        self.refresh(EntityKind::User);
        Ok(Mutation::Applied(user))
    }

    /// Overwrite the fields of the first working user with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when a required field is blank.
    pub fn update_user(
        &mut self,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<Mutation<User>, DomainError> {
        if !self.is_loaded() {
            return Ok(Mutation::NotLoaded);
        }
        if self.user(id).is_none() {
            return Ok(Mutation::NotFound);
        }
        self.checked(draft.validate())?;
        let Some(user) = update_first(
            &mut self.state.users,
            &mut self.state.local.users,
            id,
            |user| draft.apply_to(user),
        ) else {
            return Ok(Mutation::NotFound);
        };
        self.persist();
        debug!(user_id = %id, "user updated");
        self.notify(NoticeKind::Success, USER_UPDATED);
        self.refresh(EntityKind::User);
        Ok(Mutation::Applied(user))
    }

    /// Delete a user after confirmation, dropping it from the favourites.
    pub fn delete_user(&mut self, id: UserId) -> Removal {
        if !self.is_loaded() {
            return Removal::NotLoaded;
        }
        if self.user(id).is_none() {
            return Removal::NotFound;
        }
        if !self.ports.gate.confirm(&delete_prompt(EntityKind::User)) {
            return Removal::Declined;
        }
        remove_first(&mut self.state.users, id);
        if remove_first(&mut self.state.local.users, id).is_some() {
            self.persist();
        }
        if self.state.local.favorites.remove(&id) {
            self.persist();
        }
        debug!(user_id = %id, "user deleted");
        self.notify(NoticeKind::Success, USER_DELETED);
        self.refresh(EntityKind::User);
        Removal::Removed {
            cascaded_comments: 0,
        }
    }

    /// Add or remove a user from the favourites.
    ///
    /// Only loaded users can be added; a favourite left over from an earlier
    /// session can always be removed.
    pub fn toggle_favorite(&mut self, id: UserId) -> FavoriteToggle {
        if !self.is_loaded() {
            return FavoriteToggle::NotLoaded;
        }
        let outcome = if self.state.local.favorites.remove(&id) {
            FavoriteToggle::Removed
        } else if self.user(id).is_some() {
            self.state.local.favorites.insert(id);
            FavoriteToggle::Added
        } else {
            return FavoriteToggle::NotFound;
        };
        self.persist();
        debug!(user_id = %id, ?outcome, "favourite toggled");
        if outcome == FavoriteToggle::Added {
            self.notify(NoticeKind::Success, FAVORITE_ADDED);
        } else {
            self.notify(NoticeKind::Info, FAVORITE_REMOVED);
        }
        self.refresh(EntityKind::User);
        outcome
    }

    /// Create a post with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when no author is chosen or a text field is
    /// blank.
    pub fn create_post(&mut self, draft: PostDraft) -> Result<Mutation<Post>, DomainError> {
        if !self.is_loaded() {
            return Ok(Mutation::NotLoaded);
        }
        let user_id = self.checked(draft.validate())?;
        let id = PostId::new(next_id(
            &mut self.ids,
            &self.state.posts,
            &self.state.local.posts,
        ));
        let post = draft.into_record(id, user_id);
        insert_created(&mut self.state.posts, &mut self.state.local.posts, &post);
        self.persist();
        debug!(post_id = %id, user_id = %user_id, "post created");
        self.notify(NoticeKind::Success, POST_CREATED);
        self.refresh(EntityKind::Post);
        Ok(Mutation::Applied(post))
    }

    /// Overwrite the fields of the first working post with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when no author is chosen or a text field is
    /// blank.
    pub fn update_post(
        &mut self,
        id: PostId,
        draft: &PostDraft,
    ) -> Result<Mutation<Post>, DomainError> {
        if !self.is_loaded() {
            return Ok(Mutation::NotLoaded);
        }
        if self.post(id).is_none() {
            return Ok(Mutation::NotFound);
        }
        let user_id = self.checked(draft.validate())?;
        let Some(post) = update_first(
            &mut self.state.posts,
            &mut self.state.local.posts,
            id,
            |post| draft.apply_to(post, user_id),
        ) else {
            return Ok(Mutation::NotFound);
        };
        self.persist();
        debug!(post_id = %id, "post updated");
        self.notify(NoticeKind::Success, POST_UPDATED);
        self.refresh(EntityKind::Post);
        Ok(Mutation::Applied(post))
    }

    /// Delete a post after confirmation together with its comments.
    pub fn delete_post(&mut self, id: PostId) -> Removal {
        if !self.is_loaded() {
            return Removal::NotLoaded;
        }
        if self.post(id).is_none() {
            return Removal::NotFound;
        }
        if !self.ports.gate.confirm(&delete_prompt(EntityKind::Post)) {
            return Removal::Declined;
        }
        remove_first(&mut self.state.posts, id);
        if remove_first(&mut self.state.local.posts, id).is_some() {
            self.persist();
        }
        let before = self.state.comments.len();
        self.state.comments.retain(|comment| comment.post_id != id);
        let cascaded_comments = before.saturating_sub(self.state.comments.len());
        self.state
            .local
            .comments
            .retain(|comment| comment.post_id != id);
        self.persist();
        debug!(post_id = %id, cascaded_comments, "post deleted");
        self.notify(NoticeKind::Success, POST_DELETED);
        self.refresh(EntityKind::Post);
        Removal::Removed { cascaded_comments }
    }

    /// Create a comment with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when a field is blank.
    pub fn create_comment(
        &mut self,
        draft: CommentDraft,
    ) -> Result<Mutation<Comment>, DomainError> {
        if !self.is_loaded() {
            return Ok(Mutation::NotLoaded);
        }
        self.checked(draft.validate())?;
        let id = CommentId::new(next_id(
            &mut self.ids,
            &self.state.comments,
            &self.state.local.comments,
        ));
        let comment = draft.into_record(id);
        insert_created(
            &mut self.state.comments,
            &mut self.state.local.comments,
            &comment,
        );
        self.persist();
        debug!(comment_id = %id, post_id = %comment.post_id, "comment created");
        self.notify(NoticeKind::Success, COMMENT_CREATED);
        self.refresh_comments(comment.post_id);
        Ok(Mutation::Applied(comment))
    }

    /// Overwrite the fields of the first working comment with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when a field is blank.
    pub fn update_comment(
        &mut self,
        id: CommentId,
        draft: &CommentDraft,
    ) -> Result<Mutation<Comment>, DomainError> {
        if !self.is_loaded() {
            return Ok(Mutation::NotLoaded);
        }
        if self.comment(id).is_none() {
            return Ok(Mutation::NotFound);
        }
        self.checked(draft.validate())?;
        let Some(comment) = update_first(
            &mut self.state.comments,
            &mut self.state.local.comments,
            id,
            |comment| draft.apply_to(comment),
        ) else {
            return Ok(Mutation::NotFound);
        };
        self.persist();
        debug!(comment_id = %id, "comment updated");
        self.notify(NoticeKind::Success, COMMENT_UPDATED);
        self.refresh_comments(comment.post_id);
        Ok(Mutation::Applied(comment))
    }

    /// Delete a comment after confirmation.
    pub fn delete_comment(&mut self, id: CommentId) -> Removal {
        if !self.is_loaded() {
            return Removal::NotLoaded;
        }
        if self.comment(id).is_none() {
            return Removal::NotFound;
        }
        if !self.ports.gate.confirm(&delete_prompt(EntityKind::Comment)) {
            return Removal::Declined;
        }
        let removed = remove_first(&mut self.state.comments, id);
        if remove_first(&mut self.state.local.comments, id).is_some() {
            self.persist();
        }
        debug!(comment_id = %id, "comment deleted");
        self.notify(NoticeKind::Success, COMMENT_DELETED);
        if let Some(comment) = removed {
            self.refresh_comments(comment.post_id);
        }
        Removal::Removed {
            cascaded_comments: 0,
        }
    }

    fn refresh_comments(&self, post_id: PostId) {
        self.render_comments(post_id);
        self.refresh(EntityKind::Comment);
    }

    fn checked<T>(&self, outcome: Result<T, DomainError>) -> Result<T, DomainError> {
        outcome.inspect_err(|err| {
            debug!(code = err.code().as_str(), reason = err.message(), "request rejected");
            self.notify(NoticeKind::Error, err.message());
        })
    }
}

fn next_id<R: Record>(ids: &mut IdAllocator, working: &[R], local: &[R]) -> u64
where
    R::Id: Into<u64>,
{
    ids.next(|raw| {
        working
            .iter()
            .chain(local)
            .any(|record| record.id().into() == raw)
    })
}

fn insert_created<R: Record>(working: &mut Vec<R>, local: &mut Vec<R>, record: &R) {
    working.insert(0, record.clone());
    local.push(record.clone());
}

fn update_first<R: Record>(
    working: &mut [R],
    local: &mut Vec<R>,
    id: R::Id,
    apply: impl FnOnce(&mut R),
) -> Option<R> {
    let record = working.iter_mut().find(|candidate| candidate.id() == id)?;
    apply(record);
    let updated = record.clone();
    match local.iter_mut().find(|stored| stored.id() == id) {
        Some(stored) => stored.clone_from(&updated),
        None => local.push(updated.clone()),
    }
    Some(updated)
}

fn remove_first<R: Record>(records: &mut Vec<R>, id: R::Id) -> Option<R> {
    let index = records.iter().position(|record| record.id() == id)?;
    Some(records.remove(index))
}
