//! Command dispatch table.
//!
//! The presentation layer turns each user action into a [`Command`] and hands
//! it to [`Dashboard::dispatch`]. The table maps `(kind, action)` pairs to
//! reconciler operations; pairs without an entry are rejected before any
//! state is touched.

use std::fmt;

use crate::domain::DomainError;
use crate::domain::dashboard::{Dashboard, FavoriteToggle, Mutation, Removal};
use crate::domain::drafts::{CommentDraft, PostDraft, UserDraft};
use crate::domain::records::{Comment, CommentId, EntityKind, Post, PostId, User, UserId};

/// What to do with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Create a new record.
    Create,
    /// Edit an existing record.
    Update,
    /// Delete an existing record.
    Delete,
    /// Flip a user's favourite flag.
    ToggleFavorite,
}

impl Action {
    /// Kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::ToggleFavorite => "toggle-favorite",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field payload of a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fields {
    /// User fields.
    User(UserDraft),
    /// Post fields.
    Post(PostDraft),
    /// Comment fields.
    Comment(CommentDraft),
}

/// One user action addressed to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Target collection.
    pub kind: EntityKind,
    /// Operation.
    pub action: Action,
    /// Target record for update, delete, and toggle-favourite.
    pub id: Option<u64>,
    /// Payload for create and update.
    pub fields: Option<Fields>,
}

impl Command {
    /// Build a create command.
    #[must_use]
    pub const fn create(kind: EntityKind, fields: Fields) -> Self {
        Self {
            kind,
            action: Action::Create,
            id: None,
            fields: Some(fields),
        }
    }

    /// Build an update command.
    #[must_use]
    pub const fn update(kind: EntityKind, id: u64, fields: Fields) -> Self {
        Self {
            kind,
            action: Action::Update,
            id: Some(id),
            fields: Some(fields),
        }
    }

    /// Build a delete command.
    #[must_use]
    pub const fn delete(kind: EntityKind, id: u64) -> Self {
        Self {
            kind,
            action: Action::Delete,
            id: Some(id),
            fields: None,
        }
    }

    /// Build a toggle-favourite command for a user.
    #[must_use]
    pub const fn toggle_favorite(user_id: u64) -> Self {
        Self {
            kind: EntityKind::User,
            action: Action::ToggleFavorite,
            id: Some(user_id),
            fields: None,
        }
    }

    fn required_id(&self) -> Result<u64, DomainError> {
        self.id.ok_or_else(|| {
            DomainError::invalid_request(format!(
                "{} {} requires a record id",
                self.kind, self.action
            ))
        })
    }

    fn wrong_fields(&self) -> DomainError {
        DomainError::invalid_request(format!(
            "{} {} requires {} fields",
            self.kind, self.action, self.kind
        ))
    }

    fn user_fields(&self) -> Result<&UserDraft, DomainError> {
        match &self.fields {
            Some(Fields::User(draft)) => Ok(draft),
            _ => Err(self.wrong_fields()),
        }
    }

    fn post_fields(&self) -> Result<&PostDraft, DomainError> {
        match &self.fields {
            Some(Fields::Post(draft)) => Ok(draft),
            _ => Err(self.wrong_fields()),
        }
    }

    fn comment_fields(&self) -> Result<&CommentDraft, DomainError> {
        match &self.fields {
            Some(Fields::Comment(draft)) => Ok(draft),
            _ => Err(self.wrong_fields()),
        }
    }
}

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A user create or update.
    User(Mutation<User>),
    /// A post create or update.
    Post(Mutation<Post>),
    /// A comment create or update.
    Comment(Mutation<Comment>),
    /// Any delete.
    Removal(Removal),
    /// A favourite toggle.
    Favorite(FavoriteToggle),
}

impl CommandOutcome {
    /// Whether the addressed record did not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::User(Mutation::NotFound)
                | Self::Post(Mutation::NotFound)
                | Self::Comment(Mutation::NotFound)
                | Self::Removal(Removal::NotFound)
                | Self::Favorite(FavoriteToggle::NotFound)
        )
    }

    /// Whether the command arrived before any load committed.
    #[must_use]
    pub const fn is_not_loaded(&self) -> bool {
        matches!(
            self,
            Self::User(Mutation::NotLoaded)
                | Self::Post(Mutation::NotLoaded)
                | Self::Comment(Mutation::NotLoaded)
                | Self::Removal(Removal::NotLoaded)
                | Self::Favorite(FavoriteToggle::NotLoaded)
        )
    }
}

/// Reconciler entry point stored in the dispatch table.
pub type Handler = fn(&mut Dashboard, &Command) -> Result<CommandOutcome, DomainError>;

const DISPATCH: [(EntityKind, Action, Handler); 10] = [
    (EntityKind::User, Action::Create, create_user),
    (EntityKind::User, Action::Update, update_user),
    (EntityKind::User, Action::Delete, delete_user),
    (EntityKind::User, Action::ToggleFavorite, toggle_favorite),
    (EntityKind::Post, Action::Create, create_post),
    (EntityKind::Post, Action::Update, update_post),
    (EntityKind::Post, Action::Delete, delete_post),
    (EntityKind::Comment, Action::Create, create_comment),
    (EntityKind::Comment, Action::Update, update_comment),
    (EntityKind::Comment, Action::Delete, delete_comment),
];

/// Look up the handler for a `(kind, action)` pair.
///
/// # Examples
///
/// ```
/// use dashboard::domain::EntityKind;
/// use dashboard::domain::commands::{Action, handler_for};
///
/// assert!(handler_for(EntityKind::User, Action::ToggleFavorite).is_some());
/// assert!(handler_for(EntityKind::Post, Action::ToggleFavorite).is_none());
/// ```
#[must_use]
pub fn handler_for(kind: EntityKind, action: Action) -> Option<Handler> {
    DISPATCH
        .iter()
        .find(|(entry_kind, entry_action, _)| *entry_kind == kind && *entry_action == action)
        .map(|(_, _, handler)| *handler)
}

impl Dashboard {
    /// Run `command` through the dispatch table.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] with
    /// [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest)
    /// for an unsupported pair, a missing id, mismatched fields, or a draft
    /// that fails validation.
    pub fn dispatch(&mut self, command: &Command) -> Result<CommandOutcome, DomainError> {
        let handler = handler_for(command.kind, command.action).ok_or_else(|| {
            DomainError::invalid_request(format!(
                "{} does not support {}",
                command.kind, command.action
            ))
        })?;
        handler(self, command)
    }
}

fn create_user(
    dashboard: &mut Dashboard,
    command: &Command,
) -> Result<CommandOutcome, DomainError> {
    let draft = command.user_fields()?.clone();
    dashboard.create_user(draft).map(CommandOutcome::User)
}

fn update_user(
    dashboard: &mut Dashboard,
    command: &Command,
) -> Result<CommandOutcome, DomainError> {
    let id = UserId::new(command.required_id()?);
    let draft = command.user_fields()?;
    dashboard.update_user(id, draft).map(CommandOutcome::User)
}

fn delete_user(
    dashboard: &mut Dashboard,
    command: &Command,
) -> Result<CommandOutcome, DomainError> {
    let id = UserId::new(command.required_id()?);
    Ok(CommandOutcome::Removal(dashboard.delete_user(id)))
}

fn toggle_favorite(
    dashboard: &mut Dashboard,
    command: &Command,
) -> Result<CommandOutcome, DomainError> {
    let id = UserId::new(command.required_id()?);
    Ok(CommandOutcome::Favorite(dashboard.toggle_favorite(id)))
}

fn create_post(
    dashboard: &mut Dashboard,
    command: &Command,
) -> Result<CommandOutcome, DomainError> {
    let draft = command.post_fields()?.clone();
    dashboard.create_post(draft).map(CommandOutcome::Post)
}

fn update_post(
    dashboard: &mut Dashboard,
    command: &Command,
) -> Result<CommandOutcome, DomainError> {
    let id = PostId::new(command.required_id()?);
    let draft = command.post_fields()?;
    dashboard.update_post(id, draft).map(CommandOutcome::Post)
}

fn delete_post(
    dashboard: &mut Dashboard,
    command: &Command,
) -> Result<CommandOutcome, DomainError> {
    let id = PostId::new(command.required_id()?);
    Ok(CommandOutcome::Removal(dashboard.delete_post(id)))
}

fn create_comment(
    dashboard: &mut Dashboard,
    command: &Command,
) -> Result<CommandOutcome, DomainError> {
    let draft = command.comment_fields()?.clone();
    dashboard.create_comment(draft).map(CommandOutcome::Comment)
}

fn update_comment(
    dashboard: &mut Dashboard,
    command: &Command,
) -> Result<CommandOutcome, DomainError> {
    let id = CommentId::new(command.required_id()?);
    let draft = command.comment_fields()?;
    dashboard.update_comment(id, draft).map(CommandOutcome::Comment)
}

fn delete_comment(
    dashboard: &mut Dashboard,
    command: &Command,
) -> Result<CommandOutcome, DomainError> {
    let id = CommentId::new(command.required_id()?);
    Ok(CommandOutcome::Removal(dashboard.delete_comment(id)))
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "test assertions fail fast")]

    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    #[test]
    fn table_has_one_entry_per_pair() {
        let pairs: HashSet<_> = DISPATCH
            .iter()
            .map(|(kind, action, _)| (*kind, *action))
            .collect();
        assert_eq!(pairs.len(), DISPATCH.len());
    }

    #[rstest]
    #[case::post_favourite(EntityKind::Post, Action::ToggleFavorite)]
    #[case::comment_favourite(EntityKind::Comment, Action::ToggleFavorite)]
    fn unsupported_pairs_have_no_handler(#[case] kind: EntityKind, #[case] action: Action) {
        assert!(handler_for(kind, action).is_none());
    }

    #[rstest]
    #[case(EntityKind::User)]
    #[case(EntityKind::Post)]
    #[case(EntityKind::Comment)]
    fn crud_is_supported_for_every_kind(#[case] kind: EntityKind) {
        for action in [Action::Create, Action::Update, Action::Delete] {
            assert!(handler_for(kind, action).is_some(), "{kind} {action}");
        }
    }

    #[test]
    fn missing_id_is_reported() {
        let command = Command {
            kind: EntityKind::Post,
            action: Action::Delete,
            id: None,
            fields: None,
        };
        let err = command.required_id().expect_err("id is required");
        assert_eq!(err.message(), "post delete requires a record id");
    }

    #[test]
    fn mismatched_fields_are_reported() {
        let command = Command::update(EntityKind::User, 1, Fields::Post(PostDraft::default()));
        let err = command.user_fields().expect_err("fields mismatch");
        assert_eq!(err.message(), "user update requires user fields");
    }

    #[rstest]
    #[case::missing_user(CommandOutcome::User(Mutation::NotFound), true, false)]
    #[case::missing_removal(CommandOutcome::Removal(Removal::NotFound), true, false)]
    #[case::unloaded_favourite(CommandOutcome::Favorite(FavoriteToggle::NotLoaded), false, true)]
    #[case::declined(CommandOutcome::Removal(Removal::Declined), false, false)]
    #[case::added(CommandOutcome::Favorite(FavoriteToggle::Added), false, false)]
    fn outcome_predicates(
        #[case] outcome: CommandOutcome,
        #[case] not_found: bool,
        #[case] not_loaded: bool,
    ) {
        assert_eq!(outcome.is_not_found(), not_found);
        assert_eq!(outcome.is_not_loaded(), not_loaded);
    }
}
