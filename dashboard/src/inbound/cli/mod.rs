//! Command-line presentation layer.
//!
//! Each invocation runs after one load. Mutations go through
//! [`Dashboard::dispatch`]; views read the working collections directly.
//! Notices reach the user through the notifier as they happen, and the
//! sections an action touched are printed once it settles.

mod args;
mod prompt;
mod terminal;

use std::io::{self, Write};

use thiserror::Error;

pub use self::args::{
    CliArgs, CliCommand, CommentFields, CommentsCommand, PostFields, PostsCommand, ThemeCommand,
    UserFields, UsersCommand,
};
pub use self::prompt::PromptGate;
pub use self::terminal::{
    Section, TerminalRenderer, WriterNotifier, format_comments, format_post_detail, format_posts,
    format_summary, format_user_detail, format_users,
};
use crate::domain::{
    Command, CommandOutcome, CommentDraft, CommentId, Dashboard, DomainError, EntityKind, Fields,
    Mutation, PostDraft, PostId, UserDraft, UserId,
};

/// Errors ending a CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// The dashboard rejected the command.
    #[error(transparent)]
    Rejected(#[from] DomainError),
    /// The addressed record is not in the working collections.
    #[error("no {kind} with id {id}")]
    UnknownRecord {
        /// Collection searched.
        kind: EntityKind,
        /// Requested id.
        id: u64,
    },
    /// The command ran before any load committed.
    #[error("records are not loaded")]
    NotLoaded,
    /// Printing a section failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Whether the user has already seen this error as a notice.
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Run one subcommand against a loaded dashboard and print its sections.
///
/// # Errors
///
/// Returns [`CliError`] when the command is rejected, addresses a missing
/// record, or output cannot be written.
pub fn run<W: Write + ?Sized>(
    dashboard: &mut Dashboard,
    view: &TerminalRenderer,
    command: CliCommand,
    out: &mut W,
) -> Result<(), CliError> {
    let sections = match command {
        CliCommand::Summary => vec![Section::Summary],
        CliCommand::Users { command } => run_users(dashboard, command, out)?,
        CliCommand::Posts { command } => run_posts(dashboard, command, out)?,
        CliCommand::Comments { command } => run_comments(dashboard, command)?,
        CliCommand::Theme { command } => match command.unwrap_or(ThemeCommand::Show) {
            ThemeCommand::Show => {
                writeln!(out, "theme: {}", dashboard.theme())?;
                Vec::new()
            }
            ThemeCommand::Toggle => {
                let theme = dashboard.toggle_theme();
                writeln!(out, "theme: {theme}")?;
                Vec::new()
            }
        },
    };
    for section in sections {
        view.write_section(section, out)?;
    }
    Ok(())
}

fn run_users<W: Write + ?Sized>(
    dashboard: &mut Dashboard,
    command: UsersCommand,
    out: &mut W,
) -> Result<Vec<Section>, CliError> {
    const TOUCHED: [Section; 2] = [Section::Users, Section::Summary];
    match command {
        UsersCommand::List => return Ok(vec![Section::Users]),
        UsersCommand::Show { id } => {
            let user = dashboard
                .user(UserId::new(id))
                .ok_or(CliError::UnknownRecord {
                    kind: EntityKind::User,
                    id,
                })?;
            let favorite = dashboard.favorites().contains(&user.id);
            writeln!(out, "{}", format_user_detail(user, favorite))?;
            return Ok(Vec::new());
        }
        UsersCommand::Create(fields) => {
            let draft = fields.overlay(UserDraft::default());
            let outcome =
                dashboard.dispatch(&Command::create(EntityKind::User, Fields::User(draft)))?;
            ensure_loaded(&outcome)?;
        }
        UsersCommand::Edit { id, fields } => {
            let current = dashboard
                .user(UserId::new(id))
                .ok_or(CliError::UnknownRecord {
                    kind: EntityKind::User,
                    id,
                })?;
            let draft = fields.overlay(UserDraft::from(current));
            let outcome =
                dashboard.dispatch(&Command::update(EntityKind::User, id, Fields::User(draft)))?;
            settle(&outcome, EntityKind::User, id)?;
        }
        UsersCommand::Delete { id } => {
            let outcome = dashboard.dispatch(&Command::delete(EntityKind::User, id))?;
            settle(&outcome, EntityKind::User, id)?;
        }
        UsersCommand::Favorite { id } => {
            let outcome = dashboard.dispatch(&Command::toggle_favorite(id))?;
            settle(&outcome, EntityKind::User, id)?;
        }
    }
    Ok(TOUCHED.to_vec())
}

fn run_posts<W: Write + ?Sized>(
    dashboard: &mut Dashboard,
    command: PostsCommand,
    out: &mut W,
) -> Result<Vec<Section>, CliError> {
    const TOUCHED: [Section; 2] = [Section::Posts, Section::Summary];
    match command {
        PostsCommand::List { search } => {
            if let Some(query) = search {
                dashboard.render_search(&query);
            }
            return Ok(vec![Section::Posts]);
        }
        PostsCommand::Show { id } => {
            let post = dashboard
                .post(PostId::new(id))
                .ok_or(CliError::UnknownRecord {
                    kind: EntityKind::Post,
                    id,
                })?;
            writeln!(
                out,
                "{}",
                format_post_detail(post, dashboard.author_name(post))
            )?;
            dashboard.render_comments(PostId::new(id));
            return Ok(vec![Section::Comments]);
        }
        PostsCommand::Create(fields) => {
            let draft = fields.overlay(PostDraft::default());
            let outcome =
                dashboard.dispatch(&Command::create(EntityKind::Post, Fields::Post(draft)))?;
            ensure_loaded(&outcome)?;
        }
        PostsCommand::Edit { id, fields } => {
            let current = dashboard
                .post(PostId::new(id))
                .ok_or(CliError::UnknownRecord {
                    kind: EntityKind::Post,
                    id,
                })?;
            let draft = fields.overlay(PostDraft::from(current));
            let outcome =
                dashboard.dispatch(&Command::update(EntityKind::Post, id, Fields::Post(draft)))?;
            settle(&outcome, EntityKind::Post, id)?;
        }
        PostsCommand::Delete { id } => {
            let outcome = dashboard.dispatch(&Command::delete(EntityKind::Post, id))?;
            settle(&outcome, EntityKind::Post, id)?;
        }
    }
    Ok(TOUCHED.to_vec())
}

fn run_comments(
    dashboard: &mut Dashboard,
    command: CommentsCommand,
) -> Result<Vec<Section>, CliError> {
    let post_id = match command {
        CommentsCommand::List { post_id } => {
            if dashboard.post(PostId::new(post_id)).is_none() {
                return Err(CliError::UnknownRecord {
                    kind: EntityKind::Post,
                    id: post_id,
                });
            }
            dashboard.render_comments(PostId::new(post_id));
            return Ok(vec![Section::Comments]);
        }
        CommentsCommand::Add { post_id, fields } => {
            let draft = fields.for_post(PostId::new(post_id));
            let outcome = dashboard
                .dispatch(&Command::create(EntityKind::Comment, Fields::Comment(draft)))?;
            ensure_loaded(&outcome)?;
            PostId::new(post_id)
        }
        CommentsCommand::Edit {
            id,
            post_id,
            fields,
        } => {
            let current = dashboard
                .comment(CommentId::new(id))
                .ok_or(CliError::UnknownRecord {
                    kind: EntityKind::Comment,
                    id,
                })?;
            let base = CommentDraft {
                post_id: post_id.map_or(current.post_id, PostId::new),
                ..CommentDraft::from(current)
            };
            let draft = fields.overlay(base);
            let outcome = dashboard.dispatch(&Command::update(
                EntityKind::Comment,
                id,
                Fields::Comment(draft),
            ))?;
            settle(&outcome, EntityKind::Comment, id)?;
            match outcome {
                CommandOutcome::Comment(Mutation::Applied(comment)) => comment.post_id,
                _ => return Ok(vec![Section::Summary]),
            }
        }
        CommentsCommand::Delete { id } => {
            let parent = dashboard.comment(CommentId::new(id)).map(|comment| comment.post_id);
            let outcome = dashboard.dispatch(&Command::delete(EntityKind::Comment, id))?;
            settle(&outcome, EntityKind::Comment, id)?;
            match parent {
                Some(post_id) => post_id,
                None => return Ok(vec![Section::Summary]),
            }
        }
    };
    dashboard.render_comments(post_id);
    Ok(vec![Section::Comments, Section::Summary])
}

fn ensure_loaded(outcome: &CommandOutcome) -> Result<(), CliError> {
    if outcome.is_not_loaded() {
        return Err(CliError::NotLoaded);
    }
    Ok(())
}

fn settle(outcome: &CommandOutcome, kind: EntityKind, id: u64) -> Result<(), CliError> {
    ensure_loaded(outcome)?;
    if outcome.is_not_found() {
        return Err(CliError::UnknownRecord { kind, id });
    }
    Ok(())
}

#[cfg(test)]
mod tests;
