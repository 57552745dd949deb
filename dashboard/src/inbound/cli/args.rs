//! Command-line grammar.

use clap::{Args, Parser, Subcommand};

use crate::domain::{CommentDraft, PostDraft, PostId, UserDraft, UserId};

/// `dashboard` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dashboard",
    about = "Browse and edit users, posts, and comments merged with local changes",
    version
)]
pub struct CliArgs {
    /// Confirm deletions without prompting.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
    /// Skip the remote API and work from local data only.
    #[arg(long, global = true)]
    pub offline: bool,
    /// Action to run.
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Top-level subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Show record counts and the theme.
    Summary,
    /// Work with users.
    Users {
        /// User action.
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Work with posts.
    Posts {
        /// Post action.
        #[command(subcommand)]
        command: PostsCommand,
    },
    /// Work with comments.
    Comments {
        /// Comment action.
        #[command(subcommand)]
        command: CommentsCommand,
    },
    /// Show or toggle the colour scheme.
    Theme {
        /// Defaults to `show`.
        #[command(subcommand)]
        command: Option<ThemeCommand>,
    },
}

/// User subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum UsersCommand {
    /// List users; favourites are starred.
    List,
    /// Show one user.
    Show {
        /// User id.
        id: u64,
    },
    /// Create a user.
    Create(UserFields),
    /// Edit a user; omitted fields keep their current value.
    Edit {
        /// User id.
        id: u64,
        /// Replacement values.
        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete a user.
    Delete {
        /// User id.
        id: u64,
    },
    /// Add or remove a user from favourites.
    Favorite {
        /// User id.
        id: u64,
    },
}

/// Post subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum PostsCommand {
    /// List posts, optionally filtered by title or body text.
    List {
        /// Case-insensitive text to match.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one post with its comments.
    Show {
        /// Post id.
        id: u64,
    },
    /// Create a post.
    Create(PostFields),
    /// Edit a post; omitted fields keep their current value.
    Edit {
        /// Post id.
        id: u64,
        /// Replacement values.
        #[command(flatten)]
        fields: PostFields,
    },
    /// Delete a post and its comments.
    Delete {
        /// Post id.
        id: u64,
    },
}

/// Comment subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CommentsCommand {
    /// List the comments of a post.
    List {
        /// Post id.
        post_id: u64,
    },
    /// Add a comment to a post.
    Add {
        /// Post id.
        post_id: u64,
        /// Comment values.
        #[command(flatten)]
        fields: CommentFields,
    },
    /// Edit a comment; omitted fields keep their current value.
    Edit {
        /// Comment id.
        id: u64,
        /// Move the comment to another post.
        #[arg(long)]
        post_id: Option<u64>,
        /// Replacement values.
        #[command(flatten)]
        fields: CommentFields,
    },
    /// Delete a comment.
    Delete {
        /// Comment id.
        id: u64,
    },
}

/// Theme subcommands.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ThemeCommand {
    /// Print the active theme.
    Show,
    /// Switch between light and dark.
    Toggle,
}

/// User form fields.
#[derive(Debug, Clone, Default, Args)]
pub struct UserFields {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,
    /// Login handle.
    #[arg(long)]
    pub username: Option<String>,
    /// Contact email.
    #[arg(long)]
    pub email: Option<String>,
    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,
    /// Personal website.
    #[arg(long)]
    pub website: Option<String>,
}

impl UserFields {
    /// Replace the fields of `base` that were given.
    #[must_use]
    pub fn overlay(self, base: UserDraft) -> UserDraft {
        UserDraft {
            name: self.name.unwrap_or(base.name),
            username: self.username.unwrap_or(base.username),
            email: self.email.unwrap_or(base.email),
            phone: self.phone.unwrap_or(base.phone),
            website: self.website.unwrap_or(base.website),
        }
    }
}

/// Post form fields.
#[derive(Debug, Clone, Default, Args)]
pub struct PostFields {
    /// Author id.
    #[arg(long)]
    pub user_id: Option<u64>,
    /// Headline.
    #[arg(long)]
    pub title: Option<String>,
    /// Text content.
    #[arg(long)]
    pub body: Option<String>,
}

impl PostFields {
    /// Replace the fields of `base` that were given.
    #[must_use]
    pub fn overlay(self, base: PostDraft) -> PostDraft {
        PostDraft {
            user_id: self.user_id.map(UserId::new).or(base.user_id),
            title: self.title.unwrap_or(base.title),
            body: self.body.unwrap_or(base.body),
        }
    }
}

/// Comment form fields.
#[derive(Debug, Clone, Default, Args)]
pub struct CommentFields {
    /// Commenter name.
    #[arg(long)]
    pub name: Option<String>,
    /// Commenter email.
    #[arg(long)]
    pub email: Option<String>,
    /// Text content.
    #[arg(long)]
    pub body: Option<String>,
}

impl CommentFields {
    /// Replace the fields of `base` that were given.
    #[must_use]
    pub fn overlay(self, base: CommentDraft) -> CommentDraft {
        CommentDraft {
            post_id: base.post_id,
            name: self.name.unwrap_or(base.name),
            email: self.email.unwrap_or(base.email),
            body: self.body.unwrap_or(base.body),
        }
    }

    /// Fields for a new comment on `post_id`.
    #[must_use]
    pub fn for_post(self, post_id: PostId) -> CommentDraft {
        self.overlay(CommentDraft {
            post_id,
            name: String::new(),
            email: String::new(),
            body: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "test assertions fail fast")]

    use clap::CommandFactory;
    use rstest::rstest;

    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("dashboard").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn grammar_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let args = parse(&["posts", "delete", "3", "--yes", "--offline"]);
        assert!(args.yes);
        assert!(args.offline);
        assert!(matches!(
            args.command,
            CliCommand::Posts {
                command: PostsCommand::Delete { id: 3 }
            }
        ));
    }

    #[test]
    fn edit_overlays_only_given_fields() {
        let args = parse(&["users", "edit", "1", "--email", "new@x.io"]);
        let CliCommand::Users {
            command: UsersCommand::Edit { id, fields },
        } = args.command
        else {
            panic!("expected users edit");
        };
        let base = UserDraft {
            name: "Leanne".to_owned(),
            username: "bret".to_owned(),
            email: "old@x.io".to_owned(),
            ..UserDraft::default()
        };

        let draft = fields.overlay(base);

        assert_eq!(id, 1);
        assert_eq!(draft.name, "Leanne");
        assert_eq!(draft.email, "new@x.io");
    }

    #[test]
    fn post_author_is_optional_at_parse_time() {
        let args = parse(&["posts", "create", "--title", "t", "--body", "b"]);
        let CliCommand::Posts {
            command: PostsCommand::Create(fields),
        } = args.command
        else {
            panic!("expected posts create");
        };
        assert_eq!(fields.overlay(PostDraft::default()).user_id, None);
    }

    #[rstest]
    #[case::theme_defaults_to_show(&["theme"])]
    #[case::search(&["posts", "list", "--search", "walk"])]
    #[case::comment_move(&["comments", "edit", "4", "--post-id", "2"])]
    fn accepted_forms(#[case] args: &[&str]) {
        assert!(
            CliArgs::try_parse_from(std::iter::once("dashboard").chain(args.iter().copied()))
                .is_ok()
        );
    }

    #[test]
    fn non_numeric_ids_are_rejected() {
        assert!(CliArgs::try_parse_from(["dashboard", "users", "show", "abc"]).is_err());
    }
}
