//! Plain-text renderer and notifier for terminal use.
//!
//! The renderer keeps only the latest frame of each section. The command
//! runner decides which sections to print once an action has settled, so a
//! load followed by a mutation prints one consistent view.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::domain::ports::{NoticeKind, Notifier, Renderer};
use crate::domain::{Comment, Favorites, Post, PostCard, PostId, Summary, User};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Independently rendered parts of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Users table.
    Users,
    /// Posts table.
    Posts,
    /// Comments of one post.
    Comments,
    /// Counters and theme.
    Summary,
}

/// [`Renderer`] that formats frames as text and holds them until printed.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    frames: Mutex<HashMap<Section, String>>,
}

impl TerminalRenderer {
    /// Latest frame of `section`, if one was rendered.
    #[must_use]
    pub fn frame(&self, section: Section) -> Option<String> {
        lock(&self.frames).get(&section).cloned()
    }

    /// Print the latest frame of `section` to `out`. Nothing is printed when
    /// the section was never rendered.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_section<W: Write + ?Sized>(&self, section: Section, out: &mut W) -> io::Result<()> {
        match self.frame(section) {
            Some(text) => writeln!(out, "{text}"),
            None => Ok(()),
        }
    }

    fn store(&self, section: Section, text: String) {
        lock(&self.frames).insert(section, text);
    }
}

impl Renderer for TerminalRenderer {
    fn render_users(&self, users: &[User], favorites: &Favorites) {
        self.store(Section::Users, format_users(users, favorites));
    }

    fn render_posts(&self, posts: &[PostCard]) {
        self.store(Section::Posts, format_posts(posts));
    }

    fn render_comments(&self, post_id: PostId, comments: &[Comment]) {
        self.store(Section::Comments, format_comments(post_id, comments));
    }

    fn render_summary(&self, summary: &Summary) {
        self.store(Section::Summary, format_summary(summary));
    }
}

/// Users table; favourites carry a `*` marker.
#[must_use]
pub fn format_users(users: &[User], favorites: &Favorites) -> String {
    if users.is_empty() {
        return "No users".to_owned();
    }
    users
        .iter()
        .map(|user| {
            let mark = if favorites.contains(&user.id) { '*' } else { ' ' };
            format!(
                "{mark} {:>14}  {}  @{}  <{}>",
                user.id, user.name, user.username, user.email
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Posts table with author and comment count.
#[must_use]
pub fn format_posts(posts: &[PostCard]) -> String {
    if posts.is_empty() {
        return "No posts".to_owned();
    }
    posts
        .iter()
        .map(|card| {
            let noun = if card.comment_count == 1 { "comment" } else { "comments" };
            format!(
                "{:>16}  {}  by {} ({} {noun})",
                card.post.id, card.post.title, card.author, card.comment_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comments of one post under a heading.
#[must_use]
pub fn format_comments(post_id: PostId, comments: &[Comment]) -> String {
    let mut lines = vec![format!("Comments on post {post_id}")];
    if comments.is_empty() {
        lines.push("  none".to_owned());
    }
    lines.extend(comments.iter().map(|comment| {
        format!(
            "  {}  {} <{}>: {}",
            comment.id, comment.name, comment.email, comment.body
        )
    }));
    lines.join("\n")
}

/// One-line counters.
#[must_use]
pub fn format_summary(summary: &Summary) -> String {
    format!(
        "users: {}  posts: {}  comments: {}  favorites: {}  theme: {}",
        summary.users, summary.posts, summary.comments, summary.favorites, summary.theme
    )
}

/// Every field of one user.
#[must_use]
pub fn format_user_detail(user: &User, favorite: bool) -> String {
    [
        format!("id: {}", user.id),
        format!("name: {}", user.name),
        format!("username: {}", user.username),
        format!("email: {}", user.email),
        format!("phone: {}", user.phone),
        format!("website: {}", user.website),
        format!("favorite: {}", if favorite { "yes" } else { "no" }),
    ]
    .join("\n")
}

/// Every field of one post plus its author label.
#[must_use]
pub fn format_post_detail(post: &Post, author: &str) -> String {
    [
        format!("id: {}", post.id),
        format!("author: {author} ({})", post.user_id),
        format!("title: {}", post.title),
        format!("body: {}", post.body),
    ]
    .join("\n")
}

/// [`Notifier`] writing `[kind] message` lines to a shared writer.
#[derive(Debug)]
pub struct WriterNotifier<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> WriterNotifier<W> {
    /// Notify through `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Notifier for WriterNotifier<W> {
    fn notify(&self, kind: NoticeKind, message: &str) {
        if let Err(err) = writeln!(lock(&self.out), "[{kind}] {message}") {
            debug!(error = %err, "failed to write notice");
        }
    }
}
