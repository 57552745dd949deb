//! Tests for the command runner against in-memory ports.
#![expect(clippy::expect_used, reason = "test assertions fail fast")]

use std::sync::Arc;

use clap::Parser;
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{NoticeKind, Renderer};
use crate::domain::{MergePolicy, Theme};
use crate::test_support::{Harness, block_on};

struct Session {
    harness: Harness,
    view: Arc<TerminalRenderer>,
    dashboard: Dashboard,
}

impl Session {
    fn run(&mut self, args: &[&str]) -> (Result<(), CliError>, String) {
        let parsed = CliArgs::try_parse_from(std::iter::once("dashboard").chain(args.iter().copied()))
            .expect("arguments should parse");
        let mut out = Vec::new();
        let result = run(&mut self.dashboard, &self.view, parsed.command, &mut out);
        (result, String::from_utf8(out).expect("utf-8 output"))
    }
}

#[fixture]
fn session() -> Session {
    let harness = Harness::default();
    let view = Arc::new(TerminalRenderer::default());
    let mut ports = harness.ports();
    ports.renderer = Arc::clone(&view) as Arc<dyn Renderer>;
    let mut dashboard = Dashboard::open(
        ports,
        Arc::clone(&harness.clock) as Arc<dyn Clock>,
        MergePolicy::default(),
    );
    block_on(dashboard.load());
    Session {
        harness,
        view,
        dashboard,
    }
}

#[rstest]
fn summary_prints_counts(mut session: Session) {
    let (result, out) = session.run(&["summary"]);
    assert!(result.is_ok());
    assert_eq!(
        out,
        "users: 2  posts: 3  comments: 3  favorites: 0  theme: light\n"
    );
}

#[rstest]
fn created_user_is_listed_and_announced(mut session: Session) {
    let (result, out) = session.run(&[
        "users",
        "create",
        "--name",
        "Clementine Bauch",
        "--username",
        "Samantha",
        "--email",
        "nathan@yesenia.net",
    ]);

    assert!(result.is_ok());
    assert!(out.lines().next().is_some_and(|line| line.contains("Clementine Bauch")));
    assert!(out.contains("users: 3"));
    assert_eq!(
        session.harness.notifier.last(),
        Some((NoticeKind::Success, "User added successfully".to_owned()))
    );
}

#[rstest]
fn missing_field_is_rejected_with_a_notice(mut session: Session) {
    let (result, out) = session.run(&["users", "create", "--name", "Only Name"]);

    let err = result.expect_err("blank username and email");
    assert!(err.is_reported());
    assert!(out.is_empty());
    assert_eq!(
        session.harness.notifier.last(),
        Some((NoticeKind::Error, "Please fill all fields".to_owned()))
    );
}

#[rstest]
fn post_without_author_asks_for_one(mut session: Session) {
    let (result, _) = session.run(&["posts", "create", "--title", "t", "--body", "b"]);

    assert!(matches!(result, Err(CliError::Rejected(_))));
    assert_eq!(
        session.harness.notifier.last(),
        Some((NoticeKind::Error, "Please select a user".to_owned()))
    );
}

#[rstest]
fn edit_keeps_fields_that_were_not_given(mut session: Session) {
    let (result, _) = session.run(&["posts", "edit", "2", "--title", "Dusk"]);

    assert!(result.is_ok());
    let post = session.dashboard.post(PostId::new(2)).expect("post 2");
    assert_eq!(post.title, "Dusk");
    assert_eq!(post.body, "A walk by the river");
    assert_eq!(post.user_id, UserId::new(2));
}

#[rstest]
#[case::edit_user(&["users", "edit", "42", "--name", "x"], EntityKind::User)]
#[case::delete_post(&["posts", "delete", "42"], EntityKind::Post)]
#[case::show_post(&["posts", "show", "42"], EntityKind::Post)]
#[case::list_comments(&["comments", "list", "42"], EntityKind::Post)]
#[case::delete_comment(&["comments", "delete", "42"], EntityKind::Comment)]
#[case::favourite(&["users", "favorite", "42"], EntityKind::User)]
fn unknown_ids_are_reported(
    mut session: Session,
    #[case] args: &[&str],
    #[case] expected: EntityKind,
) {
    let (result, _) = session.run(args);
    match result {
        Err(CliError::UnknownRecord { kind, id }) => {
            assert_eq!(kind, expected);
            assert_eq!(id, 42);
        }
        other => panic!("expected unknown record, got {other:?}"),
    }
}

#[rstest]
fn deleting_a_post_cascades_and_prints_posts(mut session: Session) {
    let (result, out) = session.run(&["posts", "delete", "1"]);

    assert!(result.is_ok());
    assert!(!out.contains("Morning walk"));
    assert!(out.contains("comments: 1"));
    assert_eq!(
        session.harness.gate.prompts(),
        ["Are you sure you want to delete this post?"]
    );
}

#[rstest]
fn declined_delete_changes_nothing(mut session: Session) {
    session.harness.gate.set_fallback(false);

    let (result, out) = session.run(&["users", "delete", "1"]);

    assert!(result.is_ok());
    assert!(out.contains("Leanne Graham"));
    assert!(session.dashboard.user(UserId::new(1)).is_some());
}

#[rstest]
fn search_filters_the_posts_section(mut session: Session) {
    let (result, out) = session.run(&["posts", "list", "--search", "WALK"]);

    assert!(result.is_ok());
    assert_eq!(out.lines().count(), 2);
    assert!(!out.contains("Orphan"));
}

#[rstest]
fn showing_a_post_lists_its_comments(mut session: Session) {
    let (result, out) = session.run(&["posts", "show", "3"]);

    assert!(result.is_ok());
    assert!(out.contains("author: Unknown User (99)"));
    assert!(out.contains("Comments on post 3\n  none"));
}

#[rstest]
fn comment_lifecycle_redraws_the_parent_post(mut session: Session) {
    let (added, out) = session.run(&[
        "comments", "add", "2", "--name", "Kim", "--email", "kim@x.io", "--body", "Hello",
    ]);
    assert!(added.is_ok());
    assert!(out.starts_with("Comments on post 2\n"));
    assert!(out.contains("Kim <kim@x.io>: Hello"));

    let (moved, out) = session.run(&["comments", "edit", "3", "--post-id", "1"]);
    assert!(moved.is_ok());
    assert!(out.starts_with("Comments on post 1\n"));
    assert!(out.contains("Nice river"));

    let (deleted, out) = session.run(&["comments", "delete", "3"]);
    assert!(deleted.is_ok());
    assert!(!out.contains("Nice river"));
}

#[rstest]
fn favourite_toggle_stars_the_user(mut session: Session) {
    let (result, out) = session.run(&["users", "favorite", "2"]);

    assert!(result.is_ok());
    assert!(out.lines().nth(1).is_some_and(|line| line.starts_with("* ")));
    assert!(out.contains("favorites: 1"));
}

#[rstest]
fn theme_toggle_persists(mut session: Session) {
    let (shown, out) = session.run(&["theme"]);
    assert!(shown.is_ok());
    assert_eq!(out, "theme: light\n");

    let (toggled, out) = session.run(&["theme", "toggle"]);
    assert!(toggled.is_ok());
    assert_eq!(out, "theme: dark\n");
    assert_eq!(session.harness.store.saved_theme(), Theme::Dark);
}
