//! Integration tests running the dashboard over the slot-file store.
#![expect(clippy::expect_used, reason = "test assertions fail fast")]

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use dashboard::domain::ports::{AlwaysConfirm, DashboardPorts, NoticeKind};
use dashboard::domain::{Dashboard, MergePolicy, Mutation, UserDraft, UserId};
use dashboard::outbound::storage::SlotLocalStore;
use dashboard::test_support::{
    FixedClock, RecordingNotifier, RecordingRenderer, StubRemoteSource, block_on, sample_remote,
};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct DataDir {
    _guard: TempDir,
    root: Utf8PathBuf,
}

#[fixture]
fn data_dir() -> DataDir {
    let guard = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(guard.path().join("slots")).expect("utf-8 temp dir");
    DataDir {
        _guard: guard,
        root,
    }
}

fn open(root: &Utf8Path, notifier: &Arc<RecordingNotifier>) -> Dashboard {
    let store = SlotLocalStore::open(root).expect("open slot store");
    let ports = DashboardPorts {
        remote: Arc::new(StubRemoteSource::serving(sample_remote())),
        store: Arc::new(store),
        notifier: Arc::clone(notifier) as _,
        renderer: Arc::new(RecordingRenderer::default()),
        gate: Arc::new(AlwaysConfirm),
    };
    let mut dashboard = Dashboard::open(
        ports,
        Arc::new(FixedClock::at_millis(1_700_000_000_000)),
        MergePolicy::LocalWins,
    );
    block_on(dashboard.load());
    dashboard
}

fn draft(name: &str) -> UserDraft {
    UserDraft {
        name: name.to_owned(),
        username: "kim".to_owned(),
        email: "kim@example.com".to_owned(),
        ..UserDraft::default()
    }
}

#[rstest]
fn edits_survive_a_restart(data_dir: DataDir) {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut first = open(&data_dir.root, &notifier);
    let created = first.create_user(draft("Kim Lee")).expect("valid draft");
    let Mutation::Applied(user) = created else {
        panic!("user should be created, got {created:?}");
    };
    first
        .update_user(UserId::new(1), &draft("Leanne Renamed"))
        .expect("valid edit");
    assert!(matches!(
        first.toggle_favorite(UserId::new(2)),
        dashboard::domain::FavoriteToggle::Added
    ));

    let second = open(&data_dir.root, &notifier);

    assert_eq!(second.users().len(), 3);
    assert_eq!(second.user(user.id).map(|found| found.name.as_str()), Some("Kim Lee"));
    assert_eq!(
        second.user(UserId::new(1)).map(|found| found.name.as_str()),
        Some("Leanne Renamed")
    );
    assert!(second.favorites().contains(&UserId::new(2)));
}

#[rstest]
fn theme_survives_a_restart(data_dir: DataDir) {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut first = open(&data_dir.root, &notifier);
    first.toggle_theme();

    let second = open(&data_dir.root, &notifier);

    assert_eq!(second.theme().as_str(), "dark");
}

#[rstest]
fn corrupt_slot_is_reset_with_a_notice(data_dir: DataDir) {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut first = open(&data_dir.root, &notifier);
    first.create_user(draft("Kim Lee")).expect("valid draft");
    std::fs::write(data_dir.root.join("localUsers"), "[{broken").expect("corrupt slot");
    notifier.clear();

    let second = open(&data_dir.root, &notifier);

    assert_eq!(second.users().len(), 2);
    assert_eq!(
        notifier.notices().first(),
        Some(&(
            NoticeKind::Info,
            "Saved data could not be read and was reset: localUsers".to_owned()
        ))
    );
}
