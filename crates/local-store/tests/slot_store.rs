//! Integration tests for the slot store.
//!
//! These tests exercise open, read, and write against a real
//! temporary directory.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use camino::{Utf8Path, Utf8PathBuf};
use local_store::{SlotStore, StoreError};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct TempStore {
    _guard: TempDir,
    root: Utf8PathBuf,
    store: SlotStore,
}

#[fixture]
fn temp_store() -> TempStore {
    let guard = tempfile::tempdir().expect("temp dir");
    let root = Utf8Path::from_path(guard.path())
        .expect("utf-8 temp dir")
        .join("data");
    let store = SlotStore::open(&root).expect("open store");
    TempStore {
        _guard: guard,
        root,
        store,
    }
}

#[rstest]
fn open_creates_missing_directories(temp_store: TempStore) {
    assert!(temp_store.root.is_dir());
}

#[rstest]
fn missing_slot_reads_as_none(temp_store: TempStore) {
    let value = temp_store.store.get("localUsers").expect("read slot");
    assert_eq!(value, None);
}

#[rstest]
fn written_slot_reads_back(temp_store: TempStore) {
    temp_store
        .store
        .set("localPosts", r#"[{"id":1,"userId":1,"title":"t","body":"b"}]"#)
        .expect("write slot");

    let value = temp_store.store.get("localPosts").expect("read slot");
    assert_eq!(
        value.as_deref(),
        Some(r#"[{"id":1,"userId":1,"title":"t","body":"b"}]"#)
    );
}

#[rstest]
fn slots_survive_reopening(temp_store: TempStore) {
    temp_store.store.set("theme", "dark").expect("write slot");

    let reopened = SlotStore::open(&temp_store.root).expect("reopen store");
    assert_eq!(
        reopened.get("theme").expect("read slot").as_deref(),
        Some("dark")
    );
}

#[rstest]
fn slots_are_independent(temp_store: TempStore) {
    temp_store.store.set("favorites", "[3]").expect("write slot");
    temp_store.store.set("theme", "light").expect("write slot");

    assert_eq!(
        temp_store.store.get("favorites").expect("read").as_deref(),
        Some("[3]")
    );
    assert_eq!(
        temp_store.store.get("theme").expect("read").as_deref(),
        Some("light")
    );
}

#[rstest]
#[case("../escape")]
#[case("")]
#[case("nested/key")]
fn rejects_invalid_keys(temp_store: TempStore, #[case] key: &str) {
    let expected = StoreError::InvalidKey {
        key: key.to_owned(),
    };
    assert_eq!(temp_store.store.get(key), Err(expected.clone()));
    assert_eq!(temp_store.store.set(key, "x"), Err(expected));
}

#[rstest]
fn non_utf8_slot_reports_read_error(temp_store: TempStore) {
    std::fs::write(temp_store.root.join("localComments"), [0xff_u8, 0xfe, 0x00])
        .expect("write raw bytes");

    let result = temp_store.store.get("localComments");
    assert!(
        matches!(result, Err(StoreError::Read { ref key, .. }) if key == "localComments"),
        "unexpected result: {result:?}"
    );
}
