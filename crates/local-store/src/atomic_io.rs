//! Atomic slot file writes.
//!
//! A slot is written to a hidden temporary file next to its target and then
//! renamed over it, so readers observe either the previous value or the new
//! one and never a truncated file.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::Utf8PathBuf;
use cap_std::fs::{Dir, OpenOptions};

use crate::error::StoreError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replaces the contents of `file_name` inside `dir` atomically.
///
/// `file_name` must be a single path component; callers validate slot keys
/// before reaching this function.
pub(crate) fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> Result<(), StoreError> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    write_to_temp_file(dir, &tmp_name, contents)?;
    if let Err(err) = rename_into_place(dir, &tmp_name, file_name) {
        if dir.remove_file(&tmp_name).is_err() {
            // Leftover temp files are hidden and harmless.
        }
        return Err(StoreError::Write {
            path: Utf8PathBuf::from(file_name),
            message: err.to_string(),
        });
    }
    sync_directory(dir);

    Ok(())
}

fn write_to_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> Result<(), StoreError> {
    let write_error = |err: io::Error| StoreError::Write {
        path: Utf8PathBuf::from(tmp_name),
        message: err.to_string(),
    };

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options).map_err(write_error)?;

    let outcome = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    if let Err(err) = outcome {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(write_error(err));
    }

    Ok(())
}

#[cfg(windows)]
fn rename_into_place(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_into_place(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_directory(dir: &Dir) {
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Directory sync is best effort.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cap_std::ambient_authority;

    #[expect(clippy::expect_used, reason = "test setup fails fast")]
    fn temp_dir() -> (tempfile::TempDir, Dir) {
        let temp = tempfile::tempdir().expect("temp dir");
        let dir = Dir::open_ambient_dir(temp.path(), ambient_authority()).expect("open temp dir");
        (temp, dir)
    }

    #[test]
    #[expect(clippy::expect_used, reason = "test assertions fail fast")]
    fn replaces_existing_contents() {
        let (_guard, dir) = temp_dir();
        write_atomic(&dir, "favorites", "[1]").expect("first write");
        write_atomic(&dir, "favorites", "[1,2]").expect("second write");

        assert_eq!(dir.read_to_string("favorites").expect("read back"), "[1,2]");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "test assertions fail fast")]
    fn leaves_no_temp_files_behind() {
        let (_guard, dir) = temp_dir();
        write_atomic(&dir, "theme", "dark").expect("write");

        let names: Vec<String> = dir
            .entries()
            .expect("list entries")
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        assert_eq!(names, vec!["theme".to_owned()]);
    }
}
