//! File-per-key slot store.

use std::io;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use crate::atomic_io::write_atomic;
use crate::error::StoreError;

/// Returns whether `key` can name a slot.
///
/// Keys are non-empty and limited to ASCII letters, digits, `_` and `-`, so
/// every key maps to exactly one file inside the store directory.
///
/// # Example
///
/// ```
/// use local_store::is_valid_key;
///
/// assert!(is_valid_key("localComments"));
/// assert!(!is_valid_key("../theme"));
/// assert!(!is_valid_key(""));
/// ```
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

/// Durable string slots kept as files in one directory.
///
/// The store holds a capability handle to its directory; all reads and
/// writes are confined to it.
#[derive(Debug)]
pub struct SlotStore {
    dir: Dir,
}

impl SlotStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] when the directory cannot be created or
    /// opened.
    pub fn open(root: &Utf8Path) -> Result<Self, StoreError> {
        let open_error = |err: io::Error| StoreError::Open {
            path: root.to_path_buf(),
            message: err.to_string(),
        };
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;
        Ok(Self { dir })
    }

    /// Reads a slot, returning `None` when it has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] for malformed keys and
    /// [`StoreError::Read`] when the slot file exists but cannot be read.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        ensure_valid_key(key)?;
        match self.dir.read_to_string(key) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Read {
                key: key.to_owned(),
                message: err.to_string(),
            }),
        }
    }

    /// Writes a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] for malformed keys and
    /// [`StoreError::Write`] when the file cannot be replaced.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        ensure_valid_key(key)?;
        write_atomic(&self.dir, key, value)?;
        debug!(slot = key, bytes = value.len(), "slot written");
        Ok(())
    }

}

fn ensure_valid_key(key: &str) -> Result<(), StoreError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(StoreError::InvalidKey {
            key: key.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::camel_case("localUsers", true)]
    #[case::snake_case("local_users", true)]
    #[case::kebab_case("local-users", true)]
    #[case::empty("", false)]
    #[case::parent_dir("..", false)]
    #[case::nested("a/b", false)]
    #[case::dotted("theme.json", false)]
    #[case::whitespace("my slot", false)]
    fn validates_keys(#[case] key: &str, #[case] expected: bool) {
        assert_eq!(is_valid_key(key), expected);
    }
}
