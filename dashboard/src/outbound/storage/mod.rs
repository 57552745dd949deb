//! Local store adapter persisting dashboard slots with `local-store`.
//!
//! Collections are stored as JSON arrays under the slot names the domain
//! defines; the theme is stored as the bare string `light` or `dark`. Each
//! slot is read independently, so one unreadable slot never blanks another.

use camino::Utf8Path;
use local_store::{SlotStore, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::Theme;
use crate::domain::ports::{
    FAVORITES_SLOT, LOCAL_COMMENTS_SLOT, LOCAL_POSTS_SLOT, LOCAL_USERS_SLOT, LocalRecords,
    LocalSnapshot, LocalStore, LocalStoreError, THEME_SLOT,
};

/// [`LocalStore`] backed by one file per slot in a data directory.
#[derive(Debug)]
pub struct SlotLocalStore {
    slots: SlotStore,
}

impl SlotLocalStore {
    /// Open or create the data directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] when the directory is unusable.
    pub fn open(root: &Utf8Path) -> Result<Self, StoreError> {
        Ok(Self::new(SlotStore::open(root)?))
    }

    /// Wrap an already opened slot store.
    #[must_use]
    pub const fn new(slots: SlotStore) -> Self {
        Self { slots }
    }

    fn read_slot<T>(&self, slot: &str, reset: &mut Vec<String>) -> T
    where
        T: DeserializeOwned + Default,
    {
        let decoded = self.slots.get(slot).map_err(|err| err.to_string()).and_then(|raw| {
            raw.map_or(Ok(None), |text| {
                serde_json::from_str::<Option<T>>(&text).map_err(|err| err.to_string())
            })
        });
        match decoded {
            Ok(value) => value.unwrap_or_default(),
            Err(message) => {
                warn!(slot, error = %message, "resetting unreadable slot");
                reset.push(slot.to_owned());
                T::default()
            }
        }
    }

    fn read_theme(&self, reset: &mut Vec<String>) -> Theme {
        match self.slots.get(THEME_SLOT) {
            Ok(raw) => raw.as_deref().map(Theme::from_stored).unwrap_or_default(),
            Err(err) => {
                warn!(slot = THEME_SLOT, error = %err, "resetting unreadable slot");
                reset.push(THEME_SLOT.to_owned());
                Theme::default()
            }
        }
    }

    fn write_slot<T: Serialize + ?Sized>(
        &self,
        slot: &str,
        value: &T,
    ) -> Result<(), LocalStoreError> {
        let encoded = serde_json::to_string(value)
            .map_err(|err| LocalStoreError::encode(slot, err.to_string()))?;
        self.slots
            .set(slot, &encoded)
            .map_err(|err| LocalStoreError::write(slot, err.to_string()))
    }
}

impl LocalStore for SlotLocalStore {
    fn load(&self) -> LocalSnapshot {
        let mut reset_slots = Vec::new();
        let records = LocalRecords {
            favorites: self.read_slot(FAVORITES_SLOT, &mut reset_slots),
            users: self.read_slot(LOCAL_USERS_SLOT, &mut reset_slots),
            posts: self.read_slot(LOCAL_POSTS_SLOT, &mut reset_slots),
            comments: self.read_slot(LOCAL_COMMENTS_SLOT, &mut reset_slots),
        };
        let theme = self.read_theme(&mut reset_slots);
        LocalSnapshot {
            records,
            theme,
            reset_slots,
        }
    }

    fn save(&self, records: &LocalRecords) -> Result<(), LocalStoreError> {
        self.write_slot(FAVORITES_SLOT, &records.favorites)?;
        self.write_slot(LOCAL_USERS_SLOT, &records.users)?;
        self.write_slot(LOCAL_POSTS_SLOT, &records.posts)?;
        self.write_slot(LOCAL_COMMENTS_SLOT, &records.comments)
    }

    fn save_theme(&self, theme: Theme) -> Result<(), LocalStoreError> {
        self.slots
            .set(THEME_SLOT, theme.as_str())
            .map_err(|err| LocalStoreError::write(THEME_SLOT, err.to_string()))
    }
}
