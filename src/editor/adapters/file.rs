//! File-backed panel state store.
//!
//! Each panel owns one `<panel-id>.json` document inside a directory opened
//! through `cap-std`, so the store cannot reach outside that directory.

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::editor::{
    domain::{PanelId, PanelState},
    ports::{PanelStateStore, StateStoreError, StateStoreResult},
};

/// Single-slot state store persisted as a JSON file.
#[derive(Debug)]
pub struct FilePanelStateStore {
    dir: Dir,
    file_name: String,
    staging_name: String,
}

impl FilePanelStateStore {
    /// Creates a store for `panel_id` inside an already opened directory.
    #[must_use]
    pub fn new(dir: Dir, panel_id: PanelId) -> Self {
        Self {
            dir,
            file_name: format!("{panel_id}.json"),
            staging_name: format!(".{panel_id}.json.tmp"),
        }
    }

    /// Opens `path` with ambient authority and creates a store for
    /// `panel_id` inside it.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Persistence`] when the directory cannot be
    /// opened.
    pub fn open_ambient(path: impl AsRef<Path>, panel_id: PanelId) -> StateStoreResult<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(StateStoreError::persistence)?;
        Ok(Self::new(dir, panel_id))
    }

    /// Name of the document holding the state.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl PanelStateStore for FilePanelStateStore {
    fn load(&self) -> StateStoreResult<Option<PanelState>> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(file = %self.file_name, "no saved panel state");
                Ok(None)
            }
            Err(err) => Err(StateStoreError::persistence(err)),
        }
    }

    fn save(&self, state: &PanelState) -> StateStoreResult<()> {
        let encoded = serde_json::to_vec(state)?;
        // Write then rename so a reader never sees a partial document.
        self.dir
            .write(&self.staging_name, encoded)
            .map_err(StateStoreError::persistence)?;
        self.dir
            .rename(&self.staging_name, &self.dir, &self.file_name)
            .map_err(StateStoreError::persistence)
    }
}
