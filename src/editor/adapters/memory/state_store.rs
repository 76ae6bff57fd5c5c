//! In-memory panel state slot.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::editor::{
    domain::PanelState,
    ports::{PanelStateStore, StateStoreError, StateStoreResult},
};

/// Thread-safe single-slot state store.
///
/// The state is held in its serialized JSON form so a round trip through
/// the store exercises the same encoding as a persistent backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPanelStateStore {
    slot: Arc<RwLock<Option<String>>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryPanelStateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a raw JSON document.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(raw.into()))),
            saves: Arc::default(),
        }
    }

    /// Returns the stored JSON document, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot.read().ok().and_then(|guard| guard.clone())
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl PanelStateStore for InMemoryPanelStateStore {
    fn load(&self) -> StateStoreResult<Option<PanelState>> {
        let guard = self.slot.read().map_err(|err| {
            StateStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        guard
            .as_deref()
            .map(serde_json::from_str::<PanelState>)
            .transpose()
            .map_err(StateStoreError::from)
    }

    fn save(&self, state: &PanelState) -> StateStoreResult<()> {
        let encoded = serde_json::to_string(state)?;
        let mut guard = self.slot.write().map_err(|err| {
            StateStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        *guard = Some(encoded);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
