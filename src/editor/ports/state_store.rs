//! Port for persisting panel state across panel reloads.
//!
//! The store is a single slot scoped to one panel instance. Every save is
//! an overwrite; the last write wins.

use crate::editor::domain::PanelState;
use std::sync::Arc;
use thiserror::Error;

/// Result type for state store operations.
pub type StateStoreResult<T> = Result<T, StateStoreError>;

/// Key-value persistence for one panel's state.
pub trait PanelStateStore: Send + Sync {
    /// Loads the saved state, or `None` on first run.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError`] when the slot exists but cannot be read
    /// or decoded.
    fn load(&self) -> StateStoreResult<Option<PanelState>>;

    /// Overwrites the saved state.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError`] when the state cannot be encoded or
    /// written.
    fn save(&self, state: &PanelState) -> StateStoreResult<()>;
}

/// Errors returned by panel state stores.
#[derive(Debug, Clone, Error)]
pub enum StateStoreError {
    /// The saved state could not be encoded or decoded.
    #[error("panel state serialization failed: {0}")]
    Serialization(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StateStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<serde_json::Error> for StateStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
