//! Port contracts for the editor panel.
//!
//! Ports define infrastructure-agnostic interfaces used by the controller.

pub mod host;
pub mod state_store;

pub use host::{HostChannelError, HostChannelResult, HostEventSource, HostSink};
pub use state_store::{PanelStateStore, StateStoreError, StateStoreResult};
