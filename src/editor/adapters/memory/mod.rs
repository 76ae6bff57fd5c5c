//! In-memory adapters for controller tests and embedding without a host.

mod host;
mod state_store;

pub use host::{RecordingHostSink, ScriptedHostSource};
pub use state_store::InMemoryPanelStateStore;
