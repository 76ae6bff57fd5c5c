//! Adapter implementations for editor ports.
//!
//! - [`memory`]: thread-safe in-memory host channel and state store
//! - [`channel`]: `tokio` channel bridges to an embedding host
//! - [`file`]: file-backed panel state store scoped to a directory

pub mod channel;
pub mod file;
pub mod memory;
