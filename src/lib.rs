//! State synchronization and validation engine for a kanban task editor.
//!
//! The editor panel edits one task of a board owned by a host process. The
//! host pushes authoritative snapshots; the panel keeps a local draft,
//! validates it and posts fire-and-forget intent messages back.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: pure types and functions with no infrastructure dependencies
//! - **Ports**: trait interfaces for the host channel and state persistence
//! - **Adapters**: in-memory, `tokio` channel and file-backed implementations
//! - **Services**: the controller orchestrating snapshots, edits and submits
//!
//! # Modules
//!
//! - [`editor`]: the task editor bounded context
//! - [`telemetry`]: tracing subscriber installation

pub mod editor;
pub mod telemetry;
