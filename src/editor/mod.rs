//! Task editor panel for a kanban board.
//!
//! The panel derives an editable draft from host snapshots, validates it
//! against the locally known board and posts create, update, delete and
//! archive intents back to the host. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Validation rules in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Settings in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
