//! Step definitions for task editor submission scenarios.

mod given;
mod then;
mod when;
pub mod world;
