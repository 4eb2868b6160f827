//! Output generation for batch results.
//!
//! # Submodules
//!
//! - [`report`]: human-readable blocks printed by the `score` command
//! - [`json`]: JSON file with the full result list

pub mod json;
pub mod report;
