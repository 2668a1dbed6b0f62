//! The shared library for Rollcall, a web service for browsing extracurricular
//! activities and managing signups.
//!
//! This library provides the core functionality for the Rollcall backend,
//! including the activity data model, error handling, and logging.

pub mod data;
pub mod errors;
pub mod log;

pub use serde;
pub use serde_json;
pub use tracing;
