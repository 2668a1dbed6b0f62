//! Backend services for the activity directory.
//!
//! This module provides the service layer abstractions and implementations
//! for listing activities and managing their participant rosters. Currently
//! includes an in-memory implementation; a persistent store can be swapped
//! in behind the same trait later.

pub mod activities;

pub use activities::*;
