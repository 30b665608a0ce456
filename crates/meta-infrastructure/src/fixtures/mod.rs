//! File-backed repositories used when no database is configured

pub mod json_repository;

pub use json_repository::{FixtureData, HelpEntry, JsonFixtureRepository};
