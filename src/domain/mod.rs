//! Domain models for Workbelt
//!
//! This module contains pure domain objects representing core business entities.
//! These types are free of configuration parsing and process handling concerns.

pub mod dependency;

pub use dependency::Dependency;
