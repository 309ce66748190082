//! Command implementations for Workbelt CLI

pub mod completions;
pub mod helpers;
pub mod install;
pub mod list;
pub mod version;
