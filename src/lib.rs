//! `gsms` - GameStream to Sunshine migration
//!
//! Imports the applications configured in Nvidia GameStream into Sunshine's
//! `apps.json` and copies their box art. Shortcut targets that embed a Windows
//! known folder (`::{KNOWNFOLDERID}\...`) are resolved to concrete paths, and
//! each launch target is classified as a tracked child process or a detached
//! command (URI or `start` invocation).
//!
//! # Architecture
//!
//! - `known_folder`: `FolderResolver` with a Windows shell implementation and a fixed table
//! - `command`: the launch command normalizer
//! - `registry`: Sunshine's `apps.json` model, duplicate check and append, load/save
//! - `shortcut`: GameStream `.lnk` shortcuts and the Shell Link reader
//! - `gamestream`: GameStream's own auto-detected applications
//! - `migration`: the `Migrator` that ties one run together
//!
//! # Requirements
//!
//! - Windows for known folder resolution; elsewhere only already-resolved paths migrate

// Module declarations
pub mod command;
pub mod error;
pub mod gamestream;
pub mod known_folder;
pub mod migration;
pub mod registry;
pub mod shortcut;
pub mod utils;

// Shared test utilities (only compiled during testing)
#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use error::{GsmsError, Result};
