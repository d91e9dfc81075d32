//! Sunshine app registry
//!
//! This module handles loading, modifying and saving Sunshine's `apps.json`.
//! Only the `apps` array is interpreted; every other key is carried through
//! unchanged. Saving uses an atomic temp-file-and-rename write.

pub mod manager;
pub mod models;

pub use manager::RegistryManager;
pub use models::{NormalizedApp, SunshineApp, SunshineApps};
