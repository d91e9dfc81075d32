//! Migration orchestration
//!
//! Drives one run: load Sunshine's `apps.json`, turn every GameStream
//! shortcut (and optionally every auto-detected GameStream application) into
//! a Sunshine app, copy the box art, then save the registry.

pub mod migrator;

pub use migrator::Migrator;

use crate::gamestream;
use crate::registry::RegistryManager;
use std::path::PathBuf;

/// Get the default box-art destination
///
/// Returns: %USERPROFILE%\Pictures\Sunshine
pub fn default_image_dir() -> PathBuf {
    let user_profile = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(user_profile).join("Pictures").join("Sunshine")
}

/// Settings for one migration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Sunshine `apps.json`
    pub apps_path: PathBuf,
    /// Box-art destination directory
    pub image_dir: PathBuf,
    /// GameStream shortcut directory
    pub shortcut_dir: PathBuf,
    /// GameStream backend directory, read when importing auto-detected apps
    pub gamestream_dir: PathBuf,
    /// Report what would be migrated without writing anything
    pub dry_run: bool,
    /// Also import the applications GameStream detected itself
    pub import_autodetected: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            apps_path: RegistryManager::default_apps_path(),
            image_dir: default_image_dir(),
            shortcut_dir: gamestream::default_shortcut_dir(),
            gamestream_dir: gamestream::nvidia_base_dir(),
            dry_run: false,
            import_autodetected: false,
        }
    }
}

/// What a run did, by app name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Apps added to the registry
    pub added: Vec<String>,
    /// Apps left out on purpose (already registered, not streamable, no metadata)
    pub skipped: Vec<String>,
    /// Apps that could not be read or normalized
    pub failed: Vec<String>,
}

impl MigrationSummary {
    /// Number of apps added
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}
