//! Nvidia GameStream data locations
//!
//! GameStream (GeForce Experience) keeps user-added shortcuts in
//! `%LOCALAPPDATA%\NVIDIA Corporation\Shield Apps` and its own application
//! database under `%LOCALAPPDATA%\NVIDIA\NvBackend`.

pub mod autodetect;

pub use autodetect::{DetectedApp, GameStreamLibrary};

use std::path::PathBuf;

fn local_app_data() -> PathBuf {
    PathBuf::from(std::env::var("LOCALAPPDATA").unwrap_or_else(|_| ".".to_string()))
}

/// Get the default GameStream shortcut directory
///
/// Returns: %LOCALAPPDATA%\NVIDIA Corporation\Shield Apps
pub fn default_shortcut_dir() -> PathBuf {
    local_app_data()
        .join("NVIDIA Corporation")
        .join("Shield Apps")
}

/// Get the GameStream backend directory holding the auto-detected apps
///
/// Returns: %LOCALAPPDATA%\NVIDIA\NvBackend
pub fn nvidia_base_dir() -> PathBuf {
    local_app_data().join("NVIDIA").join("NvBackend")
}
