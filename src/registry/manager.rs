//! Registry manager for loading and saving Sunshine's `apps.json`
//!
//! The default location is the one used by the Sunshine Windows installer:
//! %ProgramFiles%\Sunshine\config\apps.json. Saves are atomic so an
//! interrupted run never leaves a truncated file behind.

use crate::error::{GsmsError, Result};
use crate::registry::models::SunshineApps;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Indentation used by Sunshine and by the original migration tool
const JSON_INDENT: &[u8] = b"    ";

/// Registry manager
pub struct RegistryManager;

impl RegistryManager {
    /// Get the default path of the Sunshine apps file
    ///
    /// Returns: %ProgramFiles%\Sunshine\config\apps.json
    pub fn default_apps_path() -> PathBuf {
        let program_files = std::env::var("ProgramFiles").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(program_files)
            .join("Sunshine")
            .join("config")
            .join("apps.json")
    }

    /// Load the registry from disk
    ///
    /// Unlike a settings file there is no sensible default: a missing file
    /// means Sunshine is not installed where we expect it.
    pub fn load(path: &Path) -> Result<SunshineApps> {
        // Sunshine creates the file on first start
        if !path.is_file() {
            return Err(GsmsError::AppsFileNotFound(path.to_path_buf()));
        }

        let json = std::fs::read_to_string(path)?;
        // Malformed JSON is an error, never replaced with an empty registry
        let registry: SunshineApps = serde_json::from_str(&json)?;

        info!("Found apps.json file with {} apps.", registry.len());
        Ok(registry)
    }

    /// Save the registry to disk with an atomic write
    ///
    /// Writes to a temporary file in the same directory, then renames it over
    /// the destination.
    pub fn save(path: &Path, registry: &SunshineApps) -> Result<()> {
        // The temp file must live on the same volume for the rename to be atomic
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        // Atomic write: write to temp file, then rename
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(to_pretty_json(registry)?.as_bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|e| GsmsError::IoError(e.error))?;

        debug!("Wrote {}", path.display());
        info!("Saved {} apps to {}", registry.len(), path.display());
        Ok(())
    }
}

/// Serialize with four-space indentation
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(JSON_INDENT));
    value.serialize(&mut serializer)?;

    // serde_json only emits UTF-8
    String::from_utf8(buffer)
        .map_err(|e| GsmsError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
