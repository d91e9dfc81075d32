//! GameStream shortcut source
//!
//! GameStream keeps one `.lnk` file per streamable application in its
//! "Shield Apps" directory, with box art under `StreamingAssets\<name>`.
//! This module lists those shortcuts and reads each into a `RawShortcut`.

pub mod link;

pub use link::ShellLink;

use crate::error::{GsmsError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension of shortcut files
const SHORTCUT_EXTENSION: &str = "lnk";

/// Name of the box-art file inside each `StreamingAssets\<name>` directory
const BOX_ART_FILE: &str = "box-art.png";

/// A shortcut as GameStream stored it, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawShortcut {
    /// Display name, the shortcut file name without its extension
    pub name: String,
    /// Target path, possibly starting with a `::{KNOWNFOLDERID}` prefix
    pub target_path: String,
    /// Working directory, if the shortcut sets one
    pub working_dir: Option<String>,
}

impl RawShortcut {
    /// Read a `.lnk` file
    pub fn from_lnk(path: &Path) -> Result<Self> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| GsmsError::InvalidShortcut(format!("{} has no name", path.display())))?;

        let link = ShellLink::open(path)?;
        if let Some(arguments) = link.arguments.as_deref().filter(|a| !a.is_empty()) {
            debug!("{} has arguments {:?}, which are not migrated", name, arguments);
        }

        let target_path = link
            .target_path()
            .ok_or_else(|| GsmsError::InvalidShortcut(format!("{} has no target", path.display())))?
            .to_string();

        Ok(Self {
            name,
            target_path,
            working_dir: link.working_dir.filter(|dir| !dir.is_empty()),
        })
    }

    /// Box art GameStream stored for this shortcut
    pub fn box_art_source(&self, shortcut_dir: &Path) -> PathBuf {
        shortcut_dir
            .join("StreamingAssets")
            .join(&self.name)
            .join(BOX_ART_FILE)
    }

    /// Sunshine log file name: lower-case, spaces replaced by underscores
    pub fn log_file_name(&self) -> String {
        format!("{}.log", self.name.to_lowercase().replace(' ', "_"))
    }
}

/// List the `.lnk` files of a shortcut directory, sorted by file name
pub fn scan_shortcut_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut shortcuts = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_shortcut = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SHORTCUT_EXTENSION));

        if is_shortcut && entry.file_type()?.is_file() {
            shortcuts.push(path);
        }
    }

    shortcuts.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} shortcuts in {}", shortcuts.len(), dir.display());
    Ok(shortcuts)
}
