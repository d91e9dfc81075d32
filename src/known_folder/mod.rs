//! Known folder resolution
//!
//! Windows names well-known directories (Desktop, Program Files, the Windows
//! directory, ...) with a GUID, the `KNOWNFOLDERID`. GameStream shortcuts
//! embed these GUIDs instead of concrete paths, so every migration has to ask
//! the operating system where each folder currently lives.
//!
//! # Architecture
//!
//! - `FolderIdentifier`: a validated `KNOWNFOLDERID` in canonical text form
//! - `FolderResolver`: the single lookup capability used by the normalizer
//! - `ShellFolderResolver`: backed by `SHGetKnownFolderPath` on Windows,
//!   fails with `UnsupportedPlatform` elsewhere
//! - `FixedFolderResolver`: a lookup table, used by tests and dry runs on
//!   other platforms
//!
//! # Example
//!
//! ```
//! use gsms::known_folder::{FixedFolderResolver, FolderResolver};
//!
//! let resolver = FixedFolderResolver::new()
//!     .with_folder("F38BF404-1D43-42F2-9305-67DE0B28FC23", "C:\\WINDOWS")?;
//! assert_eq!(
//!     resolver.resolve("{F38BF404-1D43-42F2-9305-67DE0B28FC23}")?,
//!     "C:\\WINDOWS"
//! );
//! # Ok::<(), gsms::GsmsError>(())
//! ```

pub mod shell;

pub use shell::ShellFolderResolver;

use crate::error::{GsmsError, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the hyphenated 8-4-4-4-12 form without braces
const HYPHENATED_LEN: usize = 36;

/// A validated known folder identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FolderIdentifier(Uuid);

impl FolderIdentifier {
    /// Parse the canonical 8-4-4-4-12 form, with or without surrounding braces
    pub fn parse(text: &str) -> Result<Self> {
        let inner = match (text.strip_prefix('{'), text.ends_with('}')) {
            (Some(rest), true) => &rest[..rest.len() - 1],
            (None, false) => text,
            _ => return Err(GsmsError::InvalidIdentifier(text.to_string())),
        };

        if inner.len() != HYPHENATED_LEN {
            return Err(GsmsError::InvalidIdentifier(text.to_string()));
        }

        Uuid::try_parse(inner)
            .map(Self)
            .map_err(|_| GsmsError::InvalidIdentifier(text.to_string()))
    }

    /// The identifier as a `Uuid`
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for FolderIdentifier {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for FolderIdentifier {
    type Err = GsmsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FolderIdentifier {
    /// Braced upper-case form, as Windows prints `KNOWNFOLDERID`s
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let upper = self.0.hyphenated().to_string().to_uppercase();
        write!(f, "{{{upper}}}")
    }
}

/// Maps a known folder identifier to the absolute path of that folder
///
/// Implementations must validate the identifier first and fail with
/// `InvalidIdentifier` before doing any lookup. Results are never cached:
/// the location of a known folder can change between users and OS versions.
pub trait FolderResolver {
    /// Resolve `identifier` (braced or bare canonical GUID text) to a path
    fn resolve(&self, identifier: &str) -> Result<String>;
}

impl<R: FolderResolver + ?Sized> FolderResolver for &R {
    fn resolve(&self, identifier: &str) -> Result<String> {
        (**self).resolve(identifier)
    }
}

/// Resolver backed by a fixed table of folders
#[derive(Debug, Clone, Default)]
pub struct FixedFolderResolver {
    folders: HashMap<FolderIdentifier, String>,
}

impl FixedFolderResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a folder to the table
    pub fn with_folder(mut self, identifier: &str, path: impl Into<String>) -> Result<Self> {
        let id = FolderIdentifier::parse(identifier)?;
        self.folders.insert(id, path.into());
        Ok(self)
    }
}

impl FolderResolver for FixedFolderResolver {
    fn resolve(&self, identifier: &str) -> Result<String> {
        let id = FolderIdentifier::parse(identifier)?;
        self.folders
            .get(&id)
            .cloned()
            .ok_or_else(|| GsmsError::FolderNotFound(id.to_string()))
    }
}
