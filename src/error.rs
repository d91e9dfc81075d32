//! Error types for `gsms`
//!
//! This module defines all error types used throughout the migration,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains so the binary can
//! print the full cause with `{:#}`.

use std::path::PathBuf;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new boxed `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `gsms`
#[derive(Debug, Error)]
pub enum GsmsError {
    /// Text is not a well-formed folder identifier
    #[error("Invalid folder identifier: {0}")]
    InvalidIdentifier(String),

    /// Well-formed identifier that the operating system does not know
    #[error("Known folder not found: {0}")]
    FolderNotFound(String),

    /// Known folder lookup is not available on this platform
    #[error("Known folder resolution is not supported on this platform")]
    UnsupportedPlatform,

    /// The Sunshine `apps.json` file does not exist
    #[error("Sunshine apps file not found: {}", .0.display())]
    AppsFileNotFound(PathBuf),

    /// A shortcut file could not be decoded
    #[error("Invalid shortcut: {0}")]
    InvalidShortcut(String),

    /// GameStream application data could not be used
    /// Preserves the underlying error source for full error chain transparency
    #[error("GameStream data error: {0}")]
    GameStreamDataError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    LoggingError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Windows API error
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApiError(#[from] windows::core::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML parse error
    #[error("XML error: {0}")]
    XmlError(#[from] roxmltree::Error),
}

/// Result type alias for `gsms` operations
pub type Result<T> = std::result::Result<T, GsmsError>;

/// Convert an error to a message suitable for the console
///
/// Adds troubleshooting hints for the failures users can fix themselves.
pub fn get_user_friendly_error(error: &GsmsError) -> String {
    match error {
        GsmsError::AppsFileNotFound(path) => format!(
            "Specified apps.json does not exist: {}\n\n\
             If you used the Sunshine Windows installer, run Sunshine once so it creates\n\
             the file in the default installation directory.\n\
             Use `--apps` to give the full path of a file in a custom location.",
            path.display()
        ),
        GsmsError::InvalidIdentifier(id) => {
            format!("A shortcut refers to a malformed folder identifier: {id}")
        }
        GsmsError::FolderNotFound(id) => format!(
            "Windows does not know the folder {id}.\n\n\
             The shortcut may have been created on another Windows version."
        ),
        GsmsError::UnsupportedPlatform => "Known folders can only be resolved on Windows.\n\n\
             Run gsms on the machine that hosts GameStream."
            .to_string(),
        GsmsError::InvalidShortcut(reason) => format!(
            "A GameStream shortcut could not be read: {reason}\n\n\
             Re-create the shortcut from GeForce Experience and try again."
        ),
        GsmsError::GameStreamDataError(e) => format!(
            "GameStream application data could not be read:\n\n{e}\n\n\
             Make sure GeForce Experience has scanned for games at least once."
        ),
        GsmsError::LoggingError(e) => format!("Failed to set up logging:\n\n{e}"),
        #[cfg(windows)]
        GsmsError::WindowsApiError(e) => format!(
            "A Windows API error occurred:\n\n{e}\n\n\
             Please ensure your Windows installation is up to date."
        ),
        GsmsError::IoError(e) => format!(
            "A file system error occurred:\n\n{e}\n\n\
             Please check file permissions. Writing to Program Files requires an elevated prompt."
        ),
        GsmsError::JsonError(e) => format!(
            "apps.json is not valid JSON:\n\n{e}\n\n\
             Fix or restore the file before migrating."
        ),
        GsmsError::XmlError(e) => format!(
            "The GameStream application list is corrupted:\n\n{e}\n\n\
             Rescan games in GeForce Experience or run without `--nv_add_autodetect`."
        ),
    }
}
