//! Shell-backed known folder lookup
//!
//! Uses `SHGetKnownFolderPath` from Shell32. The path buffer returned by the
//! shell is owned by COM's task allocator; it is copied into a `String` and
//! released with `CoTaskMemFree` before returning.

use super::{FolderIdentifier, FolderResolver};
use crate::error::{GsmsError, Result};
use tracing::debug;

/// Resolver that asks the running operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellFolderResolver;

impl ShellFolderResolver {
    /// Create a new shell resolver
    pub fn new() -> Self {
        Self
    }
}

impl FolderResolver for ShellFolderResolver {
    fn resolve(&self, identifier: &str) -> Result<String> {
        let id = FolderIdentifier::parse(identifier)?;
        let path = known_folder_path(id)?;
        debug!("Resolved known folder {} to {}", id, path);
        Ok(path)
    }
}

/// # Safety
///
/// Sound FFI call: the GUID lives on the stack for the duration of the call,
/// the returned `PWSTR` is only read after a successful HRESULT, and it is
/// freed exactly once with `CoTaskMemFree` after being copied.
#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Required for Windows FFI to call SHGetKnownFolderPath and free its buffer"
)]
fn known_folder_path(id: FolderIdentifier) -> Result<String> {
    use windows::Win32::System::Com::CoTaskMemFree;
    use windows::Win32::UI::Shell::{KF_FLAG_DEFAULT, SHGetKnownFolderPath};
    use windows::core::GUID;

    // Same 128-bit value, windows-rs field layout
    let guid = GUID::from_u128(id.as_uuid().as_u128());

    // SAFETY: `guid` outlives the call; no token means the current user
    let buffer = unsafe { SHGetKnownFolderPath(&raw const guid, KF_FLAG_DEFAULT, None) }
        .map_err(|e| {
            debug!("SHGetKnownFolderPath failed for {}: {}", id, e);
            GsmsError::FolderNotFound(id.to_string())
        })?;

    // SAFETY: the call succeeded, so `buffer` is a valid NUL-terminated string
    let path = unsafe { buffer.to_string() };

    // SAFETY: allocated by the shell with the COM task allocator, freed once here
    unsafe {
        CoTaskMemFree(Some(buffer.0 as *const _));
    }

    path.map_err(|e| GsmsError::FolderNotFound(format!("{id}: {e}")))
}

#[cfg(not(windows))]
fn known_folder_path(id: FolderIdentifier) -> Result<String> {
    debug!("Known folder lookup for {} is not supported on this platform", id);
    Err(GsmsError::UnsupportedPlatform)
}
