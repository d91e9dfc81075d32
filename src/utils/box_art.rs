//! Box-art copy
//!
//! GeForce Experience converts all box art to PNG, so images are copied as-is
//! and never converted.

use crate::error::Result;
use std::path::Path;
use tracing::info;

/// Outcome of a box-art copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The image was copied
    Copied,
    /// The destination already existed and was left untouched
    AlreadyPresent,
    /// There is no source image
    SourceMissing,
}

/// Copy `source` to `destination` unless the destination already exists
///
/// The copy keeps the source's modification time.
pub fn copy_box_art(source: &Path, destination: &Path) -> Result<CopyOutcome> {
    if !source.is_file() {
        info!("No box-art image found at: {}", source.display());
        return Ok(CopyOutcome::SourceMissing);
    }
    if destination.is_file() {
        info!("Box-art image already present at: {}", destination.display());
        return Ok(CopyOutcome::AlreadyPresent);
    }

    std::fs::copy(source, destination)?;

    // fs::copy carries permissions but not timestamps
    let modified = std::fs::metadata(source)?.modified()?;
    std::fs::File::options()
        .write(true)
        .open(destination)?
        .set_modified(modified)?;

    info!("Copied box-art image to: {}", destination.display());
    Ok(CopyOutcome::Copied)
}
