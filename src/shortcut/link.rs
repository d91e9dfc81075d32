//! Shell Link (`.lnk`) reader
//!
//! The `lnk` crate decodes the file: header, link target ID list, link info
//! and string data. This module turns the result into the paths a migration
//! needs.
//!
//! The target path is taken from the link info block when it has a local
//! path. Otherwise it is rendered from the ID list, where a root folder other
//! than "This PC" becomes a `::{KNOWNFOLDERID}` prefix that the command
//! normalizer expands later.

use crate::error::{GsmsError, Result};
use crate::known_folder::FolderIdentifier;
use lnk::encoding::{UTF_16LE, WINDOWS_1252};
use lnk::{ItemID, LinkInfo};
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// "This PC"; paths below it start with a drive instead of a folder prefix
const MY_COMPUTER: Uuid = Uuid::from_u128(0x20D0_4FE0_3AEA_1069_A2D8_0800_2B30_309D);

/// Shell item type classes (high nibble of the class type indicator)
const ITEM_ROOT_FOLDER: u8 = 0x1F;
const ITEM_CLASS_MASK: u8 = 0x70;
const ITEM_CLASS_VOLUME: u8 = 0x20;
const ITEM_CLASS_FILE_ENTRY: u8 = 0x30;
/// File entry flag: the primary name is UTF-16
const ITEM_FILE_ENTRY_UNICODE: u8 = 0x04;

/// Extension block holding the long file name of a file entry item
const BEEF0004_SIGNATURE: [u8; 4] = [0x04, 0x00, 0xEF, 0xBE];

/// Decoded shortcut
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellLink {
    /// Path rendered from the link target ID list
    pub id_list_path: Option<String>,
    /// Local base path plus common path suffix from the link info block
    pub link_info_path: Option<String>,
    /// Description
    pub name: Option<String>,
    /// Path relative to the shortcut file
    pub relative_path: Option<String>,
    /// Working directory
    pub working_dir: Option<String>,
    /// Command line arguments
    pub arguments: Option<String>,
}

impl ShellLink {
    /// Read and decode a shortcut file
    ///
    /// Non-Unicode shortcuts are decoded as Windows-1252.
    pub fn open(path: &Path) -> Result<Self> {
        let link = lnk::ShellLink::open(path, WINDOWS_1252).map_err(|e| match e {
            lnk::Error::IoError(io) => GsmsError::IoError(io),
            other => GsmsError::InvalidShortcut(format!("{}: {other}", path.display())),
        })?;

        Ok(Self::from(&link))
    }

    /// Best available target path
    ///
    /// Link info path first, then the ID list path, then the relative path.
    pub fn target_path(&self) -> Option<&str> {
        [
            &self.link_info_path,
            &self.id_list_path,
            &self.relative_path,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|path| !path.is_empty())
    }
}

impl From<&lnk::ShellLink> for ShellLink {
    fn from(link: &lnk::ShellLink) -> Self {
        let strings = link.string_data();

        Self {
            id_list_path: link
                .linktarget_id_list()
                .as_ref()
                .and_then(|list| render_id_list(list.id_list())),
            link_info_path: link.link_info().as_ref().and_then(link_info_path),
            name: strings.name_string().clone(),
            relative_path: strings.relative_path().clone(),
            working_dir: strings.working_dir().clone(),
            arguments: strings.command_line_arguments().clone(),
        }
    }
}

/// Render the ID list as a path, or `None` if it holds items we cannot name
fn render_id_list(items: &[ItemID]) -> Option<String> {
    let mut segments: Vec<String> = Vec::new();

    for item in items {
        match render_item(item.data()) {
            Some(segment) if segment.is_empty() => {}
            Some(segment) => segments.push(segment),
            None => {
                debug!(
                    "Unsupported shell item type {:#04x}",
                    item.data().first().unwrap_or(&0)
                );
                return None;
            }
        }
    }

    (!segments.is_empty()).then(|| segments.join("\\"))
}

/// One path segment; empty for "This PC", `None` for unknown item types
fn render_item(item: &[u8]) -> Option<String> {
    let class = *item.first()?;

    if class == ITEM_ROOT_FOLDER {
        let clsid: [u8; 16] = item.get(2..18)?.try_into().ok()?;
        let folder = Uuid::from_bytes_le(clsid);
        if folder == MY_COMPUTER {
            return Some(String::new());
        }
        return Some(format!("::{}", FolderIdentifier::from(folder)));
    }

    match class & ITEM_CLASS_MASK {
        ITEM_CLASS_VOLUME => {
            let drive = decode_code_page(until_nul(item.get(1..)?));
            Some(drive.trim_end_matches('\\').to_string())
        }
        ITEM_CLASS_FILE_ENTRY => file_entry_name(class, item),
        _ => None,
    }
}

/// Long name from the `0xBEEF0004` block, falling back to the primary name
fn file_entry_name(class: u8, item: &[u8]) -> Option<String> {
    if let Some(long_name) = beef0004_long_name(item) {
        return Some(long_name);
    }

    // class, unknown, file size, modification time, attributes
    let name = item.get(12..)?;
    if class & ITEM_FILE_ENTRY_UNICODE != 0 {
        Some(decode_utf16(until_nul_wide(name)))
    } else {
        Some(decode_code_page(until_nul(name)))
    }
}

fn beef0004_long_name(item: &[u8]) -> Option<String> {
    let signature_at = item
        .windows(BEEF0004_SIGNATURE.len())
        .position(|window| window == BEEF0004_SIGNATURE)?;
    // The block starts with its size and version, 4 bytes before the signature
    let block = item.get(signature_at.checked_sub(4)?..)?;
    let version = u16::from_le_bytes(block.get(2..4)?.try_into().ok()?);

    // size, version, signature, creation and access time, identifier
    let mut offset = 18;
    if version >= 7 {
        // unknown, NTFS file reference, unknown
        offset += 18;
    }
    if version >= 3 {
        // long string size
        offset += 2;
    }
    if version >= 9 {
        offset += 4;
    }
    if version >= 8 {
        offset += 4;
    }

    let name = decode_utf16(until_nul_wide(block.get(offset..)?));
    (!name.is_empty()).then_some(name)
}

/// Local base path plus common path suffix, if the target is on a local volume
///
/// Unicode strings win over their code page copies. Network targets have no
/// local base path and fall back to the ID list.
fn link_info_path(info: &LinkInfo) -> Option<String> {
    let Some(base) = info
        .local_base_path_unicode()
        .as_deref()
        .or(info.local_base_path())
    else {
        debug!("LinkInfo has no local base path");
        return None;
    };
    let suffix = info
        .common_path_suffix_unicode()
        .as_deref()
        .unwrap_or(info.common_path_suffix());

    let mut path = base.to_string();
    if !suffix.is_empty() {
        // Exactly one separator between base and suffix
        if !path.is_empty() && !path.ends_with('\\') {
            path.push('\\');
        }
        path.push_str(suffix);
    }
    (!path.is_empty()).then_some(path)
}

fn until_nul(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    &bytes[..end]
}

fn until_nul_wide(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .chunks_exact(2)
        .position(|pair| pair == [0, 0])
        .map_or(bytes.len() - bytes.len() % 2, |units| units * 2);
    &bytes[..end]
}

fn decode_code_page(bytes: &[u8]) -> String {
    WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned()
}

fn decode_utf16(bytes: &[u8]) -> String {
    UTF_16LE.decode_without_bom_handling(bytes).0.into_owned()
}
