#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `gsms` unit tests.
//!
//! This module provides common test infrastructure used across multiple test modules.
//! It is only compiled during testing (`#[cfg(test)]`).

use crate::registry::{RegistryManager, SunshineApps};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use uuid::Uuid;

/// Global mutex to serialize tests that modify environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// The `apps.json` a fresh Sunshine install ships with
pub fn sunshine_default_apps() -> SunshineApps {
    serde_json::from_str(
        r#"{
            "env": {
                "PATH": "$(PATH);$(ProgramFiles(x86))\\Steam"
            },
            "apps": [
                {
                    "name": "Desktop",
                    "image-path": "desktop.png"
                },
                {
                    "name": "Steam Big Picture",
                    "detached": ["steam steam://open/bigpicture"],
                    "image-path": "steam.png"
                }
            ]
        }"#,
    )
    .unwrap()
}

/// Save `registry` as `apps.json` in `dir` and return the file path
pub fn write_apps_file(dir: &Path, registry: &SunshineApps) -> PathBuf {
    let path = dir.join("apps.json");
    RegistryManager::save(&path, registry).unwrap();
    path
}

/// RAII guard that sets an environment variable for a test scope
/// and restores the original value when dropped.
///
/// `ENV_LOCK` is held for the guard's lifetime, so tests that change the
/// environment run one at a time.
pub struct EnvVarGuard {
    name: &'static str,
    original: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables while holding ENV_LOCK"
)]
impl EnvVarGuard {
    /// Set `name` to `value` until the guard is dropped
    pub fn set(name: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let lock = ENV_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var(name).ok();
        // SAFETY: ENV_LOCK serializes every test that touches the environment
        unsafe {
            std::env::set_var(name, value);
        }
        Self {
            name,
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables while holding ENV_LOCK"
)]
impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // SAFETY: the lock is still held; it is released after this body runs
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(self.name, original);
            }
        } else {
            unsafe {
                std::env::remove_var(self.name);
            }
        }
    }
}

/// Builds Shell Link (`.lnk`) bytes for reader tests
///
/// String data is written as UTF-16 unless `code_page` is called, in which
/// case it and the code page copies in the link info block are Windows-1252.
/// No extra data blocks are written.
#[derive(Debug, Default)]
pub struct ShellLinkBuilder {
    items: Vec<Vec<u8>>,
    link_info: Option<LinkInfoTarget>,
    code_page: bool,
    name: Option<String>,
    relative_path: Option<String>,
    working_dir: Option<String>,
    arguments: Option<String>,
}

#[derive(Debug)]
enum LinkInfoTarget {
    Local { base: String, suffix: String },
    LocalUnicode { base: String, suffix: String },
    Network { net_name: String, suffix: String },
}

impl ShellLinkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root folder item for a braced or bare CLSID
    pub fn root_folder(mut self, clsid: &str) -> Self {
        let mut item = vec![0x1F, 0x50];
        item.extend_from_slice(&Uuid::parse_str(clsid).unwrap().to_bytes_le());
        self.items.push(item);
        self
    }

    /// Volume item such as `C:\`
    pub fn volume(mut self, drive: &str) -> Self {
        let mut item = vec![0x2F];
        item.extend_from_slice(drive.as_bytes());
        item.resize(23, 0);
        self.items.push(item);
        self
    }

    /// File entry item with a code page primary name only
    pub fn file_entry(mut self, name: &str) -> Self {
        let mut item = file_entry_header();
        item.extend_from_slice(&code_page_nul(name));
        self.items.push(item);
        self
    }

    /// File entry item with a short primary name and a version 9 `0xBEEF0004` block
    pub fn file_entry_with_long_name(mut self, short: &str, long: &str) -> Self {
        let mut item = file_entry_header();
        item.extend_from_slice(&code_page_nul(short));
        if item.len() % 2 != 0 {
            item.push(0);
        }

        let long_name = utf16_nul(long);
        let block_size = 46 + long_name.len() + 2;
        let mut block = Vec::with_capacity(block_size);
        block.extend_from_slice(&u16::try_from(block_size).unwrap().to_le_bytes());
        block.extend_from_slice(&9u16.to_le_bytes());
        block.extend_from_slice(&[0x04, 0x00, 0xEF, 0xBE]);
        // Everything between the signature and the long name
        block.resize(46, 0);
        block.extend_from_slice(&long_name);
        block.extend_from_slice(&u16::try_from(item.len()).unwrap().to_le_bytes());

        item.extend_from_slice(&block);
        self.items.push(item);
        self
    }

    /// Link info with a code page local base path and common path suffix
    pub fn link_info(mut self, base: &str, suffix: &str) -> Self {
        self.link_info = Some(LinkInfoTarget::Local {
            base: base.to_string(),
            suffix: suffix.to_string(),
        });
        self
    }

    /// Link info whose header carries the Unicode offsets
    ///
    /// The code page copies hold `?` for characters Windows-1252 lacks, like
    /// Windows writes them.
    pub fn link_info_unicode(mut self, base: &str, suffix: &str) -> Self {
        self.link_info = Some(LinkInfoTarget::LocalUnicode {
            base: base.to_string(),
            suffix: suffix.to_string(),
        });
        self
    }

    /// Link info for a network share, without a local base path
    pub fn network_link_info(mut self, net_name: &str, suffix: &str) -> Self {
        self.link_info = Some(LinkInfoTarget::Network {
            net_name: net_name.to_string(),
            suffix: suffix.to_string(),
        });
        self
    }

    /// Write string data in Windows-1252 instead of UTF-16
    pub fn code_page(mut self) -> Self {
        self.code_page = true;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn relative_path(mut self, path: &str) -> Self {
        self.relative_path = Some(path.to_string());
        self
    }

    pub fn working_dir(mut self, dir: &str) -> Self {
        self.working_dir = Some(dir.to_string());
        self
    }

    pub fn arguments(mut self, arguments: &str) -> Self {
        self.arguments = Some(arguments.to_string());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        use lnk::LinkFlags;

        let mut link_flags = LinkFlags::empty();
        link_flags.set(LinkFlags::IS_UNICODE, !self.code_page);
        link_flags.set(LinkFlags::HAS_LINK_TARGET_ID_LIST, !self.items.is_empty());
        link_flags.set(LinkFlags::HAS_LINK_INFO, self.link_info.is_some());
        link_flags.set(LinkFlags::HAS_NAME, self.name.is_some());
        link_flags.set(LinkFlags::HAS_RELATIVE_PATH, self.relative_path.is_some());
        link_flags.set(LinkFlags::HAS_WORKING_DIR, self.working_dir.is_some());
        link_flags.set(LinkFlags::HAS_ARGUMENTS, self.arguments.is_some());

        let mut out = shell_link_header(link_flags.bits());

        if !self.items.is_empty() {
            let mut id_list = Vec::new();
            for item in &self.items {
                id_list.extend_from_slice(&u16::try_from(item.len() + 2).unwrap().to_le_bytes());
                id_list.extend_from_slice(item);
            }
            id_list.extend_from_slice(&[0, 0]);
            out.extend_from_slice(&u16::try_from(id_list.len()).unwrap().to_le_bytes());
            out.extend_from_slice(&id_list);
        }

        match &self.link_info {
            Some(LinkInfoTarget::Local { base, suffix }) => {
                out.extend_from_slice(&link_info_code_page(base, suffix));
            }
            Some(LinkInfoTarget::LocalUnicode { base, suffix }) => {
                out.extend_from_slice(&link_info_unicode(base, suffix));
            }
            Some(LinkInfoTarget::Network { net_name, suffix }) => {
                out.extend_from_slice(&link_info_network(net_name, suffix));
            }
            None => {}
        }

        for text in [
            &self.name,
            &self.relative_path,
            &self.working_dir,
            &self.arguments,
        ]
        .into_iter()
        .flatten()
        {
            if self.code_page {
                let bytes = code_page(text);
                out.extend_from_slice(&u16::try_from(bytes.len()).unwrap().to_le_bytes());
                out.extend_from_slice(&bytes);
            } else {
                let units: Vec<u16> = text.encode_utf16().collect();
                out.extend_from_slice(&u16::try_from(units.len()).unwrap().to_le_bytes());
                for unit in units {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
            }
        }

        out
    }
}

/// Fixed 0x4C byte header: size, link CLSID, flags, zeroed times and sizes,
/// `SW_SHOWNORMAL`
fn shell_link_header(link_flags: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(0x4C);
    out.extend_from_slice(&0x4Cu32.to_le_bytes());
    out.extend_from_slice(
        &Uuid::from_u128(0x0002_1401_0000_0000_C000_0000_0000_0046).to_bytes_le(),
    );
    out.extend_from_slice(&link_flags.to_le_bytes());
    out.resize(0x3C, 0);
    out.extend_from_slice(&1u32.to_le_bytes());
    out.resize(0x4C, 0);
    out
}

/// Class, unknown, file size, modification time, attributes of a file item
fn file_entry_header() -> Vec<u8> {
    let mut item = vec![0x32, 0x00];
    item.resize(12, 0);
    item
}

fn code_page(text: &str) -> Vec<u8> {
    lnk::encoding::WINDOWS_1252.encode(text).0.into_owned()
}

fn code_page_nul(text: &str) -> Vec<u8> {
    let mut bytes = code_page(text);
    bytes.push(0);
    bytes
}

fn utf16_nul(text: &str) -> Vec<u8> {
    text.encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}

/// Fixed drive with serial number 0x12345678 and an empty label
fn volume_id() -> Vec<u8> {
    let mut out = Vec::new();
    // size, drive type, serial number, label offset
    for value in [0x11u32, 3, 0x1234_5678, 0x10] {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out.push(0);
    out
}

fn u32_len(bytes: &[u8]) -> u32 {
    u32::try_from(bytes.len()).unwrap()
}

/// Header, volume ID, base path, suffix; the suffix ends the block
fn link_info_code_page(base: &str, suffix: &str) -> Vec<u8> {
    const HEADER_SIZE: u32 = 0x1C;

    let volume = volume_id();
    let base = code_page_nul(base);
    let suffix = code_page_nul(suffix);

    let volume_offset = HEADER_SIZE;
    let base_offset = volume_offset + u32_len(&volume);
    let suffix_offset = base_offset + u32_len(&base);
    let total = suffix_offset + u32_len(&suffix);

    let mut out = Vec::new();
    for value in [total, HEADER_SIZE, 1, volume_offset, base_offset, 0, suffix_offset] {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out.extend_from_slice(&volume);
    out.extend_from_slice(&base);
    out.extend_from_slice(&suffix);
    out
}

/// Header with Unicode offsets, volume ID, code page copies, then the
/// Unicode base path and suffix; the Unicode suffix ends the block
fn link_info_unicode(base: &str, suffix: &str) -> Vec<u8> {
    const HEADER_SIZE: u32 = 0x24;

    let volume = volume_id();
    let base_code_page = code_page_nul(&base.replace(|c: char| !c.is_ascii(), "?"));
    let suffix_code_page = code_page_nul(&suffix.replace(|c: char| !c.is_ascii(), "?"));
    let base_unicode = utf16_nul(base);
    let suffix_unicode = utf16_nul(suffix);

    let volume_offset = HEADER_SIZE;
    let base_offset = volume_offset + u32_len(&volume);
    let suffix_offset = base_offset + u32_len(&base_code_page);
    let base_unicode_offset = suffix_offset + u32_len(&suffix_code_page);
    let suffix_unicode_offset = base_unicode_offset + u32_len(&base_unicode);
    let total = suffix_unicode_offset + u32_len(&suffix_unicode);

    let mut out = Vec::new();
    for value in [
        total,
        HEADER_SIZE,
        1,
        volume_offset,
        base_offset,
        0,
        suffix_offset,
        base_unicode_offset,
        suffix_unicode_offset,
    ] {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out.extend_from_slice(&volume);
    out.extend_from_slice(&base_code_page);
    out.extend_from_slice(&suffix_code_page);
    out.extend_from_slice(&base_unicode);
    out.extend_from_slice(&suffix_unicode);
    out
}

/// Header, common network relative link (SMB share), suffix
fn link_info_network(net_name: &str, suffix: &str) -> Vec<u8> {
    const HEADER_SIZE: u32 = 0x1C;
    const NETWORK_LINK_HEADER_SIZE: u32 = 0x14;
    const VALID_NET_TYPE: u32 = 0x2;
    const WNNC_NET_SMB: u32 = 0x0002_0000;

    let net_name = code_page_nul(net_name);
    let suffix = code_page_nul(suffix);

    let mut network_link = Vec::new();
    let network_link_size = NETWORK_LINK_HEADER_SIZE + u32_len(&net_name);
    // size, flags, net name offset, device name offset, provider type
    for value in [
        network_link_size,
        VALID_NET_TYPE,
        NETWORK_LINK_HEADER_SIZE,
        0,
        WNNC_NET_SMB,
    ] {
        network_link.extend_from_slice(&value.to_le_bytes());
    }
    network_link.extend_from_slice(&net_name);

    let network_offset = HEADER_SIZE;
    let suffix_offset = network_offset + u32_len(&network_link);
    let total = suffix_offset + u32_len(&suffix);

    let mut out = Vec::new();
    for value in [total, HEADER_SIZE, 2, 0, 0, network_offset, suffix_offset] {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out.extend_from_slice(&network_link);
    out.extend_from_slice(&suffix);
    out
}
