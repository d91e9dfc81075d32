//! Normalization of GameStream launch targets into Sunshine commands
//!
//! The steps run in a fixed order:
//!
//! 1. Expand a leading `::{KNOWNFOLDERID}` prefix in the target and in the
//!    working directory
//! 2. Remove every `"` from both strings
//! 3. Trim trailing separators from the working directory and leading
//!    separators from the target
//! 4. Classify: `start <cmd>` is detached, anything containing `://` is a
//!    detached URI (`steam://` URIs get the `steam` executable prepended),
//!    anything else is a path joined onto the working directory
//!
//! Paths are handled as Windows strings regardless of the build host.

use crate::error::Result;
use crate::known_folder::FolderResolver;
use regex::Regex;
use std::sync::LazyLock;

/// `::{8-4-4-4-12}` anchored at the start of the string
static KNOWN_FOLDER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^::(\{[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\})",
    )
    .expect("known folder prefix pattern is valid")
});

const SEPARATORS: [char; 2] = ['\\', '/'];

const START_KEYWORD: &str = "start";

const URI_MARKER: &str = "://";

const STEAM_SCHEME: &str = "steam://";

const STEAM_EXECUTABLE: &str = "steam";

/// How Sunshine should launch an app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchCommand {
    /// Run and track as a child process (`cmd`)
    Direct(String),
    /// Hand off and do not wait on it (`detached`)
    Detached(String),
}

impl LaunchCommand {
    /// Whether the command is launched detached
    pub fn is_detached(&self) -> bool {
        matches!(self, Self::Detached(_))
    }

    /// The command line
    pub fn command(&self) -> &str {
        match self {
            Self::Direct(cmd) | Self::Detached(cmd) => cmd,
        }
    }
}

/// Result of normalizing one launch target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCommand {
    /// Absolute working directory, unquoted, without trailing separator
    pub working_dir: String,
    /// Command and launch mode
    pub launch: LaunchCommand,
}

/// Replace a leading `::{KNOWNFOLDERID}` with the folder it names
///
/// Strings without the prefix are returned unchanged. Only the prefix is
/// replaced; the rest of the path is kept as is.
pub fn expand_known_folder<R: FolderResolver>(path: &str, resolver: &R) -> Result<String> {
    let Some(captures) = KNOWN_FOLDER_PREFIX.captures(path) else {
        return Ok(path.to_string());
    };

    // Both groups exist whenever the pattern matched
    let (Some(prefix), Some(identifier)) = (captures.get(0), captures.get(1)) else {
        return Ok(path.to_string());
    };

    let folder = resolver.resolve(identifier.as_str())?;
    Ok(format!("{folder}{}", &path[prefix.end()..]))
}

/// Normalize a raw shortcut target and working directory
///
/// Resolver failures abort normalization of this target and are returned
/// unchanged to the caller.
pub fn normalize<R: FolderResolver>(
    resolver: &R,
    raw_path: &str,
    raw_working_dir: Option<&str>,
) -> Result<NormalizedCommand> {
    let working_dir = expand_known_folder(raw_working_dir.unwrap_or_default(), resolver)?;
    let command = expand_known_folder(raw_path, resolver)?;

    // Quotes go first so the separator trim sees the real ends
    let working_dir = working_dir
        .replace('"', "")
        .trim_end_matches(SEPARATORS)
        .to_string();
    let mut command = command
        .replace('"', "")
        .trim_start_matches(SEPARATORS)
        .to_string();

    let mut detached = false;

    if let Some(rest) = strip_start_keyword(&command) {
        detached = true;
        command = rest.trim().to_string();
    }

    if command.contains(URI_MARKER) {
        detached = true;

        // Bare steam:// URIs need the client; already-prefixed ones are left alone
        if starts_with_ignore_ascii_case(&command, STEAM_SCHEME) {
            command = format!("{STEAM_EXECUTABLE} {command}");
        }
    } else if !command.starts_with(&working_dir) {
        // Plain string prefix check, not a path comparison
        command = join_windows_path(&working_dir, &command);
    }

    let launch = if detached {
        LaunchCommand::Detached(command)
    } else {
        LaunchCommand::Direct(command)
    };

    Ok(NormalizedCommand {
        working_dir,
        launch,
    })
}

/// Remainder after a case-insensitive `start` followed by whitespace
fn strip_start_keyword(command: &str) -> Option<&str> {
    let keyword = command.get(..START_KEYWORD.len())?;
    let rest = &command[START_KEYWORD.len()..];

    (keyword.eq_ignore_ascii_case(START_KEYWORD) && rest.starts_with(char::is_whitespace))
        .then_some(rest)
}

fn starts_with_ignore_ascii_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Join like `ntpath.join`: an empty base or a drive-absolute tail wins
fn join_windows_path(base: &str, tail: &str) -> String {
    if base.is_empty() || has_drive_prefix(tail) {
        return tail.to_string();
    }
    format!("{base}\\{tail}")
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
