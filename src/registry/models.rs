//! Registry data models
//!
//! This module defines the data structures of Sunshine's `apps.json` and the
//! normalized app produced by a migration.

use crate::command::{LaunchCommand, NormalizedCommand};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

/// One Sunshine app entry
///
/// Keys this tool does not write (`prep-cmd`, `auto-detach`, ...) are kept in
/// `extra` so existing entries survive a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunshineApp {
    /// Display name, unique within the registry
    pub name: String,
    /// Log file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Working directory
    #[serde(
        rename = "working-dir",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub working_dir: Option<String>,
    /// Box-art image
    #[serde(rename = "image-path", default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Command tracked as a child process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
    /// Commands launched without tracking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detached: Option<Vec<String>>,
    /// Keys passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Top-level `apps.json` document
///
/// Names are expected to be unique, but the collection does not enforce it:
/// callers check `contains` before `insert`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SunshineApps {
    /// Registered apps, in file order
    #[serde(default)]
    pub apps: Vec<SunshineApp>,
    /// Top-level keys other than `apps` (e.g. `env`), passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SunshineApps {
    /// Whether an app with exactly this name (case-sensitive) is registered
    pub fn contains(&self, name: &str) -> bool {
        let found = self.apps.iter().any(|app| app.name == name);
        if found {
            info!("{} app already exist in Sunshine apps.json, skipping.", name);
        }
        found
    }

    /// Append an app at the end, without checking for duplicates
    pub fn insert(&mut self, app: impl Into<SunshineApp>) {
        self.apps.push(app.into());
    }

    /// Number of registered apps
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Whether the registry has no apps
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// An app produced by the migration, ready to be registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedApp {
    /// Display name
    pub name: String,
    /// Log file name
    pub log_file: String,
    /// Normalized working directory and launch command
    pub command: NormalizedCommand,
    /// Absolute path of the box-art image
    pub image_path: String,
}

impl NormalizedApp {
    /// Bundle a normalized command with its metadata
    pub fn new(
        name: impl Into<String>,
        log_file: impl Into<String>,
        command: NormalizedCommand,
        image_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            log_file: log_file.into(),
            command,
            image_path: image_path.into(),
        }
    }
}

impl From<NormalizedApp> for SunshineApp {
    fn from(app: NormalizedApp) -> Self {
        let (cmd, detached) = match app.command.launch {
            LaunchCommand::Direct(cmd) => (Some(cmd), None),
            LaunchCommand::Detached(cmd) => (None, Some(vec![cmd])),
        };

        Self {
            name: app.name,
            output: Some(app.log_file),
            working_dir: Some(app.command.working_dir),
            image_path: Some(app.image_path),
            cmd,
            detached,
            extra: Map::new(),
        }
    }
}
