//! GameStream auto-detected applications
//!
//! GeForce Experience scans for installed games itself and records them in
//! `journalBS.main.xml`. Box art for those games lives under `VisualOPSData`,
//! in a per-version directory listed in `VisualOPSData\ApplicationData.json`.

use crate::error::{GsmsError, Result, StringError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Application list written by GeForce Experience
const APPLICATION_LIST: &str = "journalBS.main.xml";

/// Box-art directory below the backend directory
const IMAGES_DIR: &str = "VisualOPSData";

/// Box-art metadata inside `IMAGES_DIR`
const APPLICATION_DATA: &str = "ApplicationData.json";

/// One application GeForce Experience detected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedApp {
    /// Display name
    pub display_name: String,
    /// Command GameStream launches; `None` when the game cannot be streamed
    pub command: Option<String>,
    /// Install directory, used as the working directory
    pub install_dir: Option<String>,
    /// Pre-shortened, file-system safe name
    pub short_name: Option<String>,
}

impl DetectedApp {
    /// Sunshine log file name
    pub fn log_file_name(&self) -> Option<String> {
        self.short_name.as_ref().map(|short| format!("{short}.log"))
    }
}

#[derive(Debug, Deserialize)]
struct ApplicationData {
    #[serde(default)]
    metadata: HashMap<String, BoxArtMetadata>,
}

#[derive(Debug, Deserialize)]
struct BoxArtMetadata {
    /// Box-art version directory
    #[serde(rename = "c")]
    version: String,
}

/// The detected applications plus the box-art metadata needed to import them
#[derive(Debug)]
pub struct GameStreamLibrary {
    images_dir: PathBuf,
    apps: Vec<DetectedApp>,
    box_art_versions: HashMap<String, String>,
}

impl GameStreamLibrary {
    /// Load from a GameStream backend directory (see `nvidia_base_dir`)
    pub fn load(base_dir: &Path) -> Result<Self> {
        let list_path = base_dir.join(APPLICATION_LIST);
        let images_dir = base_dir.join(IMAGES_DIR);
        let metadata_path = images_dir.join(APPLICATION_DATA);

        debug!("Reading GameStream applications from {}", list_path.display());
        // Both files are required; either missing aborts the import
        let xml = std::fs::read_to_string(&list_path)?;
        let metadata = std::fs::read_to_string(&metadata_path)?;

        Self::from_documents(images_dir, &xml, &metadata)
    }

    /// Build from the contents of the application list and the metadata file
    pub fn from_documents(images_dir: PathBuf, xml: &str, metadata: &str) -> Result<Self> {
        let apps = parse_application_list(xml)?;
        let data: ApplicationData = serde_json::from_str(metadata)?;

        info!("GameStream detected {} applications", apps.len());

        Ok(Self {
            images_dir,
            apps,
            box_art_versions: data
                .metadata
                .into_iter()
                .map(|(short, meta)| (short, meta.version))
                .collect(),
        })
    }

    /// Detected applications in document order
    pub fn apps(&self) -> &[DetectedApp] {
        &self.apps
    }

    /// Box art for an application, `None` if GameStream has no metadata for it
    ///
    /// Returns: VisualOPSData\<short>\<version>\<short>-box-art.png
    pub fn box_art_source(&self, app: &DetectedApp) -> Option<PathBuf> {
        let short = app.short_name.as_deref()?;
        let version = self.box_art_versions.get(short)?;
        Some(
            self.images_dir
                .join(short)
                .join(version)
                .join(format!("{short}-box-art.png")),
        )
    }
}

/// Parse `journalBS.main.xml`
///
/// The root's first `Application` element holds one child per application.
/// Children without a `DisplayName` are ignored.
pub fn parse_application_list(xml: &str) -> Result<Vec<DetectedApp>> {
    let document = roxmltree::Document::parse(xml)?;
    // Only the first Application element is read, later ones are ignored
    let applications = document
        .root_element()
        .children()
        .find(|node| node.has_tag_name("Application"))
        .ok_or_else(|| {
            GsmsError::GameStreamDataError(StringError::new(format!(
                "{APPLICATION_LIST} has no Application element"
            )))
        })?;

    let apps = applications
        .children()
        .filter(roxmltree::Node::is_element) // Skip whitespace text nodes
        .filter_map(|application| {
            let field = |tag: &str| {
                application
                    .children()
                    .find(|child| child.has_tag_name(tag))
                    .and_then(|child| child.text())
                    .map(str::to_string)
            };

            let Some(display_name) = field("DisplayName") else {
                debug!("Ignoring <{}> without DisplayName", application.tag_name().name());
                return None;
            };

            Some(DetectedApp {
                display_name,
                command: field("StreamingCommandLine"),
                install_dir: field("InstallDirectory"),
                short_name: field("ShortName"),
            })
        })
        .collect();

    Ok(apps)
}
