//! Migration run
//!
//! Failures that concern a single app (unreadable shortcut, unknown folder
//! identifier, failed image copy) are logged and the run moves on. Failures
//! that concern the whole run (missing `apps.json`, unreadable GameStream
//! database, failed save) abort it before anything is written.

use super::{MigrationOptions, MigrationSummary};
use crate::command::normalize;
use crate::error::Result;
use crate::gamestream::{DetectedApp, GameStreamLibrary};
use crate::known_folder::FolderResolver;
use crate::registry::manager::to_pretty_json;
use crate::registry::{NormalizedApp, RegistryManager, SunshineApps};
use crate::shortcut::{RawShortcut, scan_shortcut_dir};
use crate::utils::copy_box_art;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// GameStream's own Steam entry; Sunshine ships its own
const GAMESTREAM_STEAM_APP: &str = "Steam";

/// Migrates GameStream apps into Sunshine's registry
pub struct Migrator<'a, R: FolderResolver> {
    options: MigrationOptions,
    resolver: &'a R,
}

impl<'a, R: FolderResolver> Migrator<'a, R> {
    /// Create a migrator using `resolver` for known folder prefixes
    pub fn new(options: MigrationOptions, resolver: &'a R) -> Self {
        Self { options, resolver }
    }

    /// Run settings
    pub fn options(&self) -> &MigrationOptions {
        &self.options
    }

    /// Run the migration
    pub fn run(&self) -> Result<MigrationSummary> {
        let mut registry = RegistryManager::load(&self.options.apps_path)?;
        // Log the registry as found, so a bad run can be undone by hand
        info!("{}", to_pretty_json(&registry)?);
        info!("----");

        if self.options.dry_run {
            info!("Dry run: nothing will be written");
        } else {
            std::fs::create_dir_all(&self.options.image_dir)?;
        }

        let mut summary = MigrationSummary::default();

        for path in scan_shortcut_dir(&self.options.shortcut_dir)? {
            self.migrate_shortcut(&path, &mut registry, &mut summary);
        }

        // An unreadable GameStream database aborts before apps.json is touched
        if self.options.import_autodetected {
            let library = GameStreamLibrary::load(&self.options.gamestream_dir)?;
            for app in library.apps() {
                self.migrate_detected(&library, app, &mut registry, &mut summary);
            }
        }

        if !self.options.dry_run {
            RegistryManager::save(&self.options.apps_path, &registry)?;
        }

        info!("{}", to_pretty_json(&registry)?);
        info!("Completed importing Nvidia GameStream games.");
        debug!(
            "{} added, {} skipped, {} failed",
            summary.added.len(),
            summary.skipped.len(),
            summary.failed.len()
        );

        Ok(summary)
    }

    fn migrate_shortcut(
        &self,
        path: &Path,
        registry: &mut SunshineApps,
        summary: &mut MigrationSummary,
    ) {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Checked before reading the file, so broken shortcuts of apps that
        // were already migrated stay quiet
        if registry.contains(&name) {
            summary.skipped.push(name);
            return;
        }

        let shortcut = match RawShortcut::from_lnk(path) {
            Ok(shortcut) => shortcut,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                summary.failed.push(name);
                return;
            }
        };

        info!("Found GameStream app: {}", shortcut.name);
        info!("working-dir: {}", shortcut.working_dir.as_deref().unwrap_or_default());
        info!("path: {}", shortcut.target_path);

        let command = match normalize(
            self.resolver,
            &shortcut.target_path,
            shortcut.working_dir.as_deref(),
        ) {
            Ok(command) => command,
            Err(e) => {
                warn!("Skipping {}: {}", shortcut.name, e);
                summary.failed.push(shortcut.name);
                return;
            }
        };

        // A missing or failed image never blocks the app itself
        let image_path = self.image_destination(&shortcut.name);
        self.copy_image(&shortcut.box_art_source(&self.options.shortcut_dir), &image_path);

        registry.insert(NormalizedApp::new(
            shortcut.name.clone(),
            shortcut.log_file_name(),
            command,
            image_path.to_string_lossy(),
        ));
        summary.added.push(shortcut.name);
    }

    fn migrate_detected(
        &self,
        library: &GameStreamLibrary,
        app: &DetectedApp,
        registry: &mut SunshineApps,
        summary: &mut MigrationSummary,
    ) {
        let name = &app.display_name;

        if name == GAMESTREAM_STEAM_APP || registry.contains(name) {
            summary.skipped.push(name.clone());
            return;
        }

        let Some(raw_command) = app.command.as_deref() else {
            info!("{} has no streaming command line. Skipping", name);
            summary.skipped.push(name.clone());
            return;
        };

        info!("Found GameStream app: {}", name);
        info!("working-dir: {}", app.install_dir.as_deref().unwrap_or_default());
        info!("path: {}", raw_command);

        let (Some(short_name), Some(box_art)) =
            (app.short_name.as_deref(), library.box_art_source(app))
        else {
            debug!("{} has no GameStream metadata. Skipping", name);
            summary.skipped.push(name.clone());
            return;
        };

        let command = match normalize(self.resolver, raw_command, app.install_dir.as_deref()) {
            Ok(command) => command,
            Err(e) => {
                warn!("Skipping {}: {}", name, e);
                summary.failed.push(name.clone());
                return;
            }
        };

        let image_path = self.image_destination(short_name);
        self.copy_image(&box_art, &image_path);

        registry.insert(NormalizedApp::new(
            name.clone(),
            format!("{short_name}.log"),
            command,
            image_path.to_string_lossy(),
        ));
        summary.added.push(name.clone());
    }

    fn image_destination(&self, stem: &str) -> PathBuf {
        self.options.image_dir.join(format!("{stem}.png"))
    }

    fn copy_image(&self, source: &Path, destination: &Path) {
        if self.options.dry_run {
            return;
        }
        if let Err(e) = copy_box_art(source, destination) {
            warn!("Failed to copy box art to {}: {}", destination.display(), e);
        }
    }
}
