//! `gsms` - GameStream to Sunshine migration tool
//!
//! Reads the apps configured in Nvidia GameStream and adds them, with their
//! box art, to Sunshine's `apps.json`.

use anyhow::{Context, Result};
use clap::Parser;
use gsms::error::get_user_friendly_error;
use gsms::known_folder::ShellFolderResolver;
use gsms::migration::{MigrationOptions, Migrator};
use gsms::utils;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Seconds to wait before exiting, so a double-clicked console stays readable
const EXIT_COUNTDOWN_SECS: u64 = 10;

#[derive(Parser, Debug)]
#[command(name = "gsms", version)]
#[command(about = "Migrate Nvidia GameStream apps and box art to Sunshine")]
struct Args {
    /// Sunshine apps.json [default: %ProgramFiles%\Sunshine\config\apps.json]
    #[arg(short = 'a', long = "apps")]
    apps: Option<PathBuf>,

    /// Box-art destination directory [default: %USERPROFILE%\Pictures\Sunshine]
    #[arg(short = 'i', long = "image_path")]
    image_path: Option<PathBuf>,

    /// GameStream shortcut directory [default: %LOCALAPPDATA%\NVIDIA Corporation\Shield Apps]
    #[arg(short = 's', long = "shortcut_dir")]
    shortcut_dir: Option<PathBuf>,

    /// Show what would be migrated without writing anything
    #[arg(short = 'd', long = "dry_run")]
    dry_run: bool,

    /// Exit immediately instead of counting down
    #[arg(long = "no_sleep")]
    no_sleep: bool,

    /// Also import the apps GameStream detected automatically
    #[arg(short = 'n', long = "nv_add_autodetect")]
    nv_add_autodetect: bool,

    /// Log directory [default: %LOCALAPPDATA%\gsms]
    #[arg(long = "log_dir")]
    log_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn migration_options(&self) -> MigrationOptions {
        let defaults = MigrationOptions::default();
        MigrationOptions {
            apps_path: self.apps.clone().unwrap_or(defaults.apps_path),
            image_dir: self.image_path.clone().unwrap_or(defaults.image_dir),
            shortcut_dir: self.shortcut_dir.clone().unwrap_or(defaults.shortcut_dir),
            gamestream_dir: defaults.gamestream_dir,
            dry_run: self.dry_run,
            import_autodetected: self.nv_add_autodetect,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging first so every later step is recorded
    let log_dir = args.log_dir.clone().unwrap_or_else(utils::default_log_dir);
    utils::init_logging(&log_dir, args.verbose).context("Failed to initialize logging system")?;

    info!("gsms v{} starting...", env!("CARGO_PKG_VERSION"));

    let options = args.migration_options();
    info!("apps.json: {}", options.apps_path.display());
    info!("Shortcut directory: {}", options.shortcut_dir.display());
    info!("Image directory: {}", options.image_dir.display());

    // Known folders are resolved by the shell of the machine running gsms
    let resolver = ShellFolderResolver::new();
    let result = Migrator::new(options, &resolver).run();

    match &result {
        Ok(summary) => info!("Added {} apps to Sunshine.", summary.added_count()),
        Err(e) => error!("{}", get_user_friendly_error(e)),
    }

    // Count down even after a failure so the error stays on screen
    if !args.no_sleep {
        utils::countdown(
            &mut std::io::stdout(),
            "Exiting in: ",
            EXIT_COUNTDOWN_SECS,
            Duration::from_secs(1),
        )
        .context("Failed to write to the console")?;
    }

    result.map(|_| ()).context("Migration failed")
}
