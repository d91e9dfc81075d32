//! Utility modules
//!
//! Provides logging setup, the box-art copy and the exit countdown.

pub mod box_art;
pub mod countdown;
pub mod logging;

pub use box_art::{CopyOutcome, copy_box_art};
pub use countdown::countdown;
pub use logging::{default_log_dir, init_logging};
