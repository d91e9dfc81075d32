//! Launch command normalization
//!
//! GameStream stores every launch target in one string field, whether it is a
//! plain executable, a `start ...` shell invocation or a protocol URI. Sunshine
//! needs to know which of these it is: plain executables are tracked as child
//! processes (`cmd`), everything else is fired and forgotten (`detached`).
//!
//! `normalize` expands known folder prefixes, cleans up quotes and separators,
//! and recovers that launch semantic.

pub mod normalizer;

pub use normalizer::{LaunchCommand, NormalizedCommand, expand_known_folder, normalize};
