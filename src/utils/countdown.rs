//! Console countdown shown before the program exits
//!
//! Lets users who started the tool by double-clicking read the output before
//! the console window closes.

use std::io::Write;
use std::time::Duration;

/// Write `"{message}{MM:SS}\r"` once per `tick`, from `seconds` down to 1
pub fn countdown<W: Write>(
    writer: &mut W,
    message: &str,
    seconds: u64,
    tick: Duration,
) -> std::io::Result<()> {
    for remaining in (1..=seconds).rev() {
        write!(writer, "{message}{}\r", format_mm_ss(remaining))?;
        writer.flush()?;
        std::thread::sleep(tick);
    }
    Ok(())
}

fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
