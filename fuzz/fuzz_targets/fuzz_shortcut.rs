#![no_main]

use gsms::shortcut::ShellLink;
use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();

    // Malformed shortcuts come back as errors
    if let Ok(link) = ShellLink::open(file.path()) {
        let _ = link.target_path();
    }
});
