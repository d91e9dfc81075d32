#![no_main]

use gsms::command::normalize;
use gsms::known_folder::FixedFolderResolver;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str)| {
    let (raw_path, raw_working_dir) = input;
    let resolver = FixedFolderResolver::new()
        .with_folder("F38BF404-1D43-42F2-9305-67DE0B28FC23", "C:\\WINDOWS")
        .expect("valid identifier");

    if let Ok(normalized) = normalize(&resolver, raw_path, Some(raw_working_dir)) {
        assert!(!normalized.working_dir.contains('"'));
        assert!(!normalized.launch.command().contains('"'));
    }
});
