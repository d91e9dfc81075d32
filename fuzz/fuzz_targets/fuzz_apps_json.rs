#![no_main]

use gsms::registry::SunshineApps;
use gsms::registry::manager::to_pretty_json;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(registry) = serde_json::from_str::<SunshineApps>(s)
    {
        // Whatever loads must save and load back to the same registry
        let json = to_pretty_json(&registry).expect("serializable");
        let reloaded: SunshineApps = serde_json::from_str(&json).expect("reloadable");
        assert_eq!(reloaded, registry);
    }
});
