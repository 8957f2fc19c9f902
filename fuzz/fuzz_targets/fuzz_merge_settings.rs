#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the settings merger.
///
/// Splits the input on NUL bytes into several documents and merges them in
/// order, exercising parsing, blank-document skipping and the conflict rules.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let texts: Vec<&str> = s.split('\0').take(8).collect();
        let _ = appsettings_gen::settings::merge_json_texts(&texts);
    }
});
