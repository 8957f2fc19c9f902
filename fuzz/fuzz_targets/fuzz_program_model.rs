#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz semantic model loading and class extraction.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(model) = appsettings_gen::ProgramModel::from_json_str(s) {
            let _ = appsettings_gen::TypeDescriptionExtractor::default().extract(&model);
        }
    }
});
