#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let _ = redate_git::parse(
            raw,
            redate_git::FIELD_DELIMITER,
            redate_git::RECORD_DELIMITER,
        );
    }
});
