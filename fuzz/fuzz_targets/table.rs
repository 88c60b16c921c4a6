#![no_main]
use libfuzzer_sys::fuzz_target;
use tomlconv::{convert, Mode};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = convert(Mode::Table, s);
        let _ = convert(Mode::Single, s);
    }
});
