#![no_main]
use libfuzzer_sys::fuzz_target;
use tomlconv::{convert, render, Format, Mode};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(object) = convert(Mode::Table, s) {
            for format in Format::ALL {
                let _ = render(&object, format);
            }
        }
    }
});
