#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(doc) = efatura::ubl::XmlDocument::parse(s) {
            // Every subtree must stay inside the arena.
            for element in doc.elements() {
                assert!(element.subtree().count() < doc.len());
            }
        }
    }
});
