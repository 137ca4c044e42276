#![no_main]

use libfuzzer_sys::fuzz_target;
use sanction_codec::core::{address, hex, operator, victim};
use sanction_codec::model::VictimKind;

fuzz_target!(|data: &[u8]| {
    // Raw column bytes: decoders must fail cleanly, never panic
    let _ = operator::decode(data);
    let _ = address::decode(data, None);
    let _ = victim::decode(data, VictimKind::Player);
    let _ = victim::decode(data, VictimKind::Address);

    // Hex import of arbitrary text
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(bytes) = hex::decode(text) {
            assert_eq!(hex::encode(&bytes), text.to_lowercase());
        }
    }
});
