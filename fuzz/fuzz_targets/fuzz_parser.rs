#![no_main]

use jsonkit::{decode_bytes, encode, EncoderOptions, ParserOptions};
use libfuzzer_sys::fuzz_target;

/// Builds a [`ParserOptions`] out of the low bits of `flags`, so one byte of
/// fuzzer input exercises the whole strict/lenient/decimal/duplicate-key/
/// multi-value option matrix.
fn options_from_flags(flags: u8) -> ParserOptions {
    ParserOptions {
        strict: flags & 0b0000_0001 == 0,
        #[cfg(feature = "decimal")]
        use_decimals: flags & 0b0000_0010 != 0,
        reject_duplicate_keys: flags & 0b0000_0100 != 0,
        allow_multiple_values: flags & 0b0000_1000 != 0,
        max_depth: 32,
    }
}

fn run(data: &[u8]) {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let options = options_from_flags(flags);

    if options.allow_multiple_values {
        // decode_all never panics on malformed input; it just surfaces one
        // Err per bad top-level value and keeps going.
        let chars: Vec<char> = String::from_utf8_lossy(rest).chars().collect();
        for result in jsonkit::decode_all(chars.into_iter(), options) {
            let _ = result;
        }
        return;
    }

    let Ok(value) = decode_bytes(rest, options.clone()) else {
        return;
    };

    // A successfully decoded value must always re-encode and re-decode to
    // the same value, in both compact and pretty form.
    for encoder_options in [EncoderOptions::compact(), EncoderOptions::pretty()] {
        let text = encode(&value, &encoder_options);
        let reparsed =
            jsonkit::decode_str(&text, options.clone()).expect("re-encoded output must re-parse");
        assert_eq!(reparsed, value, "parse -> encode -> parse was not idempotent");
    }
}

fuzz_target!(|data: &[u8]| run(data));
