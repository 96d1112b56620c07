//! Renders a [`Json`] value back to text.
//!
//! [`encode`]/[`encode_to`] walk the value tree once, writing into a
//! [`String`]/[`std::fmt::Write`] sink rather than building up intermediate
//! fragments, so a deeply nested document costs one allocation-amortized
//! pass rather than repeated concatenation.
use std::fmt::{self, Write as _};

use crate::options::EncoderOptions;
use crate::value::{Json, JsonObject};

#[cfg(feature = "decimal")]
use crate::value::Decimal;

/// Renders `value` to a new [`String`] per `options`.
#[must_use]
pub fn encode(value: &Json, options: &EncoderOptions) -> String {
    let mut out = String::new();
    // A `fmt::Write` sink never fails for `String`, so the `Result` from
    // `encode_to` is infallible here.
    encode_to(value, options, &mut out).expect("writing to a String cannot fail");
    out
}

/// Renders `value` per `options` into any [`fmt::Write`] sink.
///
/// # Errors
/// Returns [`fmt::Error`] only if the sink itself fails to accept output, or
/// if `value` contains a non-finite [`Json::Double`] and
/// [`EncoderOptions::allow_non_finite_numbers`] is not set.
pub fn encode_to(value: &Json, options: &EncoderOptions, out: &mut impl fmt::Write) -> fmt::Result {
    write_value(value, options, out, 0)
}

fn write_value(value: &Json, options: &EncoderOptions, out: &mut impl fmt::Write, depth: usize) -> fmt::Result {
    match value {
        Json::Null => out.write_str("null"),
        Json::Bool(true) => out.write_str("true"),
        Json::Bool(false) => out.write_str("false"),
        Json::String(s) => write_string(s, options, out),
        Json::Int64(i) => write!(out, "{i}"),
        Json::Double(d) => write_double(*d, options, out),
        #[cfg(feature = "decimal")]
        Json::Decimal(d) => write_decimal(d, out),
        Json::Object(obj) => write_object(obj, options, out, depth),
        Json::Array(items) => write_array(items, options, out, depth),
    }
}

fn write_double(d: f64, options: &EncoderOptions, out: &mut impl fmt::Write) -> fmt::Result {
    if d.is_nan() {
        return if options.allow_non_finite_numbers {
            out.write_str("NaN")
        } else {
            Err(fmt::Error)
        };
    }
    if d.is_infinite() {
        return if options.allow_non_finite_numbers {
            out.write_str(if d > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            Err(fmt::Error)
        };
    }
    if d == d.trunc() && d.abs() < 1e17 {
        // Render integral doubles with a trailing `.0` so they round-trip as
        // doubles, not as int64s, on re-parse.
        write!(out, "{d:.1}")
    } else {
        write!(out, "{d}")
    }
}

#[cfg(feature = "decimal")]
fn write_decimal(d: &Decimal, out: &mut impl fmt::Write) -> fmt::Result {
    write!(out, "{d}")
}

fn write_string(s: &str, options: &EncoderOptions, out: &mut impl fmt::Write) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '/' if options.escape_slashes => out.write_str("\\/")?,
            '\u{0008}' => out.write_str("\\b")?,
            '\u{000C}' => out.write_str("\\f")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(out, "\\u{:04x}", c as u32)?,
            c if options.ascii_only && !c.is_ascii() => write_ascii_escape(c, out)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

fn write_ascii_escape(c: char, out: &mut impl fmt::Write) -> fmt::Result {
    let scalar = c as u32;
    if scalar <= 0xFFFF {
        write!(out, "\\u{scalar:04x}")
    } else {
        let v = scalar - 0x1_0000;
        let high = 0xD800 + (v >> 10);
        let low = 0xDC00 + (v & 0x3FF);
        write!(out, "\\u{high:04x}\\u{low:04x}")
    }
}

fn write_array(items: &[Json], options: &EncoderOptions, out: &mut impl fmt::Write, depth: usize) -> fmt::Result {
    if items.is_empty() {
        return out.write_str("[]");
    }
    out.write_char('[')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        newline_indent(options, out, depth + 1)?;
        write_value(item, options, out, depth + 1)?;
    }
    newline_indent(options, out, depth)?;
    out.write_char(']')
}

fn write_object(obj: &JsonObject, options: &EncoderOptions, out: &mut impl fmt::Write, depth: usize) -> fmt::Result {
    if obj.is_empty() {
        return out.write_str("{}");
    }
    out.write_char('{')?;
    let mut keys: Vec<&str> = obj.keys().collect();
    if options.sorted_keys {
        keys.sort_unstable();
    }
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        newline_indent(options, out, depth + 1)?;
        write_string(key, options, out)?;
        out.write_char(':')?;
        if options.pretty {
            out.write_char(' ')?;
        }
        let value = obj.get(key).expect("key came from this object's own keys()");
        write_value(value, options, out, depth + 1)?;
    }
    newline_indent(options, out, depth)?;
    out.write_char('}')
}

fn newline_indent(options: &EncoderOptions, out: &mut impl fmt::Write, depth: usize) -> fmt::Result {
    if !options.pretty {
        return Ok(());
    }
    out.write_char('\n')?;
    for _ in 0..depth {
        out.write_str(&options.indent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> EncoderOptions {
        EncoderOptions::default()
    }

    #[test]
    fn encodes_scalars() {
        assert_eq!(encode(&Json::Null, &opts()), "null");
        assert_eq!(encode(&Json::Bool(true), &opts()), "true");
        assert_eq!(encode(&Json::Int64(-7), &opts()), "-7");
        assert_eq!(encode(&Json::Double(1.5), &opts()), "1.5");
        assert_eq!(encode(&Json::Double(3.0), &opts()), "3.0");
    }

    #[test]
    fn encodes_string_escapes() {
        assert_eq!(
            encode(&Json::String("a\"b\\c\n".to_owned()), &opts()),
            r#""a\"b\\c\n""#
        );
    }

    #[test]
    fn escapes_slashes_when_requested() {
        let o = EncoderOptions {
            escape_slashes: true,
            ..opts()
        };
        assert_eq!(encode(&Json::String("a/b".to_owned()), &o), r#""a\/b""#);
    }

    #[test]
    fn ascii_only_escapes_non_ascii_scalars() {
        let o = EncoderOptions {
            ascii_only: true,
            ..opts()
        };
        assert_eq!(encode(&Json::String("café".to_owned()), &o), r#""caf\u00e9""#);
    }

    #[test]
    fn ascii_only_escapes_astral_scalars_as_surrogate_pair() {
        let o = EncoderOptions {
            ascii_only: true,
            ..opts()
        };
        assert_eq!(
            encode(&Json::String("\u{1F600}".to_owned()), &o),
            r#""\ud83d\ude00""#
        );
    }

    #[test]
    fn compact_object_has_no_whitespace() {
        let mut obj = JsonObject::new();
        obj.insert("b", Json::Int64(2));
        obj.insert("a", Json::Int64(1));
        assert_eq!(encode(&Json::Object(obj), &opts()), r#"{"b":2,"a":1}"#);
    }

    #[test]
    fn sorted_keys_orders_lexicographically() {
        let mut obj = JsonObject::new();
        obj.insert("b", Json::Int64(2));
        obj.insert("a", Json::Int64(1));
        let o = EncoderOptions {
            sorted_keys: true,
            ..opts()
        };
        assert_eq!(encode(&Json::Object(obj), &o), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn pretty_prints_with_indent_and_newlines() {
        let mut obj = JsonObject::new();
        obj.insert("a", Json::Array(vec![Json::Int64(1)]));
        let o = EncoderOptions::pretty();
        assert_eq!(
            encode(&Json::Object(obj), &o),
            "{\n  \"a\": [\n    1\n  ]\n}"
        );
    }

    #[test]
    fn rejects_non_finite_doubles_by_default() {
        let mut out = String::new();
        assert!(encode_to(&Json::Double(f64::NAN), &opts(), &mut out).is_err());
    }

    #[test]
    fn allows_non_finite_doubles_when_requested() {
        let o = EncoderOptions {
            allow_non_finite_numbers: true,
            ..opts()
        };
        assert_eq!(encode(&Json::Double(f64::NAN), &o), "NaN");
        assert_eq!(encode(&Json::Double(f64::INFINITY), &o), "Infinity");
        assert_eq!(encode(&Json::Double(f64::NEG_INFINITY), &o), "-Infinity");
    }

    #[cfg(feature = "decimal")]
    #[test]
    fn encodes_decimal_verbatim() {
        let d: Decimal = "150".parse().unwrap();
        assert_eq!(encode(&Json::Decimal(d), &opts()), "150");
    }
}
