//! Assembles a [`Json`] value out of the [`crate::Parser`]'s event stream.
//!
//! The assembler is a small frame stack mirroring the parser's own
//! container nesting; it never recurses, so depth is bounded by
//! [`ParserOptions::max_depth`] exactly as the parser enforces it.
use crate::event::{ParseEvent, Position, PositionedEvent};
use crate::options::ParserOptions;
use crate::parse_error::ParseError;
use crate::parser::Parser;
use crate::value::{Json, JsonArray, JsonObject};

enum BuildFrame {
    Array(JsonArray),
    Object {
        obj: JsonObject,
        pending_key: Option<String>,
        pending_key_position: Position,
    },
}

/// Parses `chars` into a single [`Json`] value.
///
/// Errors if the input holds more than one top-level value (unless
/// [`ParserOptions::allow_multiple_values`] is set, in which case use
/// [`decode_all`] instead to get every value).
pub fn decode(chars: impl Iterator<Item = char>, options: ParserOptions) -> Result<Json, ParseError> {
    let reject_duplicates = options.reject_duplicate_keys;
    let mut parser = Parser::new(chars, options);
    assemble_one(&mut parser, reject_duplicates)?.ok_or(ParseError::UnexpectedEof {
        position: Position::start(),
    })
}

/// Parses `s` into a single [`Json`] value.
pub fn decode_str(s: &str, options: ParserOptions) -> Result<Json, ParseError> {
    decode(s.chars(), options)
}

/// Parses `bytes` into a single [`Json`] value, first sniffing BOM/encoding
/// per [`crate::bytes::detect_encoding`].
///
/// In `strict` mode, malformed UTF-8 input is rejected outright
/// (`ParseError::InvalidUtf8`) rather than substituted with U+FFFD; other
/// detected encodings (UTF-16/32) always use best-effort substitution, as
/// does UTF-8 in lenient mode.
pub fn decode_bytes(bytes: &[u8], options: ParserOptions) -> Result<Json, ParseError> {
    use crate::bytes::{ByteDecoder, Encoding};

    let (encoding, bom_len) = crate::bytes::detect_encoding(bytes);
    if options.strict && encoding == Encoding::Utf8 {
        let content = &bytes[bom_len..];
        return match std::str::from_utf8(content) {
            Ok(s) => decode_str(s, options),
            Err(_) => Err(ParseError::InvalidUtf8 {
                position: Position::start(),
            }),
        };
    }
    decode(ByteDecoder::new(bytes), options)
}

/// Parses every top-level value out of `chars` in turn. Requires
/// [`ParserOptions::allow_multiple_values`].
pub fn decode_all(
    chars: impl Iterator<Item = char>,
    options: ParserOptions,
) -> impl Iterator<Item = Result<Json, ParseError>> {
    assert!(
        options.allow_multiple_values,
        "decode_all requires ParserOptions::allow_multiple_values"
    );
    let reject_duplicates = options.reject_duplicate_keys;
    let mut parser = Parser::new(chars, options);
    std::iter::from_fn(move || assemble_one(&mut parser, reject_duplicates).transpose())
}

fn assemble_one(
    parser: &mut Parser<impl Iterator<Item = char>>,
    reject_duplicates: bool,
) -> Result<Option<Json>, ParseError> {
    let mut stack: Vec<BuildFrame> = Vec::new();

    loop {
        let Some(positioned) = parser.next() else {
            return Ok(None);
        };
        let PositionedEvent { event, position } = positioned?;

        // Object key position: every event the parser emits here is a
        // `StringValue`, never a value or container start.
        if let Some(BuildFrame::Object {
            pending_key,
            pending_key_position,
            ..
        }) = stack.last_mut()
        {
            if pending_key.is_none() {
                let ParseEvent::StringValue(key) = event else {
                    unreachable!("parser only allows string keys in key position")
                };
                *pending_key = Some(key);
                *pending_key_position = position;
                continue;
            }
        }

        let value = match event {
            ParseEvent::ObjectStart => {
                stack.push(BuildFrame::Object {
                    obj: JsonObject::new(),
                    pending_key: None,
                    pending_key_position: position,
                });
                continue;
            }
            ParseEvent::ArrayStart => {
                stack.push(BuildFrame::Array(JsonArray::new()));
                continue;
            }
            ParseEvent::ObjectEnd => {
                let Some(BuildFrame::Object { obj, .. }) = stack.pop() else {
                    unreachable!("parser only emits ObjectEnd for an open object frame")
                };
                Json::Object(obj)
            }
            ParseEvent::ArrayEnd => {
                let Some(BuildFrame::Array(items)) = stack.pop() else {
                    unreachable!("parser only emits ArrayEnd for an open array frame")
                };
                Json::Array(items)
            }
            ParseEvent::NullValue => Json::Null,
            ParseEvent::BooleanValue(b) => Json::Bool(b),
            ParseEvent::StringValue(s) => Json::String(s),
            ParseEvent::Int64Value(i) => Json::Int64(i),
            ParseEvent::DoubleValue(d) => Json::Double(d),
            #[cfg(feature = "decimal")]
            ParseEvent::DecimalValue(d) => Json::Decimal(d),
        };

        if let Some(done) = attach(&mut stack, value, reject_duplicates)? {
            return Ok(Some(done));
        }
    }
}

/// Pushes `value` into the frame at the top of `stack` (as the next array
/// element, or as the pending object key's value, clearing the key).
/// Returns `Some(value)` unchanged if `stack` is empty — `value` was itself
/// the completed top-level value.
fn attach(
    stack: &mut [BuildFrame],
    value: Json,
    reject_duplicates: bool,
) -> Result<Option<Json>, ParseError> {
    match stack.last_mut() {
        None => Ok(Some(value)),
        Some(BuildFrame::Array(items)) => {
            items.push(value);
            Ok(None)
        }
        Some(BuildFrame::Object {
            obj,
            pending_key,
            pending_key_position,
        }) => {
            let key = pending_key.take().expect("value arrives only after a key");
            if reject_duplicates && obj.contains_key(&key) {
                return Err(ParseError::DuplicateKey {
                    key,
                    position: *pending_key_position,
                });
            }
            obj.insert(key, value);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scalar() {
        assert_eq!(
            decode_str("42", ParserOptions::default()).unwrap(),
            Json::Int64(42)
        );
    }

    #[test]
    fn decodes_nested_object_and_array() {
        let v = decode_str(r#"{"a":[1,2],"b":{"c":null}}"#, ParserOptions::default()).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(
            obj.get("a"),
            Some(&Json::Array(vec![Json::Int64(1), Json::Int64(2)]))
        );
        assert_eq!(
            obj.get("b").unwrap().as_object().unwrap().get("c"),
            Some(&Json::Null)
        );
    }

    #[test]
    fn duplicate_keys_keep_last_by_default() {
        let v = decode_str(r#"{"a":1,"a":2}"#, ParserOptions::default()).unwrap();
        assert_eq!(v.as_object().unwrap().get("a"), Some(&Json::Int64(2)));
        assert_eq!(v.as_object().unwrap().len(), 1);
    }

    #[test]
    fn duplicate_keys_error_when_rejected() {
        let opts = ParserOptions {
            reject_duplicate_keys: true,
            ..ParserOptions::default()
        };
        let err = decode_str(r#"{"a":1,"a":2}"#, opts).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateKey { .. }));
    }

    #[test]
    fn decode_all_yields_every_top_level_value() {
        let opts = ParserOptions {
            allow_multiple_values: true,
            ..ParserOptions::default()
        };
        let values: Result<Vec<_>, _> = decode_all("1 2 3".chars(), opts).collect();
        assert_eq!(
            values.unwrap(),
            vec![Json::Int64(1), Json::Int64(2), Json::Int64(3)]
        );
    }

    #[test]
    fn rejects_more_than_one_top_level_value_by_default() {
        assert!(decode_str("1 2", ParserOptions::default()).is_err());
    }

    #[test]
    fn decode_bytes_sniffs_utf16_bom() {
        let bytes = [0xFF, 0xFE, b'1', 0x00];
        assert_eq!(
            decode_bytes(&bytes, ParserOptions::default()).unwrap(),
            Json::Int64(1)
        );
    }
}
