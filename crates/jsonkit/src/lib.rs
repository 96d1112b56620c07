//! A strongly-typed JSON codec.
//!
//! This crate is built in four layers, bottom to top:
//!
//! 1. [`bytes`] — BOM sniffing and UTF-8/16/32 decoding to Unicode scalars.
//! 2. [`Parser`] (built on [`lexer`]) — a pull-based, zero-buffering stream
//!    of structural [`ParseEvent`]s.
//! 3. [`decode`]/[`encode`] — assembling a [`Json`] value from that event
//!    stream, and rendering one back to text.
//! 4. [`accessors`] — typed, path-annotated lookups over an assembled
//!    [`Json`] value.
//!
//! Numbers preserve their source representation losslessly: an integer
//! literal that fits in `i64` becomes [`Json::Int64`]; everything else
//! becomes [`Json::Double`], or — with the `decimal` feature and
//! [`ParserOptions::use_decimals`] — [`Json::Decimal`], an arbitrary-
//! precision base-10 number that never rounds through binary floating
//! point.
//!
//! ```
//! use jsonkit::{decode_str, encode, EncoderOptions, ParserOptions};
//!
//! let value = decode_str(r#"{"name": "ada", "age": 30}"#, ParserOptions::default()).unwrap();
//! assert_eq!(value.as_object().unwrap().get("age").unwrap().as_int64(), Some(30));
//!
//! let text = encode(&value, &EncoderOptions::pretty());
//! assert!(text.contains("\"name\""));
//! ```
mod accessors;
mod bytes;
mod decode;
mod encode;
mod error;
mod event;
mod lexer;
mod options;
mod parse_error;
mod parser;
mod path;
mod value;

pub use accessors::{flat_map_array, flat_map_sequence_array, for_each_array, map_array, JsonArrayExt};
pub use bytes::{detect_encoding, ByteDecoder, Encoding};
pub use decode::{decode, decode_all, decode_bytes, decode_str};
pub use encode::{encode, encode_to};
pub use error::{Expected, JsonError};
pub use event::{ParseEvent, Position, PositionedEvent};
pub use options::{EncoderOptions, ParserOptions};
pub use parse_error::ParseError;
pub use parser::Parser;
pub use path::{Path, PathComponent};
pub use value::{Category, Json, JsonArray, JsonObject};

#[cfg(feature = "decimal")]
pub use value::Decimal;
