//! Knobs controlling parsing and encoding behavior.

/// Controls how the parser and assembler interpret a character stream.
///
/// `ParserOptions::default()` matches RFC 8259 strict JSON with a single
/// top-level value and int64/double numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserOptions {
    /// When `false`, accepts `//` and `/* */` comments, bare unquoted
    /// control characters are still rejected, and a leading `+` or bare
    /// `.5`/`5.` number is tolerated. Defaults to `true`.
    pub strict: bool,
    /// When set, non-integer and overflowing-integer number literals are
    /// parsed into [`crate::Json::Decimal`] rather than [`crate::Json::Double`].
    /// Only available when the `decimal` feature is enabled.
    #[cfg(feature = "decimal")]
    pub use_decimals: bool,
    /// When `true`, a repeated object key is a parse error instead of the
    /// default last-value-wins overwrite (matching [`crate::JsonObject`]'s
    /// `insert` semantics).
    pub reject_duplicate_keys: bool,
    /// When `true`, more than one top-level value may appear in the input,
    /// and [`crate::decode_all`] yields each in turn. When `false` (the
    /// default), trailing non-whitespace after the first value is a
    /// `trailingData` error.
    pub allow_multiple_values: bool,
    /// Maximum nesting depth (objects and arrays combined) the parser will
    /// accept before raising `exceededDepthLimit`. Defaults to 64.
    pub max_depth: u32,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            strict: true,
            #[cfg(feature = "decimal")]
            use_decimals: false,
            reject_duplicate_keys: false,
            allow_multiple_values: false,
            max_depth: 64,
        }
    }
}

impl ParserOptions {
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }

    #[cfg(feature = "decimal")]
    #[must_use]
    pub fn use_decimals(&self) -> bool {
        self.use_decimals
    }

    #[cfg(not(feature = "decimal"))]
    #[must_use]
    pub fn use_decimals(&self) -> bool {
        false
    }
}

/// Controls how [`crate::encode`] renders a [`crate::Json`] value.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderOptions {
    /// Emit newlines and `indent`-width indentation between container
    /// members. Defaults to `false` (compact output).
    pub pretty: bool,
    /// The string inserted per nesting level when `pretty` is set.
    /// Defaults to two spaces.
    pub indent: String,
    /// Emit object keys in ascending lexicographic order rather than
    /// insertion order. Defaults to `false`.
    pub sorted_keys: bool,
    /// Escape `/` as `\/` in strings. Defaults to `false`.
    pub escape_slashes: bool,
    /// Escape every non-ASCII scalar as a `\uXXXX` (or surrogate pair)
    /// escape rather than emitting it literally. Defaults to `false`.
    pub ascii_only: bool,
    /// Permit `NaN`/`Infinity`/`-Infinity` doubles to encode as those bare
    /// identifiers (not valid JSON) instead of raising an error. Defaults
    /// to `false`.
    pub allow_non_finite_numbers: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_owned(),
            sorted_keys: false,
            escape_slashes: false,
            ascii_only: false,
            allow_non_finite_numbers: false,
        }
    }
}

impl EncoderOptions {
    #[must_use]
    pub fn compact() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}
