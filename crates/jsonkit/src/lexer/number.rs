//! Turns a lexed number literal into a [`Json`] value per the int64 /
//! double / decimal trichotomy described in the crate's number model.
use crate::value::Json;

#[cfg(feature = "decimal")]
use crate::value::Decimal;

/// Lexical hint distinguishing integer literals (no `.`/`e`/`E`) from
/// everything else, mirroring the JSON number grammar's two shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberLexeme<'a> {
    /// No `.`, `e`, or `E`.
    Integer(&'a str),
    /// Has a fraction and/or exponent.
    Float(&'a str),
}

impl<'a> NumberLexeme<'a> {
    pub(crate) fn text(self) -> &'a str {
        match self {
            Self::Integer(s) | Self::Float(s) => s,
        }
    }
}

pub(crate) fn classify(lexeme: &str) -> NumberLexeme<'_> {
    if lexeme.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
        NumberLexeme::Float(lexeme)
    } else {
        NumberLexeme::Integer(lexeme)
    }
}

/// Converts a classified number lexeme into a [`Json`] number value.
///
/// * An [`NumberLexeme::Integer`] that fits in `i64` becomes
///   [`Json::Int64`]. If it overflows, it is promoted to [`Json::Double`],
///   or to [`Json::Decimal`] when `use_decimals` is set.
/// * A [`NumberLexeme::Float`] becomes [`Json::Double`] by default, or
///   [`Json::Decimal`] when `use_decimals` is set.
pub(crate) fn to_json(lexeme: NumberLexeme<'_>, use_decimals: bool) -> Json {
    match lexeme {
        NumberLexeme::Integer(s) => {
            if let Ok(i) = s.parse::<i64>() {
                Json::Int64(i)
            } else if use_decimals {
                decimal_or_double(s)
            } else {
                Json::Double(parse_lossy_f64(s))
            }
        }
        NumberLexeme::Float(s) => {
            if use_decimals {
                decimal_or_double(s)
            } else {
                Json::Double(parse_lossy_f64(s))
            }
        }
    }
}

fn parse_lossy_f64(s: &str) -> f64 {
    // The lexer only ever hands us a syntactically valid JSON number token
    // (save for magnitudes outside f64's range), so this always succeeds;
    // an out-of-range magnitude parses to +-infinity, which is the correct
    // double-precision interpretation of "too big to represent".
    s.parse::<f64>().unwrap_or_else(|_| {
        if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    })
}

#[cfg(feature = "decimal")]
fn decimal_or_double(s: &str) -> Json {
    let parsed = if s.contains(['e', 'E']) {
        Decimal::from_scientific(s).ok()
    } else {
        s.parse::<Decimal>().ok()
    };
    match parsed {
        Some(d) => Json::Decimal(d),
        // A magnitude or scale outside rust_decimal's range (~29 significant
        // digits): fall back to the binary float rather than erroring.
        None => Json::Double(parse_lossy_f64(s)),
    }
}

#[cfg(not(feature = "decimal"))]
fn decimal_or_double(s: &str) -> Json {
    Json::Double(parse_lossy_f64(s))
}
