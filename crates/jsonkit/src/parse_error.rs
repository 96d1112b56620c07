//! Errors raised while lexing or parsing a character sequence.
//!
//! Distinct from [`crate::JsonError`], which is raised by the typed-accessor
//! layer once a value already exists. Unlike `JsonError`, every variant here
//! carries its own [`Position`] rather than accumulating one on the way back
//! out, so a `#[derive(thiserror::Error)]` fits cleanly.
use thiserror::Error;

use crate::event::Position;

/// A lexical or structural failure, located at a 1-based line/column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{position}: unexpected end of input")]
    UnexpectedEof { position: Position },

    #[error("{position}: unexpected character {character:?}")]
    UnexpectedCharacter { character: char, position: Position },

    #[error("{position}: invalid escape sequence")]
    InvalidEscape { position: Position },

    #[error("{position}: invalid unicode escape")]
    InvalidUnicodeScalar { position: Position },

    #[error("{position}: invalid number literal")]
    InvalidNumber { position: Position },

    #[error("{position}: unescaped control character {:#06x} in string", *character as u32)]
    ControlCharacterInString { character: char, position: Position },

    #[error("{position}: trailing data after value")]
    TrailingData { position: Position },

    #[error("{position}: exceeded maximum nesting depth ({max_depth})")]
    ExceededDepthLimit { position: Position, max_depth: u32 },

    /// Raised by the value assembler when [`crate::ParserOptions::reject_duplicate_keys`]
    /// is set and an object repeats a key.
    #[error("{position}: duplicate object key {key:?}")]
    DuplicateKey { key: String, position: Position },

    /// The byte-decoding layer was asked to reject malformed input (strict
    /// mode) rather than substitute U+FFFD for it. Only raised by
    /// [`crate::decode_bytes`]; never by the character-sequence parser.
    #[error("{position}: invalid UTF-8 byte sequence")]
    InvalidUtf8 { position: Position },
}

impl ParseError {
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::UnexpectedEof { position }
            | Self::UnexpectedCharacter { position, .. }
            | Self::InvalidEscape { position }
            | Self::InvalidUnicodeScalar { position }
            | Self::InvalidNumber { position }
            | Self::ControlCharacterInString { position, .. }
            | Self::TrailingData { position }
            | Self::ExceededDepthLimit { position, .. }
            | Self::DuplicateKey { position, .. }
            | Self::InvalidUtf8 { position } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position() {
        let err = ParseError::UnexpectedCharacter {
            character: 'x',
            position: Position { line: 2, column: 5 },
        };
        assert_eq!(err.to_string(), "2:5: unexpected character 'x'");
    }
}
