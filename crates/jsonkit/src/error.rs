//! Errors produced by the typed-accessor layer.
//!
//! These are distinct from [`crate::ParseError`], which reports lexical and
//! structural failures during parsing. `JsonError` is raised only by the
//! `get_*`/`to_*` accessor families in [`crate::accessors`] and carries a
//! [`Path`] built up as the error crosses keyed/indexed lookup boundaries.
use std::fmt;

use crate::path::{Path, PathComponent};
use crate::value::Category;

#[cfg(feature = "decimal")]
use crate::value::Decimal;

/// Whether an accessor required a value to be present, or tolerated its
/// absence (`Null` or a missing key/index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Required(Category),
    Optional(Category),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(c) => write!(f, "required({c})"),
            Self::Optional(c) => write!(f, "optional({c})"),
        }
    }
}

/// Errors raised by the typed-accessor subsystem.
///
/// `path` is `None` at the point the error is first raised (the leaf of the
/// access chain) and is filled in, component by component, as the error
/// propagates back out through each keyed or indexed lookup it crossed. See
/// [`JsonError::prefix_path`].
#[derive(Debug, Clone, PartialEq)]
pub enum JsonError {
    /// An accessor found no value, or a value of the wrong category.
    MissingOrInvalidType {
        path: Option<Path>,
        expected: Expected,
        actual: Option<Category>,
    },
    /// An integer coercion didn't fit a narrower integer type.
    OutOfRangeInt64 {
        path: Option<Path>,
        value: i64,
        target: &'static str,
    },
    /// A double coercion didn't fit the integer target (non-finite, or
    /// outside the target's range).
    OutOfRangeDouble {
        path: Option<Path>,
        value: f64,
        target: &'static str,
    },
    /// A decimal coercion didn't fit the integer target.
    #[cfg(feature = "decimal")]
    OutOfRangeDecimal {
        path: Option<Path>,
        value: Decimal,
        target: &'static str,
    },
}

impl JsonError {
    /// The path accumulated so far, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::MissingOrInvalidType { path, .. }
            | Self::OutOfRangeInt64 { path, .. }
            | Self::OutOfRangeDouble { path, .. } => path.as_ref(),
            #[cfg(feature = "decimal")]
            Self::OutOfRangeDecimal { path, .. } => path.as_ref(),
        }
    }

    /// Prepends `component` onto this error's path, initializing it to the
    /// root path first if it was empty.
    ///
    /// This is how a keyed/indexed lookup (`JsonObject::get_string`,
    /// `JsonArray::get_int64`, `map`/`for_each`, ...) annotates an error
    /// raised by a nested access with its own position: it catches the
    /// error at the lookup boundary and rewrites `path` before
    /// re-propagating it.
    #[must_use]
    pub fn prefix_path(mut self, component: impl Into<PathComponent>) -> Self {
        let slot = match &mut self {
            Self::MissingOrInvalidType { path, .. }
            | Self::OutOfRangeInt64 { path, .. }
            | Self::OutOfRangeDouble { path, .. } => path,
            #[cfg(feature = "decimal")]
            Self::OutOfRangeDecimal { path, .. } => path,
        };
        *slot = Some(slot.take().unwrap_or_default().prepended(component));
        self
    }
}

fn fmt_path(path: &Option<Path>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match path {
        Some(p) if !p.is_empty() => write!(f, "{p}: "),
        _ => Ok(()),
    }
}

fn fmt_actual(actual: Option<Category>) -> String {
    match actual {
        Some(c) => c.to_string(),
        None => "nothing".to_owned(),
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOrInvalidType {
                path,
                expected,
                actual,
            } => {
                fmt_path(path, f)?;
                write!(f, "expected {expected}, found {}", fmt_actual(*actual))
            }
            Self::OutOfRangeInt64 {
                path,
                value,
                target,
            } => {
                fmt_path(path, f)?;
                write!(f, "integer {value} out of range for {target}")
            }
            Self::OutOfRangeDouble {
                path,
                value,
                target,
            } => {
                fmt_path(path, f)?;
                write!(f, "double {value} out of range for {target}")
            }
            #[cfg(feature = "decimal")]
            Self::OutOfRangeDecimal {
                path,
                value,
                target,
            } => {
                fmt_path(path, f)?;
                write!(f, "decimal {value} out of range for {target}")
            }
        }
    }
}

impl std::error::Error for JsonError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_no_path_prefix_at_the_leaf() {
        let err = JsonError::MissingOrInvalidType {
            path: None,
            expected: Expected::Required(Category::String),
            actual: Some(Category::Number),
        };
        assert_eq!(err.to_string(), "expected required(string), found number");
    }

    #[test]
    fn prefix_path_builds_up_bottom_up() {
        let err = JsonError::MissingOrInvalidType {
            path: None,
            expected: Expected::Required(Category::String),
            actual: Some(Category::Number),
        };
        let err = err.prefix_path(2usize);
        let err = err.prefix_path("tags");
        let err = err.prefix_path("user");
        assert_eq!(
            err.to_string(),
            "user.tags[2]: expected required(string), found number"
        );
    }

    #[test]
    fn missing_value_formats_as_nothing() {
        let err = JsonError::MissingOrInvalidType {
            path: None,
            expected: Expected::Required(Category::Object),
            actual: None,
        };
        assert_eq!(err.to_string(), "expected required(object), found nothing");
    }
}
