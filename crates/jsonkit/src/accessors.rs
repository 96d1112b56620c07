//! Typed accessors over [`Json`] values.
//!
//! Two families:
//!
//! * `require_*`/`optional_*` on [`Json`] itself check the value is exactly
//!   the named variant (`Json::Null`/absence maps to `None` for the
//!   `optional_*` half, and is a [`JsonError`] for `require_*`).
//! * `to_*`/`optional_to_*` coercions (`to_string_value`, `to_int64`,
//!   `to_int`, `to_double`, and their `optional_to_*` counterparts, where
//!   `Null` maps to `None` instead of erroring or stringifying) additionally
//!   convert between the number variants and parse numeric strings, per the
//!   rules documented on each.
//!
//! Both families exist at three levels: directly on [`Json`], keyed on
//! [`JsonObject`], and indexed via the [`JsonArrayExt`] trait (implemented
//! for `[Json]`, and so for `JsonArray`/`Vec<Json>` too) — the latter two
//! wrap the `Json`-level accessor with a keyed or indexed lookup, prefixing
//! any error's path with the key or index crossed to reach it.
use crate::error::{Expected, JsonError};
use crate::value::{Category, Json, JsonArray, JsonObject};

#[cfg(feature = "decimal")]
use crate::value::Decimal;

impl Json {
    fn type_error(&self, expected: Expected) -> JsonError {
        JsonError::MissingOrInvalidType {
            path: None,
            expected,
            actual: Some(self.category()),
        }
    }

    pub fn require_bool(&self) -> Result<bool, JsonError> {
        self.as_bool()
            .ok_or_else(|| self.type_error(Expected::Required(Category::Bool)))
    }

    pub fn optional_bool(&self) -> Result<Option<bool>, JsonError> {
        if self.is_null() {
            return Ok(None);
        }
        self.as_bool()
            .map(Some)
            .ok_or_else(|| self.type_error(Expected::Optional(Category::Bool)))
    }

    pub fn require_str(&self) -> Result<&str, JsonError> {
        self.as_str()
            .ok_or_else(|| self.type_error(Expected::Required(Category::String)))
    }

    pub fn optional_str(&self) -> Result<Option<&str>, JsonError> {
        if self.is_null() {
            return Ok(None);
        }
        self.as_str()
            .map(Some)
            .ok_or_else(|| self.type_error(Expected::Optional(Category::String)))
    }

    pub fn require_int64(&self) -> Result<i64, JsonError> {
        self.as_int64()
            .ok_or_else(|| self.type_error(Expected::Required(Category::Number)))
    }

    pub fn optional_int64(&self) -> Result<Option<i64>, JsonError> {
        if self.is_null() {
            return Ok(None);
        }
        self.as_int64()
            .map(Some)
            .ok_or_else(|| self.type_error(Expected::Optional(Category::Number)))
    }

    pub fn require_double(&self) -> Result<f64, JsonError> {
        self.as_double()
            .ok_or_else(|| self.type_error(Expected::Required(Category::Number)))
    }

    pub fn optional_double(&self) -> Result<Option<f64>, JsonError> {
        if self.is_null() {
            return Ok(None);
        }
        self.as_double()
            .map(Some)
            .ok_or_else(|| self.type_error(Expected::Optional(Category::Number)))
    }

    #[cfg(feature = "decimal")]
    pub fn require_decimal(&self) -> Result<Decimal, JsonError> {
        self.as_decimal()
            .ok_or_else(|| self.type_error(Expected::Required(Category::Number)))
    }

    #[cfg(feature = "decimal")]
    pub fn optional_decimal(&self) -> Result<Option<Decimal>, JsonError> {
        if self.is_null() {
            return Ok(None);
        }
        self.as_decimal()
            .map(Some)
            .ok_or_else(|| self.type_error(Expected::Optional(Category::Number)))
    }

    pub fn require_object(&self) -> Result<&JsonObject, JsonError> {
        self.as_object()
            .ok_or_else(|| self.type_error(Expected::Required(Category::Object)))
    }

    pub fn optional_object(&self) -> Result<Option<&JsonObject>, JsonError> {
        if self.is_null() {
            return Ok(None);
        }
        self.as_object()
            .map(Some)
            .ok_or_else(|| self.type_error(Expected::Optional(Category::Object)))
    }

    pub fn require_array(&self) -> Result<&JsonArray, JsonError> {
        self.as_array()
            .ok_or_else(|| self.type_error(Expected::Required(Category::Array)))
    }

    pub fn optional_array(&self) -> Result<Option<&JsonArray>, JsonError> {
        if self.is_null() {
            return Ok(None);
        }
        self.as_array()
            .map(Some)
            .ok_or_else(|| self.type_error(Expected::Optional(Category::Array)))
    }

    /// Coerces to a `String`: strings clone, numbers and booleans format
    /// themselves, `null` becomes the literal `"null"`, containers are an
    /// error. See [`Json::optional_to_string_value`] for the form where
    /// `null` maps to `None` instead.
    pub fn to_string_value(&self) -> Result<String, JsonError> {
        match self {
            Json::Null => Ok("null".to_owned()),
            Json::String(s) => Ok(s.clone()),
            Json::Bool(b) => Ok(b.to_string()),
            Json::Int64(i) => Ok(i.to_string()),
            Json::Double(d) => Ok(d.to_string()),
            #[cfg(feature = "decimal")]
            Json::Decimal(d) => Ok(d.to_string()),
            _ => Err(self.type_error(Expected::Required(Category::String))),
        }
    }

    /// As [`Json::to_string_value`], but `null` yields `None` rather than
    /// the literal `"null"`.
    pub fn optional_to_string_value(&self) -> Result<Option<String>, JsonError> {
        if self.is_null() {
            return Ok(None);
        }
        self.to_string_value().map(Some)
    }

    /// Coerces to `i64`: an exact [`Json::Int64`] passes through; a
    /// [`Json::Double`] or [`Json::Decimal`] truncates toward zero (not
    /// rounds) and range-checks into `i64`; a [`Json::String`] parses as an
    /// integer literal first, falling back to a `Double` parse (and the same
    /// truncating range check) on failure. Everything else is an error.
    pub fn to_int64(&self) -> Result<i64, JsonError> {
        match self {
            Json::Int64(i) => Ok(*i),
            Json::Double(d) => double_to_i64(*d),
            #[cfg(feature = "decimal")]
            Json::Decimal(d) => decimal_to_i64(*d),
            Json::String(s) => {
                if let Ok(i) = s.parse::<i64>() {
                    Ok(i)
                } else if let Ok(d) = s.parse::<f64>() {
                    double_to_i64(d)
                } else {
                    Err(self.type_error(Expected::Required(Category::Number)))
                }
            }
            _ => Err(self.type_error(Expected::Required(Category::Number))),
        }
    }

    /// As [`Json::to_int64`], but `null` yields `None` rather than an error.
    pub fn optional_to_int64(&self) -> Result<Option<i64>, JsonError> {
        if self.is_null() {
            return Ok(None);
        }
        self.to_int64().map(Some)
    }

    /// As [`Json::to_int64`], additionally range-checked into `i32`.
    pub fn to_int(&self) -> Result<i32, JsonError> {
        let v = self.to_int64()?;
        i32::try_from(v).map_err(|_| JsonError::OutOfRangeInt64 {
            path: None,
            value: v,
            target: "i32",
        })
    }

    /// As [`Json::to_int`], but `null` yields `None` rather than an error.
    pub fn optional_to_int(&self) -> Result<Option<i32>, JsonError> {
        if self.is_null() {
            return Ok(None);
        }
        self.to_int().map(Some)
    }

    /// Coerces to `f64`: both number variants and numeric strings convert;
    /// `Decimal` may lose precision in the conversion.
    pub fn to_double(&self) -> Result<f64, JsonError> {
        match self {
            Json::Int64(i) => Ok(*i as f64),
            Json::Double(d) => Ok(*d),
            #[cfg(feature = "decimal")]
            Json::Decimal(d) => Ok(d.to_string().parse::<f64>().unwrap_or(f64::NAN)),
            Json::String(s) => s
                .parse::<f64>()
                .map_err(|_| self.type_error(Expected::Required(Category::Number))),
            _ => Err(self.type_error(Expected::Required(Category::Number))),
        }
    }

    /// As [`Json::to_double`], but `null` yields `None` rather than an error.
    pub fn optional_to_double(&self) -> Result<Option<f64>, JsonError> {
        if self.is_null() {
            return Ok(None);
        }
        self.to_double().map(Some)
    }
}

/// Truncates `d` toward zero, not rounds, before range-checking into `i64`.
fn double_to_i64(d: f64) -> Result<i64, JsonError> {
    if d.is_finite() && d >= i64::MIN as f64 && d <= i64::MAX as f64 {
        Ok(d.trunc() as i64)
    } else {
        Err(JsonError::OutOfRangeDouble {
            path: None,
            value: d,
            target: "i64",
        })
    }
}

/// Truncates `d` toward zero, not rounds, before range-checking into `i64`.
#[cfg(feature = "decimal")]
fn decimal_to_i64(d: Decimal) -> Result<i64, JsonError> {
    use std::str::FromStr;
    i64::from_str(&d.trunc().to_string()).map_err(|_| JsonError::OutOfRangeDecimal {
        path: None,
        value: d,
        target: "i64",
    })
}

macro_rules! container_lookups {
    ($( $require:ident / $optional:ident => $leaf_require:ident / $leaf_optional:ident : $ret:ty, $category:expr );+ $(;)?) => {
        impl JsonObject {
            $(
                #[doc = concat!("Looks up `key`, requiring it be present and a valid ", stringify!($ret), ".")]
                pub fn $require(&self, key: &str) -> Result<$ret, JsonError> {
                    match self.get(key) {
                        Some(v) => v.$leaf_require().map_err(|e| e.prefix_path(key)),
                        None => Err(JsonError::MissingOrInvalidType {
                            path: None,
                            expected: Expected::Required($category),
                            actual: None,
                        }
                        .prefix_path(key)),
                    }
                }

                #[doc = concat!("Looks up `key`, tolerating absence or `null`.")]
                pub fn $optional(&self, key: &str) -> Result<Option<$ret>, JsonError> {
                    match self.get(key) {
                        None => Ok(None),
                        Some(v) => v.$leaf_optional().map_err(|e| e.prefix_path(key)),
                    }
                }
            )+
        }
    };
}

/// Indexed accessors for JSON arrays, implemented for `[Json]` (and so for
/// [`JsonArray`]/`Vec<Json>`) so they stay usable without owning the slice.
pub trait JsonArrayExt {
    fn require_bool_at(&self, index: usize) -> Result<bool, JsonError>;
    fn optional_bool_at(&self, index: usize) -> Result<Option<bool>, JsonError>;
    fn require_str_at(&self, index: usize) -> Result<&str, JsonError>;
    fn optional_str_at(&self, index: usize) -> Result<Option<&str>, JsonError>;
    fn require_int64_at(&self, index: usize) -> Result<i64, JsonError>;
    fn optional_int64_at(&self, index: usize) -> Result<Option<i64>, JsonError>;
    fn require_double_at(&self, index: usize) -> Result<f64, JsonError>;
    fn optional_double_at(&self, index: usize) -> Result<Option<f64>, JsonError>;
    fn require_object_at(&self, index: usize) -> Result<&JsonObject, JsonError>;
    fn optional_object_at(&self, index: usize) -> Result<Option<&JsonObject>, JsonError>;
    fn require_array_at(&self, index: usize) -> Result<&JsonArray, JsonError>;
    fn optional_array_at(&self, index: usize) -> Result<Option<&JsonArray>, JsonError>;

    fn to_string_at(&self, index: usize) -> Result<String, JsonError>;
    fn optional_to_string_at(&self, index: usize) -> Result<Option<String>, JsonError>;
    fn to_int64_at(&self, index: usize) -> Result<i64, JsonError>;
    fn optional_to_int64_at(&self, index: usize) -> Result<Option<i64>, JsonError>;
    fn to_int_at(&self, index: usize) -> Result<i32, JsonError>;
    fn optional_to_int_at(&self, index: usize) -> Result<Option<i32>, JsonError>;
    fn to_double_at(&self, index: usize) -> Result<f64, JsonError>;
    fn optional_to_double_at(&self, index: usize) -> Result<Option<f64>, JsonError>;
}

impl JsonArrayExt for [Json] {
    fn require_bool_at(&self, index: usize) -> Result<bool, JsonError> {
        array_require(self, index, Category::Bool, Json::require_bool)
    }
    fn optional_bool_at(&self, index: usize) -> Result<Option<bool>, JsonError> {
        array_optional(self, index, Json::optional_bool)
    }
    fn require_str_at(&self, index: usize) -> Result<&str, JsonError> {
        array_require(self, index, Category::String, Json::require_str)
    }
    fn optional_str_at(&self, index: usize) -> Result<Option<&str>, JsonError> {
        array_optional(self, index, Json::optional_str)
    }
    fn require_int64_at(&self, index: usize) -> Result<i64, JsonError> {
        array_require(self, index, Category::Number, Json::require_int64)
    }
    fn optional_int64_at(&self, index: usize) -> Result<Option<i64>, JsonError> {
        array_optional(self, index, Json::optional_int64)
    }
    fn require_double_at(&self, index: usize) -> Result<f64, JsonError> {
        array_require(self, index, Category::Number, Json::require_double)
    }
    fn optional_double_at(&self, index: usize) -> Result<Option<f64>, JsonError> {
        array_optional(self, index, Json::optional_double)
    }
    fn require_object_at(&self, index: usize) -> Result<&JsonObject, JsonError> {
        array_require(self, index, Category::Object, Json::require_object)
    }
    fn optional_object_at(&self, index: usize) -> Result<Option<&JsonObject>, JsonError> {
        array_optional(self, index, Json::optional_object)
    }
    fn require_array_at(&self, index: usize) -> Result<&JsonArray, JsonError> {
        array_require(self, index, Category::Array, Json::require_array)
    }
    fn optional_array_at(&self, index: usize) -> Result<Option<&JsonArray>, JsonError> {
        array_optional(self, index, Json::optional_array)
    }

    fn to_string_at(&self, index: usize) -> Result<String, JsonError> {
        array_require(self, index, Category::String, Json::to_string_value)
    }
    fn optional_to_string_at(&self, index: usize) -> Result<Option<String>, JsonError> {
        array_optional(self, index, Json::optional_to_string_value)
    }
    fn to_int64_at(&self, index: usize) -> Result<i64, JsonError> {
        array_require(self, index, Category::Number, Json::to_int64)
    }
    fn optional_to_int64_at(&self, index: usize) -> Result<Option<i64>, JsonError> {
        array_optional(self, index, Json::optional_to_int64)
    }
    fn to_int_at(&self, index: usize) -> Result<i32, JsonError> {
        array_require(self, index, Category::Number, Json::to_int)
    }
    fn optional_to_int_at(&self, index: usize) -> Result<Option<i32>, JsonError> {
        array_optional(self, index, Json::optional_to_int)
    }
    fn to_double_at(&self, index: usize) -> Result<f64, JsonError> {
        array_require(self, index, Category::Number, Json::to_double)
    }
    fn optional_to_double_at(&self, index: usize) -> Result<Option<f64>, JsonError> {
        array_optional(self, index, Json::optional_to_double)
    }
}

fn array_require<'a, T>(
    arr: &'a [Json],
    index: usize,
    category: Category,
    leaf: impl FnOnce(&'a Json) -> Result<T, JsonError>,
) -> Result<T, JsonError> {
    match arr.get(index) {
        Some(v) => leaf(v).map_err(|e| e.prefix_path(index)),
        None => Err(JsonError::MissingOrInvalidType {
            path: None,
            expected: Expected::Required(category),
            actual: None,
        }
        .prefix_path(index)),
    }
}

fn array_optional<'a, T>(
    arr: &'a [Json],
    index: usize,
    leaf: impl FnOnce(&'a Json) -> Result<Option<T>, JsonError>,
) -> Result<Option<T>, JsonError> {
    match arr.get(index) {
        Some(v) => leaf(v).map_err(|e| e.prefix_path(index)),
        None => Ok(None),
    }
}

container_lookups! {
    require_bool / optional_bool => require_bool / optional_bool : bool, Category::Bool;
    require_string / optional_string => require_str / optional_str : &str, Category::String;
    require_int64 / optional_int64 => require_int64 / optional_int64 : i64, Category::Number;
    require_double / optional_double => require_double / optional_double : f64, Category::Number;
    require_object / optional_object => require_object / optional_object : &JsonObject, Category::Object;
    require_array / optional_array => require_array / optional_array : &JsonArray, Category::Array;
    to_string / optional_to_string => to_string_value / optional_to_string_value : String, Category::String;
    to_int64 / optional_to_int64 => to_int64 / optional_to_int64 : i64, Category::Number;
    to_int / optional_to_int => to_int / optional_to_int : i32, Category::Number;
    to_double / optional_to_double => to_double / optional_to_double : f64, Category::Number;
}

/// Applies `f` to every element, prefixing any error with `[i]`.
pub fn map_array<T>(
    arr: &[Json],
    f: impl Fn(&Json) -> Result<T, JsonError>,
) -> Result<Vec<T>, JsonError> {
    arr.iter()
        .enumerate()
        .map(|(i, v)| f(v).map_err(|e| e.prefix_path(i)))
        .collect()
}

/// As [`map_array`], but `f` returns a sequence per element and the results
/// are concatenated.
pub fn flat_map_array<T>(
    arr: &[Json],
    f: impl Fn(&Json) -> Result<Vec<T>, JsonError>,
) -> Result<Vec<T>, JsonError> {
    let mut out = Vec::new();
    for (i, v) in arr.iter().enumerate() {
        out.extend(f(v).map_err(|e| e.prefix_path(i))?);
    }
    Ok(out)
}

/// As [`flat_map_array`], but `f`'s per-element sequence is pulled lazily:
/// the returned iterator only invokes `f` on element `i` (and only advances
/// its inner sequence) as the caller pulls from it, rather than eagerly
/// collecting every element's results into one `Vec` up front.
pub fn flat_map_sequence_array<'a, T, I>(
    arr: &'a [Json],
    f: impl Fn(&'a Json) -> Result<I, JsonError> + 'a,
) -> impl Iterator<Item = Result<T, JsonError>> + 'a
where
    T: 'a,
    I: IntoIterator<Item = T> + 'a,
{
    arr.iter().enumerate().flat_map(move |(i, v)| {
        let items: Box<dyn Iterator<Item = Result<T, JsonError>>> = match f(v) {
            Ok(seq) => Box::new(seq.into_iter().map(Ok)),
            Err(e) => Box::new(std::iter::once(Err(e.prefix_path(i)))),
        };
        items
    })
}

/// Runs `f` for its side effects over every element, prefixing any error
/// with `[i]` and stopping at the first one.
pub fn for_each_array(
    arr: &[Json],
    mut f: impl FnMut(&Json) -> Result<(), JsonError>,
) -> Result<(), JsonError> {
    for (i, v) in arr.iter().enumerate() {
        f(v).map_err(|e| e.prefix_path(i))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Json {
        let mut obj = JsonObject::new();
        obj.insert("name", Json::String("ada".to_owned()));
        obj.insert("age", Json::Int64(30));
        obj.insert(
            "tags",
            Json::Array(vec![Json::String("admin".to_owned()), Json::Int64(2)]),
        );
        Json::Object(obj)
    }

    #[test]
    fn required_missing_key_errors_with_path() {
        let obj = sample().as_object().unwrap().clone();
        let err = obj.require_string("missing").unwrap_err();
        assert_eq!(err.to_string(), "missing: expected required(string), found nothing");
    }

    #[test]
    fn required_wrong_type_errors_with_path() {
        let obj = sample().as_object().unwrap().clone();
        let err = obj.require_string("age").unwrap_err();
        assert_eq!(err.to_string(), "age: expected required(string), found number");
    }

    #[test]
    fn optional_missing_key_is_none() {
        let obj = sample().as_object().unwrap().clone();
        assert_eq!(obj.optional_string("missing").unwrap(), None);
    }

    #[test]
    fn array_index_error_path_is_bracketed() {
        let obj = sample().as_object().unwrap().clone();
        let tags = obj.require_array("tags").unwrap();
        let err = tags.require_string_at(1).unwrap_err();
        assert_eq!(err.to_string(), "[1]: expected required(string), found number");
    }

    #[test]
    fn nested_lookup_builds_full_path() {
        let obj = sample().as_object().unwrap().clone();
        let err = obj
            .require_array("tags")
            .unwrap()
            .require_string_at(1)
            .map_err(|e| e.prefix_path("tags"))
            .unwrap_err();
        assert_eq!(err.to_string(), "tags[1]: expected required(string), found number");
    }

    #[test]
    fn to_int64_truncates_toward_zero() {
        assert_eq!(Json::Double(5.0).to_int64().unwrap(), 5);
        assert_eq!(Json::Double(5.9).to_int64().unwrap(), 5);
        assert_eq!(Json::Double(-5.9).to_int64().unwrap(), -5);
    }

    #[test]
    fn to_int64_rejects_non_finite_double() {
        let err = Json::Double(f64::INFINITY).to_int64().unwrap_err();
        assert!(matches!(err, JsonError::OutOfRangeDouble { .. }));
    }

    #[test]
    fn to_int64_parses_numeric_string() {
        assert_eq!(Json::String("42".to_owned()).to_int64().unwrap(), 42);
        assert!(Json::String("nope".to_owned()).to_int64().is_err());
    }

    #[test]
    fn to_int64_falls_back_to_double_parse_on_integer_overflow() {
        // One past u64::MAX: not a valid i64 literal, but parses as a finite
        // f64 that is itself out of i64's range.
        let err = Json::String("18446744073709551616".to_owned())
            .to_int64()
            .unwrap_err();
        assert!(matches!(err, JsonError::OutOfRangeDouble { .. }));
    }

    #[test]
    fn to_int_range_checks_into_i32() {
        assert_eq!(Json::Int64(5).to_int().unwrap(), 5);
        let err = Json::Int64(i64::from(i32::MAX) + 1).to_int().unwrap_err();
        assert!(matches!(err, JsonError::OutOfRangeInt64 { .. }));
    }

    #[test]
    fn to_string_value_formats_numbers_bools_and_null() {
        assert_eq!(Json::Int64(7).to_string_value().unwrap(), "7");
        assert_eq!(Json::Bool(true).to_string_value().unwrap(), "true");
        assert_eq!(Json::Null.to_string_value().unwrap(), "null");
        assert!(Json::Object(JsonObject::new()).to_string_value().is_err());
    }

    #[test]
    fn optional_to_string_value_maps_null_to_none() {
        assert_eq!(Json::Null.optional_to_string_value().unwrap(), None);
        assert_eq!(
            Json::Int64(7).optional_to_string_value().unwrap(),
            Some("7".to_owned())
        );
    }

    #[test]
    fn optional_to_int64_maps_null_to_none() {
        assert_eq!(Json::Null.optional_to_int64().unwrap(), None);
        assert_eq!(Json::Int64(7).optional_to_int64().unwrap(), Some(7));
    }

    #[test]
    fn container_to_family_coerces_through_key_and_index() {
        let obj = sample().as_object().unwrap().clone();
        assert_eq!(obj.to_string("age").unwrap(), "30");
        assert_eq!(obj.optional_to_int64("missing").unwrap(), None);

        let tags = obj.require_array("tags").unwrap();
        assert_eq!(tags.to_string_at(1).unwrap(), "2");
        let err = tags.to_int64_at(0).unwrap_err();
        assert_eq!(err.to_string(), "[0]: expected required(number), found string");
    }

    #[test]
    fn map_array_prefixes_index_on_error() {
        let items = vec![Json::Int64(1), Json::String("x".to_owned())];
        let err = map_array(&items, |v| v.require_int64()).unwrap_err();
        assert_eq!(err.to_string(), "[1]: expected required(number), found string");
    }

    #[test]
    fn flat_map_sequence_array_is_lazy_and_prefixes_index_on_error() {
        let items = vec![
            Json::Array(vec![Json::Int64(1), Json::Int64(2)]),
            Json::String("not an array".to_owned()),
        ];
        let results: Vec<_> =
            flat_map_sequence_array(&items, |v| v.require_array().map(|a| a.clone())).collect();
        assert_eq!(results[0].as_ref().unwrap(), &Json::Int64(1));
        assert_eq!(results[1].as_ref().unwrap(), &Json::Int64(2));
        let err = results[2].as_ref().unwrap_err();
        assert_eq!(err.to_string(), "[1]: expected required(array), found string");
    }
}
