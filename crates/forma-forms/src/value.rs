//! Closed value variants for raw submitted data and coerced results.
//!
//! [`RawValue`] is the shape a value-lookup strategy hands to a field;
//! [`CoercedValue`] is the typed result a field stores after successful
//! validation. Both are small tagged unions covering exactly the coercion
//! targets the field variants support.

use crate::data::UploadedFile;

/// A raw submitted value, before any coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// A single submitted string.
    Single(String),
    /// An ordered sequence of submitted strings (multi-value fields).
    Multi(Vec<String>),
    /// An uploaded-file handle (file-transport fields).
    File(UploadedFile),
}

impl RawValue {
    /// Builds a `Multi` value from anything yielding strings.
    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multi(values.into_iter().map(Into::into).collect())
    }

    /// Whether the value is structurally empty.
    ///
    /// An empty string and an empty sequence are empty; a file handle
    /// never is.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::Multi(v) => v.is_empty(),
            Self::File(_) => false,
        }
    }

    /// The single submitted string, if this is a `Single` value.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            _ => None,
        }
    }

    /// A short human-readable name for the value's shape, for error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Single(_) => "string value",
            Self::Multi(_) => "value list",
            Self::File(_) => "file value",
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        Self::Single(n.to_string())
    }
}

impl From<UploadedFile> for RawValue {
    fn from(f: UploadedFile) -> Self {
        Self::File(f)
    }
}

/// A typed value a field has coerced and stored after validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    /// A string.
    Str(String),
    /// A 64-bit signed integer.
    Int(i64),
    /// A boolean.
    Bool(bool),
    /// An ordered sequence of strings.
    StrList(Vec<String>),
    /// An ordered sequence of 64-bit signed integers.
    IntList(Vec<i64>),
    /// An uploaded-file handle.
    File(UploadedFile),
}

impl CoercedValue {
    /// A short human-readable name for the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "int64",
            Self::Bool(_) => "bool",
            Self::StrList(_) => "string list",
            Self::IntList(_) => "int64 list",
            Self::File(_) => "file",
        }
    }

    /// The string forms of the value, one entry per contained scalar.
    ///
    /// Scalars yield one entry; sequences yield one per element; files
    /// yield nothing (file widgets never reflect a value).
    pub fn string_values(&self) -> Vec<String> {
        match self {
            Self::Str(s) => vec![s.clone()],
            Self::Int(n) => vec![n.to_string()],
            Self::Bool(b) => vec![b.to_string()],
            Self::StrList(v) => v.clone(),
            Self::IntList(v) => v.iter().map(ToString::to_string).collect(),
            Self::File(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_emptiness() {
        assert!(RawValue::Single(String::new()).is_empty());
        assert!(!RawValue::from("x").is_empty());
        assert!(RawValue::Multi(vec![]).is_empty());
        assert!(!RawValue::multi(["a"]).is_empty());
        assert!(!RawValue::File(UploadedFile::new("f", "text/plain", vec![])).is_empty());
    }

    #[test]
    fn test_raw_value_from_int() {
        assert_eq!(RawValue::from(23), RawValue::Single("23".to_string()));
    }

    #[test]
    fn test_coerced_string_values() {
        assert_eq!(CoercedValue::Str("a".into()).string_values(), vec!["a"]);
        assert_eq!(CoercedValue::Int(7).string_values(), vec!["7"]);
        assert_eq!(CoercedValue::Bool(true).string_values(), vec!["true"]);
        assert_eq!(
            CoercedValue::IntList(vec![1, 2]).string_values(),
            vec!["1", "2"]
        );
        let file = CoercedValue::File(UploadedFile::new("f", "text/plain", vec![]));
        assert!(file.string_values().is_empty());
    }
}
