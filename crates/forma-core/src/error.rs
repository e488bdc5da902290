//! Error types for the forma form library.
//!
//! Two kinds of failure exist and they never mix:
//!
//! - [`ValidationError`] is plain data describing bad user input. It is
//!   recorded on the failing field and aggregated into the owning form's
//!   error map; it is never propagated as a fault.
//! - [`FormError`] is a caller-contract violation (a wiring bug, not bad
//!   input): an unregistered field type, a constructor producing the wrong
//!   concrete type, or a value lookup mismatched to a field's transport
//!   kind. Binder entry points return it as `Err` and abort the pass.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Classifies a [`ValidationError`] for programmatic consumption.
///
/// The rendering layer can branch on the kind (e.g. highlight missing
/// required fields differently from format errors) without parsing the
/// human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field received no value.
    Required,
    /// The value could not be coerced to the field's type (e.g. non-numeric
    /// text for an integer field).
    Invalid,
    /// The coerced value is not a member of the field's configured choices.
    InvalidChoice,
    /// The raw value had a shape the field cannot accept at all (e.g. a
    /// plain string handed to a file field).
    Unsupported,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Required => "required",
            Self::Invalid => "invalid",
            Self::InvalidChoice => "invalid_choice",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{name}")
    }
}

/// A field-level validation failure.
///
/// Carries the user-visible message plus an [`ErrorKind`] so the rendering
/// layer can consume the failure programmatically.
///
/// # Examples
///
/// ```
/// use forma_core::error::{ErrorKind, ValidationError};
///
/// let err = ValidationError::required();
/// assert_eq!(err.kind, ErrorKind::Required);
/// assert_eq!(err.to_string(), "This field is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The user-visible message.
    pub message: String,
    /// The failure classification.
    pub kind: ErrorKind,
}

impl ValidationError {
    /// Creates a validation error with an explicit message and kind.
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// The canonical required-but-absent error.
    pub fn required() -> Self {
        Self::new("This field is required", ErrorKind::Required)
    }

    /// A type/format coercion failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::Invalid)
    }

    /// The canonical choice-membership failure for `value`.
    pub fn invalid_choice(value: impl fmt::Display) -> Self {
        Self::new(format!("{value} is invalid choice"), ErrorKind::InvalidChoice)
    }

    /// A wrong-shape failure for a raw value the field cannot accept.
    pub fn unsupported(what: impl fmt::Display) -> Self {
        Self::new(format!("{what} is not supported"), ErrorKind::Unsupported)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A fatal, non-recoverable programming error in form wiring.
///
/// These are never absorbed into a form's error map: they indicate a bug in
/// the caller's setup, and the binding pass aborts loudly instead.
#[derive(Error, Debug)]
pub enum FormError {
    /// A form member's field type has no registered constructor.
    #[error("no constructor registered for field type `{0}`")]
    UnregisteredFieldType(&'static str),

    /// A registered constructor produced a value of the wrong concrete type.
    #[error("constructor for field type `{0}` produced a mismatched value")]
    ConstructorMismatch(&'static str),

    /// A value-lookup strategy was used against a field of the wrong
    /// transport kind (e.g. form-encoded lookup for a file field).
    #[error(
        "field `{field}` has {expected} transport but was bound through a {got} lookup"
    )]
    TransportMismatch {
        /// The offending field's name.
        field: String,
        /// The transport the field declares.
        expected: &'static str,
        /// The transport the lookup supplies.
        got: &'static str,
    },
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_error() {
        let err = ValidationError::required();
        assert_eq!(err.to_string(), "This field is required");
        assert_eq!(err.kind, ErrorKind::Required);
    }

    #[test]
    fn test_invalid_choice_message() {
        assert_eq!(
            ValidationError::invalid_choice("x").to_string(),
            "x is invalid choice"
        );
        assert_eq!(
            ValidationError::invalid_choice(0).to_string(),
            "0 is invalid choice"
        );
    }

    #[test]
    fn test_error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::InvalidChoice).unwrap();
        assert_eq!(json, "\"invalid_choice\"");
    }

    #[test]
    fn test_validation_error_serializes() {
        let err = ValidationError::invalid("Enter a whole number");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["message"], "Enter a whole number");
        assert_eq!(json["kind"], "invalid");
    }

    #[test]
    fn test_form_error_display() {
        let err = FormError::UnregisteredFieldType("StringField");
        assert!(err.to_string().contains("StringField"));

        let err = FormError::TransportMismatch {
            field: "avatar".into(),
            expected: "multipart",
            got: "form-encoded",
        };
        assert!(err.to_string().contains("avatar"));
        assert!(err.to_string().contains("multipart"));
    }
}
