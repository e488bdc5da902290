//! Validators applied to coerced field values.
//!
//! A validator is a stateless rule object checking one typed value. Fields
//! run their attached validators in order after type coercion; the first
//! failure aborts validation of that value.

use forma_core::ValidationError;

use crate::value::CoercedValue;

/// A rule checking one coerced value.
///
/// Validators are pure functions of their captured state plus the input:
/// they never mutate, and are safe to share and reapply.
pub trait Validator: Send + Sync {
    /// Checks the value, failing with a descriptive error.
    fn validate(&self, value: &CoercedValue) -> Result<(), ValidationError>;
}

/// A single allowed string choice: submitted value plus display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringChoice {
    /// The value matched against submissions.
    pub value: String,
    /// The label shown in rendered widgets.
    pub label: String,
}

impl StringChoice {
    /// Creates a choice from a value and its display label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A single allowed integer choice: submitted value plus display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Int64Choice {
    /// The value matched against submissions.
    pub value: i64,
    /// The label shown in rendered widgets.
    pub label: String,
}

impl Int64Choice {
    /// Creates a choice from a value and its display label.
    pub fn new(value: i64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Checks that a string value is a member of a fixed choice set.
#[derive(Debug, Clone)]
pub struct StringChoicesValidator {
    choices: Vec<StringChoice>,
}

impl StringChoicesValidator {
    /// Creates a validator over the given choices.
    pub fn new(choices: Vec<StringChoice>) -> Self {
        Self { choices }
    }
}

impl Validator for StringChoicesValidator {
    fn validate(&self, value: &CoercedValue) -> Result<(), ValidationError> {
        let CoercedValue::Str(value) = value else {
            return Err(ValidationError::unsupported(value.type_name()));
        };
        if self.choices.iter().any(|c| c.value == *value) {
            Ok(())
        } else {
            Err(ValidationError::invalid_choice(value))
        }
    }
}

/// Checks that an integer value is a member of a fixed choice set.
#[derive(Debug, Clone)]
pub struct Int64ChoicesValidator {
    choices: Vec<Int64Choice>,
}

impl Int64ChoicesValidator {
    /// Creates a validator over the given choices.
    pub fn new(choices: Vec<Int64Choice>) -> Self {
        Self { choices }
    }
}

impl Validator for Int64ChoicesValidator {
    fn validate(&self, value: &CoercedValue) -> Result<(), ValidationError> {
        let CoercedValue::Int(value) = value else {
            return Err(ValidationError::unsupported(value.type_name()));
        };
        if self.choices.iter().any(|c| c.value == *value) {
            Ok(())
        } else {
            Err(ValidationError::invalid_choice(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forma_core::ErrorKind;

    #[test]
    fn test_string_choices_member() {
        let v = StringChoicesValidator::new(vec![StringChoice::new("foo", "bar")]);
        assert!(v.validate(&CoercedValue::Str("foo".into())).is_ok());
    }

    #[test]
    fn test_string_choices_non_member() {
        let v = StringChoicesValidator::new(vec![StringChoice::new("foo", "bar")]);
        let err = v.validate(&CoercedValue::Str("x".into())).unwrap_err();
        assert_eq!(err.to_string(), "x is invalid choice");
        assert_eq!(err.kind, ErrorKind::InvalidChoice);
    }

    #[test]
    fn test_string_choices_wrong_type() {
        let v = StringChoicesValidator::new(vec![StringChoice::new("foo", "bar")]);
        let err = v.validate(&CoercedValue::Int(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unsupported);
    }

    #[test]
    fn test_int64_choices() {
        let v = Int64ChoicesValidator::new(vec![
            Int64Choice::new(1, "bar"),
            Int64Choice::new(2, "Golang"),
        ]);
        assert!(v.validate(&CoercedValue::Int(1)).is_ok());
        let err = v.validate(&CoercedValue::Int(0)).unwrap_err();
        assert_eq!(err.to_string(), "0 is invalid choice");
    }

    #[test]
    fn test_validator_is_reusable() {
        let v = StringChoicesValidator::new(vec![StringChoice::new("a", "A")]);
        for _ in 0..3 {
            assert!(v.validate(&CoercedValue::Str("a".into())).is_ok());
            assert!(v.validate(&CoercedValue::Str("b".into())).is_err());
        }
    }
}
