//! # forma
//!
//! Declarative form definition, binding, validation, and HTML rendering
//! for Rust.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. You can depend on `forma` to get the whole library, or depend
//! on the individual crates for finer-grained control.

/// Core error types, logging helpers, and utilities.
pub use forma_core as core;

/// The form engine: fields, widgets, validators, and the binding pipeline.
pub use forma_forms as forms;

// Third-party re-exports for user convenience.
pub use serde_json;
pub use tracing;

// Re-export the types almost every user touches.
pub use forma_core::{ErrorKind, FormError, FormResult, ValidationError};
pub use forma_forms::{
    BaseForm, BoolField, FieldRegistry, FieldSpec, FileField, Form, FormBinder, FormData,
    FormField, FormSpec, Int64Choice, Int64ChoiceField, Int64Field, MultiInt64ChoiceField,
    MultiStringChoiceField, MultipartData, RawValue, StringChoice, StringChoiceField, StringField,
    TextareaStringField, UploadedFile,
};
