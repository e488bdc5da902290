//! # forma-forms
//!
//! Declarative form definition, binding, validation, and HTML rendering.
//! A form is a struct whose members are field slots; the engine
//! materializes unset fields from a registry, binds submitted values with
//! per-type validation, aggregates field errors into form-level validity,
//! and renders each field as an HTML control through its widget.
//!
//! ## Modules
//!
//! - [`attrs`] - Ordered HTML attribute sets
//! - [`widgets`] - Widget variants rendering fields as HTML fragments
//! - [`fields`] - Field variants and the shared binding/validation contract
//! - [`validators`] - Composable value checks (choice membership)
//! - [`typeinfo`] - Field-type registry and cached form introspection
//! - [`form`] - The form aggregate and the binder pipeline
//! - [`data`] - Submitted-value containers (`FormData`, `MultipartData`)
//! - [`helpers`] - Error/label/hidden-field rendering helpers
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use forma_core::ValidationError;
//! use forma_forms::data::FormData;
//! use forma_forms::fields::{Int64Field, StringField};
//! use forma_forms::form::{BaseForm, Form, FormBinder};
//! use forma_forms::typeinfo::{FieldSpec, FormSpec};
//!
//! #[derive(Default)]
//! struct SignupForm {
//!     base: BaseForm,
//!     username: Option<StringField>,
//!     age: Option<Int64Field>,
//! }
//!
//! impl Form for SignupForm {
//!     fn set_errors(&mut self, errors: HashMap<String, ValidationError>) {
//!         self.base.set_errors(errors);
//!     }
//!
//!     fn errors(&self) -> &HashMap<String, ValidationError> {
//!         self.base.errors()
//!     }
//! }
//!
//! impl FormSpec for SignupForm {
//!     fn field_specs() -> &'static [FieldSpec<Self>] {
//!         static SPECS: &[FieldSpec<SignupForm>] = &[
//!             FieldSpec::new("Username", |f| &mut f.username).required(),
//!             FieldSpec::new("Age", |f| &mut f.age),
//!         ];
//!         SPECS
//!     }
//! }
//!
//! let binder = FormBinder::new();
//! let mut form = SignupForm::default();
//! binder.init_form(&mut form)?;
//!
//! let data = FormData::parse("Username=alice&Age=30");
//! assert!(binder.is_form_valid(&mut form, &data)?);
//! assert_eq!(form.username.as_ref().unwrap().value(), Some("alice"));
//! assert_eq!(form.age.as_ref().unwrap().value(), Some(30));
//! # Ok::<(), forma_core::FormError>(())
//! ```

pub mod attrs;
pub mod data;
pub mod fields;
pub mod form;
pub mod helpers;
pub mod typeinfo;
pub mod validators;
pub mod value;
pub mod widgets;

// Re-export the most commonly used types at the crate root.
pub use data::{FormData, MultipartData, UploadedFile};
pub use fields::{
    is_field_valid, BoolField, FileField, FormField, Int64ChoiceField, Int64Field,
    MultiInt64ChoiceField, MultiStringChoiceField, StringChoiceField, StringField,
    TextareaStringField,
};
pub use form::{BaseForm, Form, FormBinder};
pub use typeinfo::{FieldRegistry, FieldSpec, FormSpec};
pub use validators::{Int64Choice, StringChoice, Validator};
pub use value::RawValue;
