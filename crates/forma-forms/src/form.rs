//! The form aggregate and the binder/validator pipeline.
//!
//! A user form is a struct composing [`BaseForm`] (the error map) with one
//! `Option<SomeField>` member per input, described by a
//! [`FormSpec`](crate::typeinfo::FormSpec) descriptor table. The
//! [`FormBinder`] materializes unset members, feeds each field its raw
//! submitted value through a value-lookup strategy, and aggregates field
//! errors into the form.

use std::any::type_name;
use std::collections::HashMap;

use forma_core::logging::binding_span;
use forma_core::{FormError, FormResult, ValidationError};

use crate::data::{FormData, MultipartData};
use crate::fields::{is_field_valid, FormField};
use crate::typeinfo::{FieldRegistry, FormSpec, TypeInfoMap};
use crate::value::RawValue;

/// The validated aggregate: exposes the field error map of the most recent
/// binding pass.
pub trait Form {
    /// Replaces the error map wholesale. Called once per binding pass.
    fn set_errors(&mut self, errors: HashMap<String, ValidationError>);

    /// The error map of the most recent binding pass, keyed by field name.
    fn errors(&self) -> &HashMap<String, ValidationError>;
}

/// Error-map state for composing into user forms.
///
/// A fresh form has no errors until a binding pass runs; each pass
/// replaces the map in full, so a previously-invalid form becomes valid
/// again once corrected input binds cleanly.
#[derive(Debug, Clone, Default)]
pub struct BaseForm {
    errors: HashMap<String, ValidationError>,
}

impl BaseForm {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Form for BaseForm {
    fn set_errors(&mut self, errors: HashMap<String, ValidationError>) {
        self.errors = errors;
    }

    fn errors(&self) -> &HashMap<String, ValidationError> {
        &self.errors
    }
}

/// Binds submitted data to forms and runs validation.
///
/// The binder owns the [`FieldRegistry`] used to materialize unset form
/// members and the [`TypeInfoMap`] caching per-definition descriptors.
/// Build one at startup and share it by reference; all operations take
/// `&self` and are safe under concurrent use.
pub struct FormBinder {
    registry: FieldRegistry,
    tinfo: TypeInfoMap,
}

impl FormBinder {
    /// Creates a binder over a registry pre-loaded with every built-in
    /// field variant.
    pub fn new() -> Self {
        Self::with_registry(FieldRegistry::with_defaults())
    }

    /// Creates a binder over a caller-supplied registry.
    pub fn with_registry(registry: FieldRegistry) -> Self {
        Self {
            registry,
            tinfo: TypeInfoMap::new(),
        }
    }

    /// The binder's field registry.
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Prepares a form instance for binding and rendering.
    ///
    /// For each descriptor: materializes the member if unset; assigns the
    /// descriptor name and label where the instance has none; propagates
    /// the descriptor's required flag only to freshly constructed fields
    /// (explicit configuration on a pre-existing instance is never
    /// overwritten); and fills the widget's `id`/`name` attributes when
    /// absent.
    pub fn init_form<F: FormSpec + Form>(&self, form: &mut F) -> FormResult<()> {
        let tinfo = self.tinfo.type_info::<F>();
        let specs = F::field_specs();

        for info in &tinfo.fields {
            let spec = &specs[info.index];
            let (fresh, field) = spec.slot(form).materialize(&self.registry)?;

            if !field.base().has_name() {
                field.base_mut().assign_name(&info.name);
            }
            if !field.base().has_label() {
                field.base_mut().set_label(&info.label);
            }
            if fresh {
                field.base_mut().set_required(info.required);
            }

            let name = field.base().name().to_string();
            let attrs = field.base_mut().widget_mut().attrs_mut();
            if attrs.get("id").is_none() {
                attrs.set("id", &name);
            }
            if attrs.get("name").is_none() {
                attrs.set("name", &name);
            }
        }
        Ok(())
    }

    /// Runs one binding pass over a form with a caller-supplied value
    /// lookup.
    ///
    /// Unset members are skipped. Every field error is collected into a
    /// fresh map replacing the form's previous one. Returns `Ok(true)` iff
    /// the resulting map is empty; returns `Err` only for caller-contract
    /// violations surfaced by the lookup.
    pub fn is_valid<F, L>(&self, form: &mut F, mut lookup: L) -> FormResult<bool>
    where
        F: FormSpec + Form,
        L: FnMut(&dyn FormField) -> FormResult<Option<RawValue>>,
    {
        let span = binding_span(type_name::<F>());
        let _guard = span.enter();

        let tinfo = self.tinfo.type_info::<F>();
        let specs = F::field_specs();
        let mut errors = HashMap::new();

        for info in &tinfo.fields {
            let spec = &specs[info.index];
            let Some(field) = spec.slot(form).field_mut() else {
                continue;
            };

            let raw = lookup(&*field)?;
            if !is_field_valid(field, raw.as_ref()) {
                if let Some(err) = field.validation_error() {
                    errors.insert(field.name().to_string(), err.clone());
                }
            }
        }

        let valid = errors.is_empty();
        tracing::debug!(errors = errors.len(), valid, "binding pass complete");
        form.set_errors(errors);
        Ok(valid)
    }

    /// Binds a URL-encoded submission.
    ///
    /// # Errors
    ///
    /// Fails with [`FormError::TransportMismatch`] if the form contains a
    /// file-transport field; those forms bind through
    /// [`is_multipart_form_valid`](Self::is_multipart_form_valid).
    pub fn is_form_valid<F: FormSpec + Form>(
        &self,
        form: &mut F,
        data: &FormData,
    ) -> FormResult<bool> {
        self.is_valid(form, |field| {
            if field.is_multipart() {
                return Err(FormError::TransportMismatch {
                    field: field.name().to_string(),
                    expected: "multipart",
                    got: "form-encoded",
                });
            }
            if field.is_multi() {
                Ok(data
                    .get_list(field.name())
                    .map(|values| RawValue::Multi(values.clone())))
            } else {
                Ok(data.get(field.name()).map(RawValue::from))
            }
        })
    }

    /// Binds a multipart submission: ordinary values for ordinary fields,
    /// file parts for file-transport fields.
    pub fn is_multipart_form_valid<F: FormSpec + Form>(
        &self,
        form: &mut F,
        data: &MultipartData,
    ) -> FormResult<bool> {
        self.is_valid(form, |field| {
            let name = field.name();
            if field.is_multipart() {
                Ok(data.file(name).cloned().map(RawValue::File))
            } else if field.is_multi() {
                Ok(data
                    .values
                    .get_list(name)
                    .map(|values| RawValue::Multi(values.clone())))
            } else {
                Ok(data.values.get(name).map(RawValue::from))
            }
        })
    }
}

impl Default for FormBinder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::UploadedFile;
    use crate::fields::{FileField, Int64Field, StringField};
    use crate::typeinfo::FieldSpec;

    #[derive(Default)]
    struct TestForm {
        base: BaseForm,
        name: Option<StringField>,
        age: Option<Int64Field>,
    }

    impl Form for TestForm {
        fn set_errors(&mut self, errors: HashMap<String, ValidationError>) {
            self.base.set_errors(errors);
        }

        fn errors(&self) -> &HashMap<String, ValidationError> {
            self.base.errors()
        }
    }

    impl FormSpec for TestForm {
        fn field_specs() -> &'static [FieldSpec<Self>] {
            static SPECS: &[FieldSpec<TestForm>] = &[
                FieldSpec::new("Name", |f: &mut TestForm| &mut f.name).required(),
                FieldSpec::new("Age", |f: &mut TestForm| &mut f.age).required(),
            ];
            SPECS
        }
    }

    #[derive(Default)]
    struct UploadForm {
        base: BaseForm,
        title: Option<StringField>,
        attachment: Option<FileField>,
    }

    impl Form for UploadForm {
        fn set_errors(&mut self, errors: HashMap<String, ValidationError>) {
            self.base.set_errors(errors);
        }

        fn errors(&self) -> &HashMap<String, ValidationError> {
            self.base.errors()
        }
    }

    impl FormSpec for UploadForm {
        fn field_specs() -> &'static [FieldSpec<Self>] {
            static SPECS: &[FieldSpec<UploadForm>] = &[
                FieldSpec::new("Title", |f: &mut UploadForm| &mut f.title).required(),
                FieldSpec::new("Attachment", |f: &mut UploadForm| &mut f.attachment).required(),
            ];
            SPECS
        }
    }

    #[test]
    fn test_form_usage() {
        let binder = FormBinder::new();
        let mut form = TestForm::default();
        binder.init_form(&mut form).unwrap();

        let data = FormData::parse("Name=foo&Age=23");
        assert!(binder.is_form_valid(&mut form, &data).unwrap());

        let name = form.name.as_ref().unwrap();
        assert_eq!(name.value(), Some("foo"));
        assert_eq!(
            name.render(&[]),
            r#"<input type="text" id="Name" name="Name" value="foo" />"#
        );

        let age = form.age.as_ref().unwrap();
        assert_eq!(age.value(), Some(23));
        assert_eq!(
            age.render(&[]),
            r#"<input type="text" id="Age" name="Age" value="23" />"#
        );
    }

    #[test]
    fn test_errors_replaced_across_passes() {
        let binder = FormBinder::new();
        let mut form = TestForm::default();
        binder.init_form(&mut form).unwrap();

        let data = FormData::parse("Name=foo&Age=abc");
        assert!(!binder.is_form_valid(&mut form, &data).unwrap());
        assert_eq!(form.errors().len(), 1);
        assert!(form.errors().contains_key("Age"));

        let data = FormData::parse("Name=foo&Age=23");
        assert!(binder.is_form_valid(&mut form, &data).unwrap());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_missing_required_fields_reported() {
        let binder = FormBinder::new();
        let mut form = TestForm::default();
        binder.init_form(&mut form).unwrap();

        let data = FormData::parse("");
        assert!(!binder.is_form_valid(&mut form, &data).unwrap());
        assert!(form.errors().contains_key("Name"));
        assert!(form.errors().contains_key("Age"));
        assert_eq!(
            form.errors()["Name"].to_string(),
            "This field is required"
        );
    }

    #[test]
    fn test_unset_members_are_skipped() {
        let binder = FormBinder::new();
        let mut form = TestForm::default();
        // No init_form: members stay unset, so nothing binds and nothing
        // errors.
        let data = FormData::parse("");
        assert!(binder.is_form_valid(&mut form, &data).unwrap());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_init_form_respects_preset_configuration() {
        let binder = FormBinder::new();
        let mut form = TestForm::default();

        let mut name = StringField::new();
        name.set_name("custom");
        name.set_label("Custom label");
        name.base_mut().set_required(false);
        form.name = Some(name);

        binder.init_form(&mut form).unwrap();

        let name = form.name.as_ref().unwrap();
        assert_eq!(name.name(), "custom");
        assert_eq!(name.label(), "Custom label");
        // The descriptor marks Name required, but the preset instance keeps
        // its explicit configuration.
        assert!(!name.is_required());

        // The freshly constructed member picks everything up from the
        // descriptor.
        let age = form.age.as_ref().unwrap();
        assert_eq!(age.name(), "Age");
        assert!(age.is_required());
    }

    #[test]
    fn test_init_form_is_idempotent() {
        let binder = FormBinder::new();
        let mut form = TestForm::default();
        binder.init_form(&mut form).unwrap();
        let render_once = form.name.as_ref().unwrap().render(&[]);
        binder.init_form(&mut form).unwrap();
        let render_twice = form.name.as_ref().unwrap().render(&[]);
        assert_eq!(render_once, render_twice);
    }

    #[test]
    fn test_unregistered_field_type_fails_loudly() {
        let binder = FormBinder::with_registry(FieldRegistry::new());
        let mut form = TestForm::default();
        let err = binder.init_form(&mut form).unwrap_err();
        assert!(matches!(err, FormError::UnregisteredFieldType(_)));
    }

    #[test]
    fn test_form_lookup_rejects_multipart_fields() {
        let binder = FormBinder::new();
        let mut form = UploadForm::default();
        binder.init_form(&mut form).unwrap();

        let data = FormData::parse("Title=hello");
        let err = binder.is_form_valid(&mut form, &data).unwrap_err();
        assert!(matches!(
            err,
            FormError::TransportMismatch { expected: "multipart", .. }
        ));
    }

    #[test]
    fn test_multipart_form_binds_values_and_files() {
        let binder = FormBinder::new();
        let mut form = UploadForm::default();
        binder.init_form(&mut form).unwrap();

        let mut data = MultipartData::new();
        data.values.set("Title", "report");
        data.add_file(
            "Attachment",
            UploadedFile::new("report.pdf", "application/pdf", vec![1, 2, 3]),
        );

        assert!(binder.is_multipart_form_valid(&mut form, &data).unwrap());
        assert_eq!(form.title.as_ref().unwrap().value(), Some("report"));
        assert_eq!(
            form.attachment.as_ref().unwrap().value().map(|f| f.name.as_str()),
            Some("report.pdf")
        );
    }

    #[test]
    fn test_multipart_form_missing_file_is_required_error() {
        let binder = FormBinder::new();
        let mut form = UploadForm::default();
        binder.init_form(&mut form).unwrap();

        let mut data = MultipartData::new();
        data.values.set("Title", "report");

        assert!(!binder.is_multipart_form_valid(&mut form, &data).unwrap());
        assert!(form.errors().contains_key("Attachment"));
    }

    #[test]
    fn test_custom_lookup_strategy() {
        let binder = FormBinder::new();
        let mut form = TestForm::default();
        binder.init_form(&mut form).unwrap();

        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        map.insert("Name".to_string(), vec!["foo".to_string()]);
        map.insert("Age".to_string(), vec!["23".to_string()]);

        let valid = binder
            .is_valid(&mut form, |field| {
                Ok(map
                    .get(field.name())
                    .and_then(|values| values.first())
                    .map(|v| RawValue::from(v.as_str())))
            })
            .unwrap();
        assert!(valid);
        assert_eq!(form.name.as_ref().unwrap().value(), Some("foo"));
        assert_eq!(form.age.as_ref().unwrap().value(), Some(23));
    }
}
