//! Field variants and the shared binding/validation contract.
//!
//! A field pairs identity (name, label) and flags (required, multi-value,
//! file transport) with a widget and a validation rule. All variants compose
//! [`BaseField`] by value and implement [`FormField`]; the shared binding
//! algorithm lives in [`is_field_valid`].

use std::fmt;

use forma_core::ValidationError;

use crate::data::UploadedFile;
use crate::validators::{
    Int64Choice, Int64ChoicesValidator, StringChoice, StringChoicesValidator, Validator,
};
use crate::value::{CoercedValue, RawValue};
use crate::widgets::{
    CheckboxWidget, FileWidget, RadioWidget, SelectWidget, TextWidget, TextareaWidget, Widget,
};

/// A typed, validated, renderable unit bound to one named slot of a form.
///
/// Variants implement [`validate`](FormField::validate) for their coercion
/// rule and inherit everything else from the composed [`BaseField`].
pub trait FormField: Send {
    /// The composed base state.
    fn base(&self) -> &BaseField;

    /// Mutable access to the composed base state.
    fn base_mut(&mut self) -> &mut BaseField;

    /// Coerces and checks a non-empty raw value, storing the typed result
    /// on success. Callers go through [`is_field_valid`], which handles
    /// reset and the required/empty rules first.
    fn validate(&mut self, raw: &RawValue) -> Result<(), ValidationError>;

    /// The field's name ("" until assigned).
    fn name(&self) -> &str {
        self.base().name()
    }

    /// Sets the name, synchronizing the widget's `id`/`name` attributes.
    fn set_name(&mut self, name: &str) {
        self.base_mut().set_name(name);
    }

    /// The field's human-readable label ("" until assigned).
    fn label(&self) -> &str {
        self.base().label()
    }

    /// Sets the label.
    fn set_label(&mut self, label: &str) {
        self.base_mut().set_label(label);
    }

    /// Whether an empty submission is a validation error.
    fn is_required(&self) -> bool {
        self.base().is_required()
    }

    /// Whether the field binds a sequence of values.
    fn is_multi(&self) -> bool {
        self.base().is_multi()
    }

    /// Whether the field's raw value arrives as a file/blob payload.
    fn is_multipart(&self) -> bool {
        self.base().is_multipart()
    }

    /// The error recorded by the most recent failed binding, if any.
    fn validation_error(&self) -> Option<&ValidationError> {
        self.base().validation_error()
    }

    /// Clears the bound value and any recorded error.
    fn reset(&mut self) {
        self.base_mut().reset();
    }

    /// The string form(s) of the current value, for rendering.
    fn string_values(&self) -> Vec<String> {
        self.base().string_values()
    }

    /// Renders the field through its widget with extra HTML attributes.
    fn render(&self, extra: &[(&str, &str)]) -> String {
        self.base().widget().render(extra, &self.string_values())
    }
}

/// Runs the binding/validation algorithm shared by every field variant.
///
/// 1. Reset the field's prior bound value and prior error.
/// 2. An absent or structurally empty value is an error only for required
///    fields; optional fields report valid with nothing bound.
/// 3. Otherwise the variant's own `validate` coerces and stores the value,
///    or its error is recorded on the field.
///
/// Returns `true` iff the field bound cleanly.
pub fn is_field_valid(field: &mut dyn FormField, raw: Option<&RawValue>) -> bool {
    field.reset();

    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        if field.is_required() {
            field
                .base_mut()
                .set_validation_error(ValidationError::required());
            return false;
        }
        return true;
    };

    if let Err(err) = field.validate(raw) {
        tracing::debug!(field = field.name(), error = %err, "field failed validation");
        field.base_mut().set_validation_error(err);
        return false;
    }
    true
}

/// State common to every field variant, composed by value.
pub struct BaseField {
    name: Option<String>,
    label: Option<String>,
    widget: Box<dyn Widget>,
    is_multi: bool,
    is_multipart: bool,
    is_required: bool,
    validators: Vec<Box<dyn Validator>>,
    value: Option<CoercedValue>,
    validation_error: Option<ValidationError>,
}

impl BaseField {
    /// Creates base state around a widget. Fields start out required.
    pub fn new(widget: Box<dyn Widget>) -> Self {
        Self {
            name: None,
            label: None,
            widget,
            is_multi: false,
            is_multipart: false,
            is_required: true,
            validators: Vec::new(),
            value: None,
            validation_error: None,
        }
    }

    /// Whether a name has been assigned.
    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// The assigned name, or "".
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Assigns the name and overwrites the widget's `id`/`name` attributes.
    pub fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
        let attrs = self.widget.attrs_mut();
        attrs.set("id", name);
        attrs.set("name", name);
    }

    // The binder assigns names without touching widget attributes; it
    // synchronizes attributes separately, filling only absent ones.
    pub(crate) fn assign_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Whether a label has been assigned.
    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }

    /// The assigned label, or "".
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    /// Assigns the label.
    pub fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_string());
    }

    /// The attached widget.
    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    /// Mutable access to the attached widget.
    pub fn widget_mut(&mut self) -> &mut dyn Widget {
        self.widget.as_mut()
    }

    /// Replaces the attached widget.
    pub fn set_widget(&mut self, widget: Box<dyn Widget>) {
        self.widget = widget;
    }

    /// Whether an empty submission is a validation error.
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Sets the required flag.
    pub fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }

    /// Whether the field binds a sequence of values.
    pub fn is_multi(&self) -> bool {
        self.is_multi
    }

    /// Whether the field's raw value arrives as a file/blob payload.
    pub fn is_multipart(&self) -> bool {
        self.is_multipart
    }

    /// Attaches a validator; validators run in attachment order.
    pub fn add_validator(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    /// Runs every attached validator against one coerced value, stopping at
    /// the first failure.
    pub fn apply_validators(&self, value: &CoercedValue) -> Result<(), ValidationError> {
        for validator in &self.validators {
            validator.validate(value)?;
        }
        Ok(())
    }

    /// The bound value from the most recent successful binding, if any.
    pub fn value(&self) -> Option<&CoercedValue> {
        self.value.as_ref()
    }

    /// Stores a bound value.
    pub fn set_value(&mut self, value: CoercedValue) {
        self.value = Some(value);
    }

    /// The error recorded by the most recent failed binding, if any.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    /// Records a validation error.
    pub fn set_validation_error(&mut self, err: ValidationError) {
        self.validation_error = Some(err);
    }

    /// Clears the bound value and any recorded error.
    pub fn reset(&mut self) {
        self.value = None;
        self.validation_error = None;
    }

    /// String form(s) of the current value for rendering: single-value
    /// fields render "" when unset, sequence and file fields render nothing.
    pub fn string_values(&self) -> Vec<String> {
        match &self.value {
            Some(value) => value.string_values(),
            None if self.is_multi || self.is_multipart => Vec::new(),
            None => vec![String::new()],
        }
    }
}

impl fmt::Debug for BaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseField")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("required", &self.is_required)
            .field("multi", &self.is_multi)
            .field("multipart", &self.is_multipart)
            .field("value", &self.value)
            .field("error", &self.validation_error)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// String fields
// ---------------------------------------------------------------------------

/// A single-line string field rendered as a text input.
#[derive(Debug)]
pub struct StringField {
    base: BaseField,
    /// Minimum accepted length, if configured.
    pub min_len: Option<usize>,
    /// Maximum accepted length, if configured.
    pub max_len: Option<usize>,
}

impl StringField {
    /// Creates a required string field with a text widget.
    pub fn new() -> Self {
        Self {
            base: BaseField::new(Box::new(TextWidget::new())),
            min_len: None,
            max_len: None,
        }
    }

    /// The bound string, if one was stored.
    pub fn value(&self) -> Option<&str> {
        match self.base.value() {
            Some(CoercedValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Pre-populates the field, as when editing an existing record.
    pub fn set_initial(&mut self, initial: impl Into<String>) {
        self.base.set_value(CoercedValue::Str(initial.into()));
    }
}

impl Default for StringField {
    fn default() -> Self {
        Self::new()
    }
}

impl FormField for StringField {
    fn base(&self) -> &BaseField {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseField {
        &mut self.base
    }

    fn validate(&mut self, raw: &RawValue) -> Result<(), ValidationError> {
        let Some(value) = raw.as_single() else {
            return Err(ValidationError::unsupported(raw.shape_name()));
        };

        let len = value.len();
        if let Some(min) = self.min_len {
            if len < min {
                return Err(ValidationError::invalid(format!(
                    "This field should have at least {min} symbols"
                )));
            }
        }
        if let Some(max) = self.max_len {
            if len > max {
                return Err(ValidationError::invalid(format!(
                    "This field should have less than {max} symbols"
                )));
            }
        }

        let value = CoercedValue::Str(value.to_string());
        self.base.apply_validators(&value)?;
        self.base.set_value(value);
        Ok(())
    }
}

/// A multi-line string field rendered as a textarea.
#[derive(Debug)]
pub struct TextareaStringField {
    inner: StringField,
}

impl TextareaStringField {
    /// Creates a required string field with a textarea widget.
    pub fn new() -> Self {
        let mut inner = StringField::new();
        inner.base.set_widget(Box::new(TextareaWidget::new()));
        Self { inner }
    }

    /// The bound string, if one was stored.
    pub fn value(&self) -> Option<&str> {
        self.inner.value()
    }

    /// Pre-populates the field.
    pub fn set_initial(&mut self, initial: impl Into<String>) {
        self.inner.set_initial(initial);
    }
}

impl Default for TextareaStringField {
    fn default() -> Self {
        Self::new()
    }
}

impl FormField for TextareaStringField {
    fn base(&self) -> &BaseField {
        &self.inner.base
    }

    fn base_mut(&mut self) -> &mut BaseField {
        &mut self.inner.base
    }

    fn validate(&mut self, raw: &RawValue) -> Result<(), ValidationError> {
        self.inner.validate(raw)
    }
}

/// A string field restricted to a configured choice set.
#[derive(Debug)]
pub struct StringChoiceField {
    inner: StringField,
}

impl StringChoiceField {
    /// Creates a choice field rendered as a select box.
    pub fn select() -> Self {
        let mut inner = StringField::new();
        inner.base.set_widget(Box::new(SelectWidget::new()));
        Self { inner }
    }

    /// Creates a choice field rendered as a group of radio inputs.
    pub fn radio() -> Self {
        let mut inner = StringField::new();
        inner.base.set_widget(Box::new(RadioWidget::new()));
        Self { inner }
    }

    /// Configures the allowed choices on both the widget and the
    /// membership validator.
    pub fn set_choices(&mut self, choices: Vec<StringChoice>) {
        let pairs = choices
            .iter()
            .map(|c| (c.value.clone(), c.label.clone()))
            .collect();
        self.inner
            .base
            .widget_mut()
            .as_choice_mut()
            .expect("choice field requires a choice widget")
            .set_choices(pairs);
        self.inner
            .base
            .add_validator(Box::new(StringChoicesValidator::new(choices)));
    }

    /// The bound string, if one was stored.
    pub fn value(&self) -> Option<&str> {
        self.inner.value()
    }

    /// Pre-populates the field.
    pub fn set_initial(&mut self, initial: impl Into<String>) {
        self.inner.set_initial(initial);
    }

    /// Per-option radio fragments, with the current value marked checked.
    ///
    /// Only meaningful for fields constructed with [`radio`](Self::radio).
    pub fn radios(&self, extra: &[(&str, &str)]) -> Vec<String> {
        let checked = self.value().unwrap_or("").to_string();
        self.inner
            .base
            .widget()
            .as_radio()
            .expect("radio rendering requires a radio widget")
            .radios(extra, &checked)
    }
}

impl FormField for StringChoiceField {
    fn base(&self) -> &BaseField {
        &self.inner.base
    }

    fn base_mut(&mut self) -> &mut BaseField {
        &mut self.inner.base
    }

    fn validate(&mut self, raw: &RawValue) -> Result<(), ValidationError> {
        self.inner.validate(raw)
    }
}

// ---------------------------------------------------------------------------
// Integer fields
// ---------------------------------------------------------------------------

/// A 64-bit signed integer field.
#[derive(Debug)]
pub struct Int64Field {
    base: BaseField,
}

impl Int64Field {
    /// Creates a required integer field with a text widget.
    pub fn new() -> Self {
        Self {
            base: BaseField::new(Box::new(TextWidget::new())),
        }
    }

    /// The bound integer, if one was stored.
    pub fn value(&self) -> Option<i64> {
        match self.base.value() {
            Some(CoercedValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Pre-populates the field.
    pub fn set_initial(&mut self, initial: i64) {
        self.base.set_value(CoercedValue::Int(initial));
    }
}

impl Default for Int64Field {
    fn default() -> Self {
        Self::new()
    }
}

impl FormField for Int64Field {
    fn base(&self) -> &BaseField {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseField {
        &mut self.base
    }

    fn validate(&mut self, raw: &RawValue) -> Result<(), ValidationError> {
        let Some(value) = raw.as_single() else {
            return Err(ValidationError::unsupported(raw.shape_name()));
        };
        let value: i64 = value
            .parse()
            .map_err(|_| ValidationError::invalid("Enter a whole number"))?;

        let value = CoercedValue::Int(value);
        self.base.apply_validators(&value)?;
        self.base.set_value(value);
        Ok(())
    }
}

/// An integer field restricted to a configured choice set.
#[derive(Debug)]
pub struct Int64ChoiceField {
    inner: Int64Field,
}

impl Int64ChoiceField {
    /// Creates a choice field rendered as a select box.
    pub fn select() -> Self {
        let mut inner = Int64Field::new();
        inner.base.set_widget(Box::new(SelectWidget::new()));
        Self { inner }
    }

    /// Creates a choice field rendered as a group of radio inputs.
    pub fn radio() -> Self {
        let mut inner = Int64Field::new();
        inner.base.set_widget(Box::new(RadioWidget::new()));
        Self { inner }
    }

    /// Configures the allowed choices on both the widget and the
    /// membership validator.
    pub fn set_choices(&mut self, choices: Vec<Int64Choice>) {
        let pairs = choices
            .iter()
            .map(|c| (c.value.to_string(), c.label.clone()))
            .collect();
        self.inner
            .base
            .widget_mut()
            .as_choice_mut()
            .expect("choice field requires a choice widget")
            .set_choices(pairs);
        self.inner
            .base
            .add_validator(Box::new(Int64ChoicesValidator::new(choices)));
    }

    /// The bound integer, if one was stored.
    pub fn value(&self) -> Option<i64> {
        self.inner.value()
    }

    /// Pre-populates the field.
    pub fn set_initial(&mut self, initial: i64) {
        self.inner.set_initial(initial);
    }

    /// Per-option radio fragments, with the current value marked checked.
    ///
    /// Only meaningful for fields constructed with [`radio`](Self::radio).
    pub fn radios(&self, extra: &[(&str, &str)]) -> Vec<String> {
        let checked = self.value().map(|n| n.to_string()).unwrap_or_default();
        self.inner
            .base
            .widget()
            .as_radio()
            .expect("radio rendering requires a radio widget")
            .radios(extra, &checked)
    }
}

impl FormField for Int64ChoiceField {
    fn base(&self) -> &BaseField {
        &self.inner.base
    }

    fn base_mut(&mut self) -> &mut BaseField {
        &mut self.inner.base
    }

    fn validate(&mut self, raw: &RawValue) -> Result<(), ValidationError> {
        self.inner.validate(raw)
    }
}

// ---------------------------------------------------------------------------
// Boolean field
// ---------------------------------------------------------------------------

/// A boolean field rendered as a checkbox.
///
/// The submitted value is `true` iff its string form equals the literal
/// `"true"` (the value the checkbox widget itself submits).
#[derive(Debug)]
pub struct BoolField {
    base: BaseField,
}

impl BoolField {
    /// Creates a required boolean field with a checkbox widget.
    pub fn new() -> Self {
        Self {
            base: BaseField::new(Box::new(CheckboxWidget::new())),
        }
    }

    /// The bound boolean, if one was stored.
    pub fn value(&self) -> Option<bool> {
        match self.base.value() {
            Some(CoercedValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Pre-populates the field.
    pub fn set_initial(&mut self, initial: bool) {
        self.base.set_value(CoercedValue::Bool(initial));
    }
}

impl Default for BoolField {
    fn default() -> Self {
        Self::new()
    }
}

impl FormField for BoolField {
    fn base(&self) -> &BaseField {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseField {
        &mut self.base
    }

    fn validate(&mut self, raw: &RawValue) -> Result<(), ValidationError> {
        let Some(value) = raw.as_single() else {
            return Err(ValidationError::unsupported(raw.shape_name()));
        };
        let value = CoercedValue::Bool(value == "true");
        self.base.apply_validators(&value)?;
        self.base.set_value(value);
        Ok(())
    }

    /// Checkboxes always carry `value="true"`; `checked="checked"` is
    /// injected when the current value is true.
    fn render(&self, extra: &[(&str, &str)]) -> String {
        let values = [String::from("true")];
        if self.value() == Some(true) {
            let mut extra = extra.to_vec();
            extra.push(("checked", "checked"));
            self.base.widget().render(&extra, &values)
        } else {
            self.base.widget().render(extra, &values)
        }
    }
}

// ---------------------------------------------------------------------------
// Multi-value choice fields
// ---------------------------------------------------------------------------

/// A multi-value string field restricted to a configured choice set.
#[derive(Debug)]
pub struct MultiStringChoiceField {
    inner: StringChoiceField,
}

impl MultiStringChoiceField {
    /// Creates a required multi-choice field with a multi-select widget.
    pub fn new() -> Self {
        let mut single = StringField::new();
        single.base.set_widget(Box::new(SelectWidget::multiple()));
        single.base.is_multi = true;
        Self {
            inner: StringChoiceField { inner: single },
        }
    }

    /// Configures the allowed choices; each submitted entry is checked
    /// independently.
    pub fn set_choices(&mut self, choices: Vec<StringChoice>) {
        self.inner.set_choices(choices);
    }

    /// The bound sequence, if one was stored.
    pub fn value(&self) -> Option<&[String]> {
        match self.inner.inner.base.value() {
            Some(CoercedValue::StrList(v)) => Some(v),
            _ => None,
        }
    }

    /// Pre-populates the field.
    pub fn set_initial(&mut self, initial: Vec<String>) {
        self.inner
            .inner
            .base
            .set_value(CoercedValue::StrList(initial));
    }
}

impl Default for MultiStringChoiceField {
    fn default() -> Self {
        Self::new()
    }
}

impl FormField for MultiStringChoiceField {
    fn base(&self) -> &BaseField {
        &self.inner.inner.base
    }

    fn base_mut(&mut self) -> &mut BaseField {
        &mut self.inner.inner.base
    }

    fn validate(&mut self, raw: &RawValue) -> Result<(), ValidationError> {
        let RawValue::Multi(values) = raw else {
            return Err(ValidationError::unsupported(raw.shape_name()));
        };

        let base = &mut self.inner.inner.base;
        for value in values {
            base.apply_validators(&CoercedValue::Str(value.clone()))?;
        }
        base.set_value(CoercedValue::StrList(values.clone()));
        Ok(())
    }
}

/// A multi-value integer field restricted to a configured choice set.
#[derive(Debug)]
pub struct MultiInt64ChoiceField {
    inner: Int64ChoiceField,
}

impl MultiInt64ChoiceField {
    /// Creates a required multi-choice field with a multi-select widget.
    pub fn new() -> Self {
        let mut single = Int64Field::new();
        single.base.set_widget(Box::new(SelectWidget::multiple()));
        single.base.is_multi = true;
        Self {
            inner: Int64ChoiceField { inner: single },
        }
    }

    /// Configures the allowed choices; each submitted entry is checked
    /// independently.
    pub fn set_choices(&mut self, choices: Vec<Int64Choice>) {
        self.inner.set_choices(choices);
    }

    /// The bound sequence, if one was stored.
    pub fn value(&self) -> Option<&[i64]> {
        match self.inner.inner.base.value() {
            Some(CoercedValue::IntList(v)) => Some(v),
            _ => None,
        }
    }

    /// Pre-populates the field.
    pub fn set_initial(&mut self, initial: Vec<i64>) {
        self.inner
            .inner
            .base
            .set_value(CoercedValue::IntList(initial));
    }
}

impl Default for MultiInt64ChoiceField {
    fn default() -> Self {
        Self::new()
    }
}

impl FormField for MultiInt64ChoiceField {
    fn base(&self) -> &BaseField {
        &self.inner.inner.base
    }

    fn base_mut(&mut self) -> &mut BaseField {
        &mut self.inner.inner.base
    }

    fn validate(&mut self, raw: &RawValue) -> Result<(), ValidationError> {
        let RawValue::Multi(raw_values) = raw else {
            return Err(ValidationError::unsupported(raw.shape_name()));
        };

        let mut values = Vec::with_capacity(raw_values.len());
        for value in raw_values {
            let value: i64 = value
                .parse()
                .map_err(|_| ValidationError::invalid("Enter a whole number"))?;
            values.push(value);
        }

        let base = &mut self.inner.inner.base;
        for value in &values {
            base.apply_validators(&CoercedValue::Int(*value))?;
        }
        base.set_value(CoercedValue::IntList(values));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File field
// ---------------------------------------------------------------------------

/// A file-transport field holding an uploaded-file handle.
///
/// The handle is produced by whatever multipart parser the application
/// uses; any other raw shape is a validation error.
#[derive(Debug)]
pub struct FileField {
    base: BaseField,
}

impl FileField {
    /// Creates a required file field with a file widget.
    pub fn new() -> Self {
        let mut base = BaseField::new(Box::new(FileWidget::new()));
        base.is_multipart = true;
        Self { base }
    }

    /// The bound file handle, if one was stored.
    pub fn value(&self) -> Option<&UploadedFile> {
        match self.base.value() {
            Some(CoercedValue::File(f)) => Some(f),
            _ => None,
        }
    }

    /// Pre-populates the field.
    pub fn set_initial(&mut self, initial: UploadedFile) {
        self.base.set_value(CoercedValue::File(initial));
    }
}

impl Default for FileField {
    fn default() -> Self {
        Self::new()
    }
}

impl FormField for FileField {
    fn base(&self) -> &BaseField {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseField {
        &mut self.base
    }

    fn validate(&mut self, raw: &RawValue) -> Result<(), ValidationError> {
        let RawValue::File(file) = raw else {
            return Err(ValidationError::unsupported(raw.shape_name()));
        };
        let value = CoercedValue::File(file.clone());
        self.base.apply_validators(&value)?;
        self.base.set_value(value);
        Ok(())
    }
}
