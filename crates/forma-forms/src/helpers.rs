//! Form-level rendering helpers.
//!
//! Small fragment builders a template layer composes around
//! [`FormField::render`](crate::fields::FormField::render): the error span,
//! the label tag, and the concatenated hidden fields of a form.

use forma_core::utils::text::escape_html;

use crate::fields::FormField;
use crate::form::Form;
use crate::typeinfo::FormSpec;
use crate::widgets::WidgetKind;

/// Renders the field's current error as a help fragment, or "" when the
/// field has no error.
pub fn render_error(field: &dyn FormField) -> String {
    match field.validation_error() {
        Some(err) => format!(
            r#"<span class="help-inline">{}</span>"#,
            escape_html(&err.to_string())
        ),
        None => String::new(),
    }
}

/// Renders a label tag for the field, suffixed with `*` when required.
pub fn render_label(field: &dyn FormField) -> String {
    let marker = if field.is_required() { " *" } else { "" };
    format!(
        r#"<label class="control-label" for="{}">{}{marker}</label>"#,
        escape_html(field.name()),
        escape_html(field.label())
    )
}

/// Concatenates the rendered markup of every set field whose widget is the
/// hidden variant.
pub fn render_hidden_fields<F: FormSpec>(form: &mut F) -> String {
    let mut out = String::new();
    for spec in F::field_specs() {
        if let Some(field) = spec.slot(form).field_mut() {
            if field.base().widget().kind() == WidgetKind::Hidden {
                out.push_str(&field.render(&[]));
            }
        }
    }
    out
}

/// Serializes a form's error map for a JSON-consuming rendering layer.
pub fn errors_as_json(form: &dyn Form) -> serde_json::Value {
    serde_json::to_value(form.errors()).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use forma_core::ValidationError;

    use crate::fields::{is_field_valid, StringField};
    use crate::form::BaseForm;
    use crate::typeinfo::FieldSpec;
    use crate::value::RawValue;
    use crate::widgets::HiddenWidget;

    #[test]
    fn test_render_error_empty_when_valid() {
        let f = StringField::new();
        assert_eq!(render_error(&f), "");
    }

    #[test]
    fn test_render_error_fragment() {
        let mut f = StringField::new();
        assert!(!is_field_valid(&mut f, None));
        assert_eq!(
            render_error(&f),
            r#"<span class="help-inline">This field is required</span>"#
        );
    }

    #[test]
    fn test_render_error_escapes_message() {
        let mut f = StringField::new();
        f.base_mut()
            .set_validation_error(ValidationError::invalid_choice("<script>"));
        assert!(render_error(&f).contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_label() {
        let mut f = StringField::new();
        f.set_name("FirstName");
        f.set_label("First Name");
        f.base_mut().set_required(false);
        assert_eq!(
            render_label(&f),
            r#"<label class="control-label" for="FirstName">First Name</label>"#
        );
    }

    #[test]
    fn test_render_label_required_marker() {
        let mut f = StringField::new();
        f.set_name("Name");
        f.set_label("Name");
        assert_eq!(
            render_label(&f),
            r#"<label class="control-label" for="Name">Name *</label>"#
        );
    }

    #[derive(Default)]
    struct TokenForm {
        base: BaseForm,
        token: Option<StringField>,
        name: Option<StringField>,
    }

    impl crate::form::Form for TokenForm {
        fn set_errors(&mut self, errors: HashMap<String, ValidationError>) {
            self.base.set_errors(errors);
        }

        fn errors(&self) -> &HashMap<String, ValidationError> {
            self.base.errors()
        }
    }

    impl FormSpec for TokenForm {
        fn field_specs() -> &'static [FieldSpec<Self>] {
            static SPECS: &[FieldSpec<TokenForm>] = &[
                FieldSpec::new("Token", |f: &mut TokenForm| &mut f.token),
                FieldSpec::new("Name", |f: &mut TokenForm| &mut f.name),
            ];
            SPECS
        }
    }

    #[test]
    fn test_render_hidden_fields() {
        let mut form = TokenForm::default();

        let mut token = StringField::new();
        token.base_mut().set_widget(Box::new(HiddenWidget::new()));
        token.set_name("Token");
        token.set_initial("abc123");
        form.token = Some(token);

        let mut name = StringField::new();
        name.set_name("Name");
        form.name = Some(name);

        let html = render_hidden_fields(&mut form);
        assert_eq!(
            html,
            r#"<input type="hidden" id="Token" name="Token" value="abc123" />"#
        );
    }

    #[test]
    fn test_render_hidden_fields_skips_unset() {
        let mut form = TokenForm::default();
        assert_eq!(render_hidden_fields(&mut form), "");
    }

    #[test]
    fn test_errors_as_json() {
        let mut form = BaseForm::new();
        let mut errors = HashMap::new();
        errors.insert("Age".to_string(), ValidationError::required());
        crate::form::Form::set_errors(&mut form, errors);

        let json = errors_as_json(&form);
        assert_eq!(json["Age"]["kind"], "required");
        assert_eq!(json["Age"]["message"], "This field is required");
    }

    #[test]
    fn test_field_binding_does_not_affect_helpers() {
        let mut f = StringField::new();
        let raw = RawValue::from("ok");
        assert!(is_field_valid(&mut f, Some(&raw)));
        assert_eq!(render_error(&f), "");
    }
}
