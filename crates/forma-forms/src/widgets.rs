//! Widgets render a field's current value(s) into HTML fragments.
//!
//! Each widget owns an ordered [`WidgetAttrs`] set holding its preset
//! attributes (like `type="text"`) plus whatever the binder or caller adds
//! (`id`, `name`). Rendering merges caller-supplied extra attributes for
//! that call only, so a widget's own attribute set stays stable across
//! renders.

use forma_core::utils::text::escape_html;

use crate::attrs::WidgetAttrs;

/// Identifies a widget's concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// `<input type="text">`.
    Text,
    /// `<textarea>`.
    Textarea,
    /// `<input type="checkbox">`.
    Checkbox,
    /// `<input type="hidden">`.
    Hidden,
    /// `<select>`.
    Select,
    /// `<select multiple>`.
    SelectMultiple,
    /// A set of `<input type="radio">` fragments.
    Radio,
    /// `<input type="file">`.
    File,
}

/// The rendering strategy attached to a field.
///
/// Widgets must be `Send` so forms can move across threads between binding
/// passes.
pub trait Widget: Send {
    /// Returns the widget's variant.
    fn kind(&self) -> WidgetKind;

    /// The widget's own attribute set.
    fn attrs(&self) -> &WidgetAttrs;

    /// Mutable access to the widget's own attribute set.
    fn attrs_mut(&mut self) -> &mut WidgetAttrs;

    /// Renders the widget with caller-supplied extra attributes and the
    /// field's current string value(s).
    ///
    /// Extra attributes apply to this call only.
    fn render(&self, extra: &[(&str, &str)], values: &[String]) -> String;

    /// Downcast hook for widgets that carry a choice list.
    fn as_choice_mut(&mut self) -> Option<&mut dyn ChoiceWidget> {
        None
    }

    /// Downcast hook for the radio widget, which renders per-option
    /// fragments instead of a single one.
    fn as_radio(&self) -> Option<&RadioWidget> {
        None
    }
}

/// A widget rendering a configured list of `(value, label)` choices.
pub trait ChoiceWidget: Widget {
    /// Replaces the widget's choice list.
    fn set_choices(&mut self, choices: Vec<(String, String)>);
}

fn merged(attrs: &WidgetAttrs, extra: &[(&str, &str)]) -> WidgetAttrs {
    let mut merged = attrs.clone();
    merged.extend_pairs(extra);
    merged
}

fn render_input(attrs: &WidgetAttrs, extra: &[(&str, &str)], values: &[String]) -> String {
    let value = values.first().map_or("", String::as_str);
    format!(
        r#"<input{} value="{}" />"#,
        merged(attrs, extra),
        escape_html(value)
    )
}

/// A `<input type="text">` widget.
pub struct TextWidget {
    attrs: WidgetAttrs,
}

impl TextWidget {
    /// Creates a text input widget.
    pub fn new() -> Self {
        Self {
            attrs: WidgetAttrs::from_pairs(&[("type", "text")]),
        }
    }
}

impl Default for TextWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Text
    }

    fn attrs(&self) -> &WidgetAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut WidgetAttrs {
        &mut self.attrs
    }

    fn render(&self, extra: &[(&str, &str)], values: &[String]) -> String {
        render_input(&self.attrs, extra, values)
    }
}

/// A `<textarea>` widget.
pub struct TextareaWidget {
    attrs: WidgetAttrs,
}

impl TextareaWidget {
    /// Creates a textarea widget.
    pub fn new() -> Self {
        Self {
            attrs: WidgetAttrs::new(),
        }
    }
}

impl Default for TextareaWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextareaWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Textarea
    }

    fn attrs(&self) -> &WidgetAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut WidgetAttrs {
        &mut self.attrs
    }

    fn render(&self, extra: &[(&str, &str)], values: &[String]) -> String {
        let value = values.first().map_or("", String::as_str);
        format!(
            r#"<textarea{}>{}</textarea>"#,
            merged(&self.attrs, extra),
            escape_html(value)
        )
    }
}

/// A `<input type="checkbox">` widget.
pub struct CheckboxWidget {
    attrs: WidgetAttrs,
}

impl CheckboxWidget {
    /// Creates a checkbox widget.
    pub fn new() -> Self {
        Self {
            attrs: WidgetAttrs::from_pairs(&[("type", "checkbox")]),
        }
    }
}

impl Default for CheckboxWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for CheckboxWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Checkbox
    }

    fn attrs(&self) -> &WidgetAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut WidgetAttrs {
        &mut self.attrs
    }

    fn render(&self, extra: &[(&str, &str)], values: &[String]) -> String {
        render_input(&self.attrs, extra, values)
    }
}

/// A `<input type="hidden">` widget.
pub struct HiddenWidget {
    attrs: WidgetAttrs,
}

impl HiddenWidget {
    /// Creates a hidden input widget.
    pub fn new() -> Self {
        Self {
            attrs: WidgetAttrs::from_pairs(&[("type", "hidden")]),
        }
    }
}

impl Default for HiddenWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for HiddenWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Hidden
    }

    fn attrs(&self) -> &WidgetAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut WidgetAttrs {
        &mut self.attrs
    }

    fn render(&self, extra: &[(&str, &str)], values: &[String]) -> String {
        render_input(&self.attrs, extra, values)
    }
}

/// A `<select>` widget, single or multiple.
pub struct SelectWidget {
    attrs: WidgetAttrs,
    choices: Vec<(String, String)>,
    multiple: bool,
}

impl SelectWidget {
    /// Creates a single-select widget with no choices.
    pub fn new() -> Self {
        Self {
            attrs: WidgetAttrs::new(),
            choices: Vec::new(),
            multiple: false,
        }
    }

    /// Creates a multi-select widget with no choices.
    pub fn multiple() -> Self {
        Self {
            multiple: true,
            ..Self::new()
        }
    }

    /// Renders the `<option>` fragments, marking `selected` values.
    pub fn options(&self, selected: &[String]) -> Vec<String> {
        self.choices
            .iter()
            .map(|(value, label)| {
                let value = escape_html(value);
                let sel = if selected.iter().any(|s| *s == value) {
                    r#" selected="selected""#
                } else {
                    ""
                };
                format!(
                    r#"<option value="{value}"{sel}>{}</option>"#,
                    escape_html(label)
                )
            })
            .collect()
    }
}

impl Default for SelectWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for SelectWidget {
    fn kind(&self) -> WidgetKind {
        if self.multiple {
            WidgetKind::SelectMultiple
        } else {
            WidgetKind::Select
        }
    }

    fn attrs(&self) -> &WidgetAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut WidgetAttrs {
        &mut self.attrs
    }

    fn render(&self, extra: &[(&str, &str)], values: &[String]) -> String {
        let options = self.options(values).join("\n");
        let open = if self.multiple {
            r#"<select multiple="multiple""#
        } else {
            "<select"
        };
        format!("{open}{}>{options}</select>", merged(&self.attrs, extra))
    }

    fn as_choice_mut(&mut self) -> Option<&mut dyn ChoiceWidget> {
        Some(self)
    }
}

impl ChoiceWidget for SelectWidget {
    fn set_choices(&mut self, choices: Vec<(String, String)>) {
        self.choices = choices;
    }
}

/// A set of `<input type="radio">` fragments, one per choice.
///
/// Radios have no single-fragment rendering: callers iterate
/// [`radios`](RadioWidget::radios) and lay the fragments out themselves.
pub struct RadioWidget {
    attrs: WidgetAttrs,
    choices: Vec<(String, String)>,
}

impl RadioWidget {
    /// Creates a radio widget with no choices.
    pub fn new() -> Self {
        Self {
            attrs: WidgetAttrs::from_pairs(&[("type", "radio")]),
            choices: Vec::new(),
        }
    }

    /// Renders one fragment per choice, marking the checked value.
    ///
    /// Each fragment gets a derived per-option `id` of `{base}_{index}`,
    /// where `base` is the widget's own `id` attribute.
    pub fn radios(&self, extra: &[(&str, &str)], checked_value: &str) -> Vec<String> {
        let base_id = self.attrs.get("id").unwrap_or("").to_string();
        self.choices
            .iter()
            .enumerate()
            .map(|(i, (value, label))| {
                let mut attrs = self.attrs.clone();
                attrs.set("id", &format!("{base_id}_{i}"));
                attrs.extend_pairs(extra);

                let value = escape_html(value);
                let checked = if value == checked_value {
                    r#" checked="checked""#
                } else {
                    ""
                };
                format!(
                    r#"<input{attrs} value="{value}"{checked} /> {}"#,
                    escape_html(label)
                )
            })
            .collect()
    }
}

impl Default for RadioWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for RadioWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Radio
    }

    fn attrs(&self) -> &WidgetAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut WidgetAttrs {
        &mut self.attrs
    }

    /// Radios render through [`radios`](RadioWidget::radios); a
    /// single-fragment render is a caller-contract violation.
    fn render(&self, _extra: &[(&str, &str)], _values: &[String]) -> String {
        panic!("RadioWidget renders through radios(), not render()")
    }

    fn as_choice_mut(&mut self) -> Option<&mut dyn ChoiceWidget> {
        Some(self)
    }

    fn as_radio(&self) -> Option<&RadioWidget> {
        Some(self)
    }
}

impl ChoiceWidget for RadioWidget {
    fn set_choices(&mut self, choices: Vec<(String, String)>) {
        self.choices = choices;
    }
}

/// A `<input type="file">` widget. Never reflects a value back.
pub struct FileWidget {
    attrs: WidgetAttrs,
}

impl FileWidget {
    /// Creates a file input widget.
    pub fn new() -> Self {
        Self {
            attrs: WidgetAttrs::from_pairs(&[("type", "file")]),
        }
    }
}

impl Default for FileWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for FileWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::File
    }

    fn attrs(&self) -> &WidgetAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut WidgetAttrs {
        &mut self.attrs
    }

    fn render(&self, extra: &[(&str, &str)], _values: &[String]) -> String {
        format!("<input{} />", merged(&self.attrs, extra))
    }
}
