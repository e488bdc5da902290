//! Ordered HTML attribute sets for widgets.
//!
//! Attributes render in insertion order, so a widget's preset attributes
//! (like `type="text"`) always come first and output is deterministic.

use std::fmt;

use forma_core::utils::text::escape_html;

/// An ordered mapping of HTML attribute name to value.
///
/// Values are HTML-escaped when set. Setting an existing name replaces its
/// value in place, preserving the original position.
///
/// # Examples
///
/// ```
/// use forma_forms::attrs::WidgetAttrs;
///
/// let mut attrs = WidgetAttrs::new();
/// attrs.set("type", "text");
/// attrs.set("id", "username");
/// assert_eq!(attrs.to_string(), r#" type="text" id="username""#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WidgetAttrs {
    attrs: Vec<(String, String)>,
}

impl WidgetAttrs {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an attribute set from preset pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut attrs = Self::new();
        attrs.extend_pairs(pairs);
        attrs
    }

    /// Sets an attribute, replacing the value in place if the name exists.
    ///
    /// The value is HTML-escaped.
    pub fn set(&mut self, name: &str, value: &str) {
        let value = escape_html(value);
        for attr in &mut self.attrs {
            if attr.0 == name {
                attr.1 = value;
                return;
            }
        }
        self.attrs.push((name.to_string(), value));
    }

    /// Returns the value for `name`, or `None` if not present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Removes and returns the value for `name`, or `None` if not present.
    pub fn pop(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(n, _)| n == name)?;
        Some(self.attrs.remove(idx).1)
    }

    /// Returns the attribute names in order.
    pub fn names(&self) -> Vec<&str> {
        self.attrs.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Sets every pair in `pairs`, in order.
    pub fn extend_pairs(&mut self, pairs: &[(&str, &str)]) {
        for (name, value) in pairs {
            self.set(name, value);
        }
    }

    /// Returns `true` if the set holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl fmt::Display for WidgetAttrs {
    /// Renders as ` name="value" name2="value2"` with a leading space,
    /// or the empty string when no attributes are set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.attrs {
            write!(f, r#" {name}="{value}""#)?;
        }
        Ok(())
    }
}
