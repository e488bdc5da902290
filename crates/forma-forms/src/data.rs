//! Containers for submitted form data.
//!
//! The engine never parses HTTP bodies itself: the surrounding application
//! (or framework glue) produces a [`FormData`] for URL-encoded submissions
//! or a [`MultipartData`] for `multipart/form-data` submissions, and the
//! binder reads values out of them through its value-lookup strategies.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use forma_core::utils::MultiValueDict;

/// URL-encoded form values: name -> list of submitted values.
///
/// A single name may appear multiple times (repeated parameters,
/// multi-select values); order of appearance is preserved per name.
///
/// # Examples
///
/// ```
/// use forma_forms::data::FormData;
///
/// let data = FormData::parse("color=red&color=blue&size=large");
/// assert_eq!(data.get("color"), Some("red"));
/// assert_eq!(
///     data.get_list("color"),
///     Some(&vec!["red".to_string(), "blue".to_string()])
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormData {
    data: MultiValueDict<String, String>,
}

impl FormData {
    /// Creates an empty `FormData`.
    pub fn new() -> Self {
        Self {
            data: MultiValueDict::new(),
        }
    }

    /// Parses a URL-encoded query string (e.g. `"a=1&b=2"`).
    ///
    /// Handles percent-encoding and `+`-as-space, and supports multiple
    /// values per key.
    pub fn parse(query_string: &str) -> Self {
        let mut data = MultiValueDict::new();

        for pair in query_string.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair
                .find('=')
                .map_or((pair, ""), |eq| (&pair[..eq], &pair[eq + 1..]));
            data.append(url_decode(key), url_decode(value));
        }

        Self { data }
    }

    /// Returns the first submitted value for `name`, or `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.data.get(&name.to_string()).map(String::as_str)
    }

    /// Returns all submitted values for `name` in submission order, or `None`.
    pub fn get_list(&self, name: &str) -> Option<&Vec<String>> {
        self.data.get_list(&name.to_string())
    }

    /// Sets a single value for `name`, replacing any existing values.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.data.set(name.into(), value.into());
    }

    /// Appends a value to the list for `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.data.append(name.into(), value.into());
    }

    /// Returns `true` if no values were submitted.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}

/// An uploaded file from a multipart form submission.
///
/// Produced by whatever multipart parser the application uses; the form
/// engine only stores and validates the handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// The original filename as provided by the client.
    pub name: String,
    /// The MIME content type of the file.
    pub content_type: String,
    /// The size of the file content in bytes.
    pub size: usize,
    /// The raw file content.
    pub content: Vec<u8>,
}

impl UploadedFile {
    /// Creates an uploaded-file handle from a filename, content type, and body.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size: content.len(),
            content,
        }
    }
}

/// A parsed `multipart/form-data` submission: ordinary values plus files.
#[derive(Debug, Clone, Default)]
pub struct MultipartData {
    /// Ordinary (non-file) form values.
    pub values: FormData,
    files: HashMap<String, Vec<UploadedFile>>,
}

impl MultipartData {
    /// Creates an empty `MultipartData`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an uploaded file under the given field name.
    pub fn add_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.files.entry(name.into()).or_default().push(file);
    }

    /// Returns the first uploaded file for `name`, or `None`.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name).and_then(|f| f.first())
    }

    /// Returns all uploaded files for `name`, or `None`.
    pub fn files(&self, name: &str) -> Option<&Vec<UploadedFile>> {
        self.files.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let data = FormData::parse("name=Alice&age=30");
        assert_eq!(data.get("name"), Some("Alice"));
        assert_eq!(data.get("age"), Some("30"));
        assert_eq!(data.get("missing"), None);
    }

    #[test]
    fn test_parse_repeated_key() {
        let data = FormData::parse("tag=a&tag=b&tag=c");
        assert_eq!(data.get("tag"), Some("a"));
        assert_eq!(
            data.get_list("tag"),
            Some(&vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_parse_percent_and_plus() {
        let data = FormData::parse("q=hello+world&path=%2Ftmp%2Fx");
        assert_eq!(data.get("q"), Some("hello world"));
        assert_eq!(data.get("path"), Some("/tmp/x"));
    }

    #[test]
    fn test_parse_empty_value_and_empty_string() {
        let data = FormData::parse("a=&b=1");
        assert_eq!(data.get("a"), Some(""));
        assert!(FormData::parse("").is_empty());
    }

    #[test]
    fn test_set_and_append() {
        let mut data = FormData::new();
        data.append("k", "1");
        data.append("k", "2");
        assert_eq!(data.get_list("k").map(Vec::len), Some(2));
        data.set("k", "3");
        assert_eq!(data.get_list("k"), Some(&vec!["3".to_string()]));
    }

    #[test]
    fn test_uploaded_file_size() {
        let f = UploadedFile::new("a.txt", "text/plain", b"hello".to_vec());
        assert_eq!(f.size, 5);
        assert_eq!(f.name, "a.txt");
    }

    #[test]
    fn test_multipart_files() {
        let mut data = MultipartData::new();
        data.values.set("title", "hi");
        data.add_file("doc", UploadedFile::new("a.pdf", "application/pdf", vec![1, 2]));
        data.add_file("doc", UploadedFile::new("b.pdf", "application/pdf", vec![3]));

        assert_eq!(data.file("doc").map(|f| f.name.as_str()), Some("a.pdf"));
        assert_eq!(data.files("doc").map(Vec::len), Some(2));
        assert_eq!(data.file("other"), None);
        assert_eq!(data.values.get("title"), Some("hi"));
    }
}
