//! String utility functions.
//!
//! Provides identifier word-splitting (used to derive human-readable field
//! labels from member identifiers) and HTML escaping (used by widgets for
//! attribute values and option labels).

/// Splits a capitalized identifier into its words.
///
/// Runs of capitals are treated as a single word, except that the last
/// capital of a run starts the next word when a lowercase letter follows.
/// A trailing unconsumed character becomes a final single-character word.
///
/// # Examples
///
/// ```
/// use forma_core::utils::text::split_words;
///
/// assert_eq!(split_words(""), Vec::<String>::new());
/// assert_eq!(split_words("FooBar"), vec!["Foo", "Bar"]);
/// assert_eq!(split_words("HTTP"), vec!["HTTP"]);
/// assert_eq!(split_words("HTTPReq"), vec!["HTTP", "Req"]);
/// assert_eq!(split_words("HTTPReqX"), vec!["HTTP", "Req", "X"]);
/// ```
pub fn split_words(ident: &str) -> Vec<String> {
    let bytes = ident.as_bytes();
    let len = bytes.len();
    let mut words = Vec::new();
    if len == 0 {
        return words;
    }

    let mut i = 0;
    while i + 1 < len {
        let start = i;
        let r1 = bytes[i];
        let r2 = bytes[i + 1];
        i += 2;

        if r1.is_ascii_uppercase() && r2.is_ascii_uppercase() {
            // Consume the uppercase run, stopping at the first lowercase
            // letter; that letter's preceding capital begins the next word.
            while i < len && !bytes[i].is_ascii_lowercase() {
                i += 1;
            }
            if i != len {
                i -= 1;
            }
        } else {
            while i < len && !bytes[i].is_ascii_uppercase() {
                i += 1;
            }
        }
        words.push(ident[start..i].to_string());
    }

    if i < len {
        words.push(ident[i..].to_string());
    }

    words
}

/// Escapes a string for safe embedding in HTML attribute values and text.
///
/// Covers the five characters with special meaning in both contexts,
/// using numeric references for the quote characters.
///
/// # Examples
///
/// ```
/// use forma_core::utils::text::escape_html;
///
/// assert_eq!(escape_html("a<b"), "a&lt;b");
/// assert_eq!(escape_html(r#"say "hi""#), "say &#34;hi&#34;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
