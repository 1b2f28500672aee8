//! Utility functions for post content processing.

use lazy_static::lazy_static;
use regex::Regex;

use crate::markup::LINE_BREAK_TAG;

lazy_static! {
    static ref URL: Regex = Regex::new(r"https?://\S+").expect("valid regex");
}

/// Split `<br>`-encoded content into its lines.
///
/// # Example
///
/// ```
/// use dat_rs::utils::content_lines;
///
/// assert_eq!(content_lines("one<br>two"), vec!["one", "two"]);
/// assert_eq!(content_lines(""), vec![""]);
/// ```
pub fn content_lines(content: &str) -> Vec<&str> {
    content.split(LINE_BREAK_TAG).collect()
}

/// Wrap every `http://` or `https://` run in an anchor opening a new tab.
///
/// A URL extends up to the next whitespace character.
///
/// # Example
///
/// ```
/// use dat_rs::utils::linkify_urls;
///
/// assert_eq!(
///     linkify_urls("see http://example.com/a now"),
///     r#"see <a href="http://example.com/a" target="_blank">http://example.com/a</a> now"#
/// );
/// ```
pub fn linkify_urls(content: &str) -> String {
    URL.replace_all(content, r#"<a href="$0" target="_blank">$0</a>"#)
        .into_owned()
}
