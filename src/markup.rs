//! Markup sanitizing for raw dat lines.
//!
//! Dat lines carry a small amount of HTML. Before a line is split into
//! fields, every tag matching a narrow allow-list shape is removed, except
//! `<br>` (line breaks inside content) and `<hr>` which both survive intact.
//! Tags containing any character outside the allow-list are left verbatim.

use lazy_static::lazy_static;
use regex::Regex;

/// Line-break tag used inside content.
pub const LINE_BREAK_TAG: &str = "<br>";

/// Horizontal-rule tag preserved through stripping.
pub const HORIZONTAL_RULE_TAG: &str = "<hr>";

/// Token that stands in for `<hr>` while generic tags are stripped.
const HORIZONTAL_RULE_SENTINEL: &str = "!&lt;hr&gt;!";

lazy_static! {
    static ref GENERIC_TAG: Regex =
        Regex::new(r#"<[A-Za-z0-9_"':/?=& .,]+>"#).expect("valid regex");
}

/// Sanitize one raw archive line.
///
/// Steps, in order:
/// 1. `<br>` becomes a real newline so the stripper cannot see it
/// 2. `<hr>` becomes a sentinel token
/// 3. allow-listed tags are removed
/// 4. newlines go back to `<br>` and the sentinel back to `<hr>`
///
/// A raw line never contains `\n` itself (lines are split on it), so the
/// round trip only ever restores the breaks step 1 produced.
///
/// # Example
///
/// ```
/// use dat_rs::markup::sanitize_line;
///
/// assert_eq!(
///     sanitize_line(r#"<a href="../test/read.cgi">&gt;&gt;1</a> hi<br><hr>"#),
///     "&gt;&gt;1 hi<br><hr>"
/// );
/// // '%' is outside the allow-list, so the tag stays
/// assert_eq!(sanitize_line("<a href=100%>x"), "<a href=100%>x");
/// ```
pub fn sanitize_line(line: &str) -> String {
    let protected = line
        .replace(LINE_BREAK_TAG, "\n")
        .replace(HORIZONTAL_RULE_TAG, HORIZONTAL_RULE_SENTINEL);

    GENERIC_TAG
        .replace_all(&protected, "")
        .replace('\n', LINE_BREAK_TAG)
        .replace(HORIZONTAL_RULE_SENTINEL, HORIZONTAL_RULE_TAG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_untouched() {
        let line = "名無し<>sage<>2001/01/01 12:00:00<>本文<>スレタイ";
        assert_eq!(sanitize_line(line), line);
    }

    #[test]
    fn test_field_delimiter_not_stripped() {
        // "<>" has no inner characters, so it never matches a tag
        assert_eq!(sanitize_line("a<>b<>c"), "a<>b<>c");
    }

    #[test]
    fn test_line_breaks_preserved() {
        assert_eq!(sanitize_line("one<br>two<br>three"), "one<br>two<br>three");
    }

    #[test]
    fn test_horizontal_rule_preserved() {
        assert_eq!(sanitize_line("above<hr>below"), "above<hr>below");
    }

    #[test]
    fn test_anchor_tags_stripped() {
        let line = r#"<a href="../test/read.cgi/news/1/3" target="_blank">&gt;&gt;3</a>"#;
        assert_eq!(sanitize_line(line), "&gt;&gt;3");
    }

    #[test]
    fn test_closing_and_bold_tags_stripped() {
        assert_eq!(sanitize_line("<b>名無し </b>"), "名無し ");
    }

    #[test]
    fn test_tag_outside_allow_list_kept() {
        assert_eq!(sanitize_line("<font color=#ff0000>red"), "<font color=#ff0000>red");
        assert_eq!(sanitize_line("<img src=a%20b>"), "<img src=a%20b>");
    }

    #[test]
    fn test_uppercase_break_is_stripped_as_generic_tag() {
        // Only the exact lowercase form is a line break
        assert_eq!(sanitize_line("a<BR>b"), "ab");
    }

    #[test]
    fn test_break_splits_tag_candidates() {
        // The newline placeholder is outside the allow-list, so a tag cannot span it
        assert_eq!(sanitize_line("<b<br>>"), "<b<br>>");
    }

    #[test]
    fn test_literal_sentinel_becomes_rule() {
        assert_eq!(sanitize_line("x!&lt;hr&gt;!y"), "x<hr>y");
    }
}
