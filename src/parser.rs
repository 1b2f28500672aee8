//! Record parser for decoded dat archive text.
//!
//! An archive is one post per line. Each non-blank line is sanitized (see
//! [`crate::markup`]) and split on `<>` into five fields:
//!
//! ```text
//! author<>email<>date time poster-tag<>content<>title
//! ```
//!
//! Ids are assigned to non-blank lines only, starting at 1, so blank lines
//! never shift the ids that reply markers point at.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::marker::reply_targets;
use crate::markup::sanitize_line;
use crate::record::{DateTimeAndId, PostId, PostRecord};

/// Field delimiter of the dat format.
pub const FIELD_DELIMITER: &str = "<>";

/// Number of fields in a well-formed line.
pub const FIELD_COUNT: usize = 5;

/// What to do when a non-blank line has fewer than five fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the whole parse with [`Error::MalformedRecord`]
    #[default]
    Abort,
    /// Skip the line without giving it an id and record a [`ParseWarning`]
    Skip,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Handling of malformed lines
    pub malformed: MalformedPolicy,
}

impl ParseOptions {
    /// Options that skip malformed lines instead of aborting.
    pub fn lenient() -> Self {
        Self {
            malformed: MalformedPolicy::Skip,
        }
    }
}

/// A malformed line that was skipped under [`MalformedPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based physical line number
    pub line: usize,
    /// Number of fields the line produced
    pub fields: usize,
}

/// Result of a parse: the records plus any skipped lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseReport {
    /// Parsed records in file order
    pub records: Vec<PostRecord>,
    /// Lines skipped as malformed (always empty under [`MalformedPolicy::Abort`])
    pub warnings: Vec<ParseWarning>,
}

/// Parse archive text with the default options (abort on malformed lines).
///
/// # Example
///
/// ```
/// use dat_rs::parser::parse;
///
/// let text = "名無し<><>2001/01/01 12:00:00 ID:a<>最初<>スレ\n\n名無し<><>2001/01/01 12:01:00<>&gt;&gt;1 乙<>\n";
/// let records = parse(text).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].id, 2);
/// assert_eq!(records[1].reply_targets, vec![1]);
/// assert_eq!(records[1].poster_tag(), "none");
/// ```
pub fn parse(text: &str) -> Result<Vec<PostRecord>> {
    parse_with(text, ParseOptions::default()).map(|report| report.records)
}

/// Parse archive text with explicit options.
pub fn parse_with(text: &str, options: ParseOptions) -> Result<ParseReport> {
    let mut report = ParseReport::default();
    let mut blank_lines = 0usize;
    let mut next_id: PostId = 1;

    for (index, line) in text.split('\n').enumerate() {
        if line.trim().is_empty() {
            blank_lines += 1;
            continue;
        }

        let line_number = index + 1;
        match parse_line(line, next_id) {
            Ok(record) => {
                report.records.push(record);
                next_id += 1;
            }
            Err(fields) => match options.malformed {
                MalformedPolicy::Abort => {
                    return Err(Error::MalformedRecord {
                        line: line_number,
                        fields,
                    });
                }
                MalformedPolicy::Skip => {
                    warn!(line = line_number, fields, "skipping malformed dat line");
                    report.warnings.push(ParseWarning {
                        line: line_number,
                        fields,
                    });
                }
            },
        }
    }

    debug!(
        records = report.records.len(),
        blank_lines,
        skipped = report.warnings.len(),
        "parsed dat archive"
    );

    Ok(report)
}

/// Parse a single non-blank line.
///
/// Returns the number of fields found when the line is malformed. Fields
/// beyond the fifth are ignored.
fn parse_line(line: &str, id: PostId) -> std::result::Result<PostRecord, usize> {
    let sanitized = sanitize_line(line);
    let fields: Vec<&str> = sanitized.split(FIELD_DELIMITER).collect();
    if fields.len() < FIELD_COUNT {
        return Err(fields.len());
    }

    let content = fields[3].to_string();
    let reply_targets = reply_targets(&content);

    Ok(PostRecord {
        id,
        title: fields[4].to_string(),
        author: fields[0].to_string(),
        date_time: DateTimeAndId::parse(fields[2]),
        content,
        reply_targets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "名無しさん<>sage<>2001/01/01(月) 12:00:00 ID:abc<>本文<>";

    #[test]
    fn test_parse_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n   \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_fields() {
        let records = parse("作者<>mail<>2001/01/01 12:00:00 ID:xyz<>こんにちは<>タイトル").unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id, 1);
        assert_eq!(record.author, "作者");
        assert_eq!(record.title, "タイトル");
        assert_eq!(record.content, "こんにちは");
        assert_eq!(record.datetime(), "2001/01/01 12:00:00");
        assert_eq!(record.poster_tag(), "ID:xyz");
        assert!(!record.is_reply());
    }

    #[test]
    fn test_ids_skip_blank_lines() {
        let text = format!("{LINE}\n\n  \t \n{LINE}\n{LINE}\n");
        let records = parse(&text).unwrap();
        let ids: Vec<PostId> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_title_extracted_for_every_line() {
        let text = "a<>b<>c<>d<>first\na<>b<>c<>d<>second";
        let records = parse(text).unwrap();
        assert_eq!(records[0].title, "first");
        assert_eq!(records[1].title, "second");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let records = parse("a<>b<>c<>d<>e<>f<>g").unwrap();
        assert_eq!(records[0].title, "e");
    }

    #[test]
    fn test_trailing_carriage_return_kept_in_title() {
        let records = parse("a<>b<>c<>d<>title\r\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "title\r");
    }

    #[test]
    fn test_malformed_aborts_by_default() {
        let text = format!("{LINE}\n\nonly<>three<>fields\n{LINE}");
        let err = parse(&text).unwrap_err();
        assert_eq!(err, Error::MalformedRecord { line: 3, fields: 3 });
    }

    #[test]
    fn test_malformed_skipped_when_lenient() {
        let text = format!("{LINE}\nbroken\n{LINE}");
        let report = parse_with(&text, ParseOptions::lenient()).unwrap();

        let ids: Vec<PostId> = report.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(report.warnings, vec![ParseWarning { line: 2, fields: 1 }]);
    }

    #[test]
    fn test_delimiter_inside_stripped_markup() {
        // The anchor is stripped before splitting, so only real delimiters count
        let text = r#"a<>b<>c<><a href="../test/read.cgi/x/1/2">&gt;&gt;2</a><>t"#;
        let records = parse(text).unwrap();
        assert_eq!(records[0].content, "&gt;&gt;2");
        assert_eq!(records[0].reply_targets, vec![2]);
    }

    #[test]
    fn test_multiline_content() {
        let records = parse("a<>b<>c<>one<br>two<br><hr>three<>").unwrap();
        assert_eq!(records[0].content, "one<br>two<br><hr>three");
        assert_eq!(records[0].content_lines(), vec!["one", "two", "<hr>three"]);
    }
}
