//! Post record types for parsed dat archives.
//!
//! This module contains the types representing one parsed archive line:
//! - [`PostRecord`] - A post with its fields and reply targets
//! - [`DateTimeAndId`] - The split date/time/poster-tag field

use crate::utils::content_lines;

/// 1-based position of a post among the non-blank lines of an archive.
pub type PostId = u64;

/// Poster tag used when the date field carries no third token.
pub const NO_POSTER_TAG: &str = "none";

/// The third field of a dat line, split into its whitespace-separated tokens.
///
/// The usual shape is `2001/01/01(Mon) 12:34:56.78 ID:AbCdEf`, but only the
/// first three tokens are looked at and any of them may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeAndId {
    /// The field exactly as it appeared in the archive
    pub raw: String,
    /// First token (empty if absent)
    pub date: String,
    /// Second token (empty if absent)
    pub time: String,
    /// Third token, or [`NO_POSTER_TAG`]
    pub poster_tag: String,
}

impl DateTimeAndId {
    /// Split a raw date field.
    ///
    /// # Example
    ///
    /// ```
    /// use dat_rs::record::DateTimeAndId;
    ///
    /// let field = DateTimeAndId::parse("2001/01/01 12:00:00 ID:abc");
    /// assert_eq!(field.datetime(), "2001/01/01 12:00:00");
    /// assert_eq!(field.poster_tag, "ID:abc");
    ///
    /// let field = DateTimeAndId::parse("2001/01/01 12:00:00");
    /// assert_eq!(field.poster_tag, "none");
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut tokens = raw.split_whitespace();
        let date = tokens.next().unwrap_or_default().to_string();
        let time = tokens.next().unwrap_or_default().to_string();
        let poster_tag = tokens.next().unwrap_or(NO_POSTER_TAG).to_string();

        Self {
            raw: raw.to_string(),
            date,
            time,
            poster_tag,
        }
    }

    /// Date and time joined by a single space.
    pub fn datetime(&self) -> String {
        match (self.date.is_empty(), self.time.is_empty()) {
            (false, false) => format!("{} {}", self.date, self.time),
            (false, true) => self.date.clone(),
            (true, _) => self.time.clone(),
        }
    }

    /// Check whether a real poster tag was present.
    pub fn has_poster_tag(&self) -> bool {
        self.poster_tag != NO_POSTER_TAG
    }
}

/// One parsed line of a dat archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    /// Position among non-blank lines, starting at 1
    pub id: PostId,
    /// Thread title (normally only non-empty on the first record)
    pub title: String,
    /// Author name
    pub author: String,
    /// Date, time and poster tag
    pub date_time: DateTimeAndId,
    /// Sanitized content, line breaks encoded as `<br>`
    pub content: String,
    /// Target ids of the reply markers in `content`, left to right, duplicates kept
    pub reply_targets: Vec<PostId>,
}

impl PostRecord {
    /// Get the composed date and time.
    pub fn datetime(&self) -> String {
        self.date_time.datetime()
    }

    /// Get the poster tag, or `"none"` when absent.
    pub fn poster_tag(&self) -> &str {
        &self.date_time.poster_tag
    }

    /// Get the raw date/time/id field.
    pub fn raw_date_time_and_id(&self) -> &str {
        &self.date_time.raw
    }

    /// Check if this post contains at least one reply marker.
    pub fn is_reply(&self) -> bool {
        !self.reply_targets.is_empty()
    }

    /// Number of reply markers in this post's own content.
    pub fn marker_count(&self) -> usize {
        self.reply_targets.len()
    }

    /// Get the content split back into its original lines.
    pub fn content_lines(&self) -> Vec<&str> {
        content_lines(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(id: PostId, content: &str, reply_targets: Vec<PostId>) -> PostRecord {
        PostRecord {
            id,
            title: String::new(),
            author: "名無しさん".to_string(),
            date_time: DateTimeAndId::parse("2001/01/01 12:00:00 ID:abc"),
            content: content.to_string(),
            reply_targets,
        }
    }

    #[test]
    fn test_date_time_full() {
        let field = DateTimeAndId::parse("2001/01/01(月) 12:34:56.78 ID:AbCdEf");
        assert_eq!(field.date, "2001/01/01(月)");
        assert_eq!(field.time, "12:34:56.78");
        assert_eq!(field.poster_tag, "ID:AbCdEf");
        assert!(field.has_poster_tag());
        assert_eq!(field.datetime(), "2001/01/01(月) 12:34:56.78");
    }

    #[test]
    fn test_date_time_without_tag() {
        let field = DateTimeAndId::parse("2001/01/01 12:34:56");
        assert_eq!(field.poster_tag, NO_POSTER_TAG);
        assert!(!field.has_poster_tag());
    }

    #[test]
    fn test_date_time_extra_tokens_ignored() {
        let field = DateTimeAndId::parse("2001/01/01 12:34:56 ID:abc BE:123");
        assert_eq!(field.poster_tag, "ID:abc");
        assert_eq!(field.raw, "2001/01/01 12:34:56 ID:abc BE:123");
    }

    #[test]
    fn test_date_time_partial() {
        let field = DateTimeAndId::parse("あぼーん");
        assert_eq!(field.date, "あぼーん");
        assert_eq!(field.time, "");
        assert_eq!(field.datetime(), "あぼーん");

        let field = DateTimeAndId::parse("");
        assert_eq!(field.datetime(), "");
        assert_eq!(field.poster_tag, NO_POSTER_TAG);
    }

    #[test]
    fn test_record_accessors() {
        let record = make_record(2, "&gt;&gt;1 そうだね<br>同意", vec![1]);
        assert!(record.is_reply());
        assert_eq!(record.marker_count(), 1);
        assert_eq!(record.poster_tag(), "ID:abc");
        assert_eq!(record.datetime(), "2001/01/01 12:00:00");
        assert_eq!(record.raw_date_time_and_id(), "2001/01/01 12:00:00 ID:abc");
        assert_eq!(record.content_lines(), vec!["&gt;&gt;1 そうだね", "同意"]);
    }

    #[test]
    fn test_record_not_reply() {
        let record = make_record(1, "最初の書き込み", vec![]);
        assert!(!record.is_reply());
        assert_eq!(record.marker_count(), 0);
    }
}
