//! Dat line composition.

use crate::marker::REPLY_SIGIL;
use crate::markup::LINE_BREAK_TAG;
use crate::parser::FIELD_DELIMITER;
use crate::record::PostId;

/// Builder for composing one dat archive line.
///
/// Content lines are joined with `<br>`; reply markers can be added with
/// [`reply_to`](Self::reply_to). The result has no trailing newline.
///
/// # Example
///
/// ```
/// use dat_rs::builder::DatLineBuilder;
///
/// let line = DatLineBuilder::new()
///     .author("名無しさん")
///     .date("2001/01/01(月)")
///     .time("12:00:00")
///     .poster_tag("ID:abc")
///     .reply_to(1)
///     .line("同意")
///     .build();
///
/// assert_eq!(line, "名無しさん<><>2001/01/01(月) 12:00:00 ID:abc<>&gt;&gt;1<br>同意<>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatLineBuilder {
    author: String,
    email: String,
    date: String,
    time: String,
    poster_tag: Option<String>,
    lines: Vec<String>,
    title: String,
}

impl DatLineBuilder {
    /// Create a new line builder with every field empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the author name.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the email field (ignored by the parser, often `sage`).
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the date token.
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set the time token.
    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    /// Set the poster tag token (e.g. `ID:abc`).
    pub fn poster_tag(mut self, tag: impl Into<String>) -> Self {
        self.poster_tag = Some(tag.into());
        self
    }

    /// Append a content line.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Append several content lines.
    pub fn lines(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.lines.extend(lines.into_iter().map(|l| l.into()));
        self
    }

    /// Append a content line holding a reply marker to `target`.
    pub fn reply_to(mut self, target: PostId) -> Self {
        self.lines.push(format!("{REPLY_SIGIL}{target}"));
        self
    }

    /// Set the title field.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Build the line.
    pub fn build(self) -> String {
        let mut date_time = [self.date, self.time]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(tag) = self.poster_tag {
            if !date_time.is_empty() {
                date_time.push(' ');
            }
            date_time.push_str(&tag);
        }

        [
            self.author,
            self.email,
            date_time,
            self.lines.join(LINE_BREAK_TAG),
            self.title,
        ]
        .join(FIELD_DELIMITER)
    }
}
