//! Sans-IO archive reader.
//!
//! The reader does not touch the filesystem or network. Callers fetch the
//! archive bytes however they like, feed them in, and call
//! [`ArchiveReader::finish`] to get the decoded, parsed and graphed thread.

use bytes::{BufMut, BytesMut};
use encoding_rs::SHIFT_JIS;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{build_graph, ThreadGraph};
use crate::parser::{parse_with, ParseOptions, ParseWarning};
use crate::record::{PostId, PostRecord};
use crate::view::ThreadView;

/// Logical address of an archive: a board name and a dat file name.
///
/// # Example
///
/// ```
/// use dat_rs::reader::ArchiveLocation;
///
/// let location = ArchiveLocation::new("news", "1234567890").unwrap();
/// assert_eq!(location.relative_path(), "news/dat/1234567890.dat");
///
/// assert!(ArchiveLocation::new("", "1234567890").is_err());
/// assert!(ArchiveLocation::new("news", "../secret").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveLocation {
    board: String,
    file: String,
}

impl ArchiveLocation {
    /// Create a location, rejecting empty names and names that are not a
    /// single path component.
    pub fn new(board: impl Into<String>, file: impl Into<String>) -> Result<Self> {
        let board = board.into();
        let file = file.into();
        validate_name("board", &board)?;
        validate_name("file", &file)?;
        Ok(Self { board, file })
    }

    /// Get the board name.
    pub fn board(&self) -> &str {
        &self.board
    }

    /// Get the dat file name (without extension).
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Path of the archive relative to the boards root: `{board}/dat/{file}.dat`.
    pub fn relative_path(&self) -> String {
        format!("{}/dat/{}.dat", self.board, self.file)
    }
}

fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidLocation(format!("{kind} name is empty")));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::InvalidLocation(format!(
            "{kind} name {name:?} is not a plain name"
        )));
    }
    Ok(())
}

/// Decode Shift-JIS archive bytes.
///
/// Malformed sequences become U+FFFD. With `strict` set they fail with
/// [`Error::Decode`] instead.
pub fn decode_archive(data: &[u8], strict: bool) -> Result<String> {
    let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(data);
    if had_errors {
        if strict {
            return Err(Error::Decode(
                "archive contains invalid Shift-JIS sequences".to_string(),
            ));
        }
        warn!(bytes = data.len(), "replaced invalid Shift-JIS sequences");
    }
    Ok(text.into_owned())
}

/// A fully loaded archive: its records and their reply graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Archive {
    records: Vec<PostRecord>,
    graph: ThreadGraph,
    warnings: Vec<ParseWarning>,
}

impl Archive {
    /// Parse decoded text and build the graph.
    pub fn from_text(text: &str, options: ParseOptions) -> Result<Self> {
        let report = parse_with(text, options)?;
        let graph = build_graph(&report.records);
        Ok(Self {
            records: report.records,
            graph,
            warnings: report.warnings,
        })
    }

    /// Get the records in file order.
    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }

    /// Get the reply graph.
    pub fn graph(&self) -> &ThreadGraph {
        &self.graph
    }

    /// Lines skipped as malformed under a lenient policy.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Look up a post by id.
    pub fn get(&self, id: PostId) -> Option<&PostRecord> {
        // Ids are dense and start at 1
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.records.get(index)
    }

    /// Title of the thread, taken from the first record.
    pub fn title(&self) -> Option<&str> {
        self.records.first().map(|r| r.title.as_str())
    }

    /// Get the number of posts.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the archive has no posts.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Renderer view over this archive.
    pub fn view(&self) -> ThreadView<'_> {
        ThreadView::new(&self.records, &self.graph)
    }

    /// Split into records and graph.
    pub fn into_parts(self) -> (Vec<PostRecord>, ThreadGraph) {
        (self.records, self.graph)
    }
}

/// Sans-IO archive reader.
///
/// Buffers raw archive bytes until the caller has fed the whole file.
#[derive(Debug, Default)]
pub struct ArchiveReader {
    buffer: BytesMut,
    options: ParseOptions,
    strict_decoding: bool,
}

impl ArchiveReader {
    /// Create a reader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with explicit parse options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Fail on invalid Shift-JIS instead of replacing it.
    pub fn strict_decoding(mut self, strict: bool) -> Self {
        self.strict_decoding = strict;
        self
    }

    /// Feed archive bytes into the reader.
    pub fn feed_bytes(&mut self, data: &[u8]) {
        self.buffer.put_slice(data);
    }

    /// Number of bytes buffered so far.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Decode, parse and graph everything fed so far.
    ///
    /// The buffer is drained, so the reader can be reused for another archive.
    pub fn finish(&mut self) -> Result<Archive> {
        let data = self.buffer.split().freeze();
        let text = decode_archive(&data, self.strict_decoding)?;
        let archive = Archive::from_text(&text, self.options)?;

        debug!(
            bytes = data.len(),
            posts = archive.len(),
            "loaded dat archive"
        );

        Ok(archive)
    }
}
