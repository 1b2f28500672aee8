//! # dat-rs
//!
//! A sans-io parser and reply-graph builder for the line-oriented "dat"
//! archives used by Japanese bulletin-board systems.
//!
//! A dat archive holds one thread, one post per line, with fields separated
//! by `<>`. Replies carry no parent pointer; they are written as `&gt;&gt;N`
//! markers inside the post body. This library turns archive text into
//! ordered [`PostRecord`]s and inverts the markers into a [`ThreadGraph`].
//!
//! ## Design Philosophy
//!
//! - **Pure stages**: [`parse`] and [`build_graph`] are pure functions; every
//!   call returns fresh values and no state is shared between loads
//! - **I/O Separation**: [`ArchiveReader`] takes bytes from wherever the
//!   caller fetched them and handles Shift-JIS decoding
//! - **Rendering left out**: [`ThreadView`] exposes the nesting rules as
//!   data; producing markup is up to the caller
//!
//! ## Examples
//!
//! ### Parsing decoded text
//!
//! ```rust
//! use dat_rs::{build_graph, parse};
//!
//! let text = "名無し<><>2001/01/01 00:00:00 ID:a<>最初<>スレタイ\n\
//!             名無し<><>2001/01/01 00:01:00 ID:b<>&gt;&gt;1 乙<>\n";
//!
//! let records = parse(text).unwrap();
//! let graph = build_graph(&records);
//!
//! assert_eq!(records[0].title, "スレタイ");
//! assert_eq!(graph.referenced_by(1), &[2]);
//! assert_eq!(graph.reply_count(2), Some(1));
//! ```
//!
//! ### Sans-IO reading
//!
//! ```rust
//! use dat_rs::ArchiveReader;
//!
//! let mut reader = ArchiveReader::new();
//! reader.feed_bytes(b"a<>b<>c<>hello<>title\n");
//! let archive = reader.finish().unwrap();
//! assert_eq!(archive.len(), 1);
//! ```
//!
//! ### With Runtime Integration
//!
//! ```rust,no_run
//! # #[cfg(feature = "tokio-runtime")]
//! # {
//! use dat_rs::{ArchiveLocation, ArchiveReader};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let location = ArchiveLocation::new("news", "1234567890")?;
//! let archive = dat_rs::tokio::load_archive("/srv/bbs", &location, ArchiveReader::new()).await?;
//! # Ok(())
//! # }
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod builder;
pub mod error;
pub mod graph;
pub mod marker;
pub mod markup;
pub mod parser;
pub mod reader;
pub mod record;
pub mod utils;
pub mod view;

pub use builder::DatLineBuilder;
pub use error::{Error, Result};
pub use graph::{build_graph, ThreadGraph};
pub use parser::{parse, parse_with, MalformedPolicy, ParseOptions, ParseReport, ParseWarning};
pub use reader::{Archive, ArchiveLocation, ArchiveReader};
pub use record::{PostId, PostRecord};
pub use view::{ThreadView, ViewNode};

// Optional async runtime integration
#[cfg(feature = "tokio-runtime")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio-runtime")))]
pub mod tokio;
