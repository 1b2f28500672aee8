//! Reply graph building.
//!
//! Dat archives have no parent pointers. Replies are implied by markers in
//! the content (`&gt;&gt;N`), so the graph is built by scanning every post's
//! markers and inverting them: for each marker in post `p` naming `t`, `p` is
//! appended to `referenced_by[t]`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::record::{PostId, PostRecord};

/// Reply graph of one archive.
///
/// Built once from a complete record set by [`build_graph`]. Targets that
/// name no existing post are kept as keys of `referenced_by`; a lookup miss
/// on the record side just means "no such post".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThreadGraph {
    /// Number of markers inside each post's own content (outward references)
    reply_count: BTreeMap<PostId, usize>,
    /// Target id to the posts referencing it, in discovery order, duplicates kept
    referenced_by: BTreeMap<PostId, Vec<PostId>>,
}

impl ThreadGraph {
    /// Number of markers post `id` itself contains.
    ///
    /// Returns `None` for ids that were not part of the record set.
    pub fn reply_count(&self, id: PostId) -> Option<usize> {
        self.reply_count.get(&id).copied()
    }

    /// Posts that reference `id`, in discovery order.
    ///
    /// Empty when nothing references `id`.
    pub fn referenced_by(&self, id: PostId) -> &[PostId] {
        self.referenced_by
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The full reply-count map.
    pub fn reply_counts(&self) -> &BTreeMap<PostId, usize> {
        &self.reply_count
    }

    /// The full referenced-by map.
    pub fn referenced_by_map(&self) -> &BTreeMap<PostId, Vec<PostId>> {
        &self.referenced_by
    }

    /// Check if `id` appears in any referenced-by list, i.e. whether the post
    /// made at least one reference.
    pub fn is_referencing(&self, id: PostId) -> bool {
        self.referenced_by.values().any(|refs| refs.contains(&id))
    }

    /// Total number of references (edges), duplicates included.
    pub fn edge_count(&self) -> usize {
        self.referenced_by.values().map(|refs| refs.len()).sum()
    }

    /// Referenced targets with no post in the record set, ascending.
    pub fn dangling_targets(&self) -> Vec<PostId> {
        self.referenced_by
            .keys()
            .copied()
            .filter(|id| !self.reply_count.contains_key(id))
            .collect()
    }

    /// Check if the graph was built from an empty record set.
    pub fn is_empty(&self) -> bool {
        self.reply_count.is_empty()
    }
}

/// Build the reply graph from parsed records.
///
/// Records are visited in the order given (parse order, ascending id). Every
/// record gets a `reply_count` entry, including zero. Self-references and
/// repeated references are recorded as-is.
///
/// # Example
///
/// ```
/// use dat_rs::{build_graph, parse};
///
/// let text = "a<><>d t<>first<>title\na<><>d t<>&gt;&gt;1&gt;&gt;1<>\n";
/// let graph = build_graph(&parse(text).unwrap());
///
/// assert_eq!(graph.referenced_by(1), &[2, 2]);
/// assert_eq!(graph.reply_count(2), Some(2));
/// assert_eq!(graph.reply_count(1), Some(0));
/// ```
pub fn build_graph(records: &[PostRecord]) -> ThreadGraph {
    let mut graph = ThreadGraph::default();

    for record in records {
        for &target in &record.reply_targets {
            graph.referenced_by.entry(target).or_default().push(record.id);
        }
        graph.reply_count.insert(record.id, record.reply_targets.len());
    }

    debug!(
        posts = graph.reply_count.len(),
        edges = graph.edge_count(),
        targets = graph.referenced_by.len(),
        "built reply graph"
    );

    graph
}
