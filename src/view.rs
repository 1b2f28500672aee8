//! Renderer-facing view over parsed records and their reply graph.
//!
//! The display rule for dat threads is:
//!
//! - a post is nested under every post it references (once per marker)
//! - a post that references anything is not shown at top level
//! - each post is labelled with its own marker count
//!
//! [`ThreadView`] answers those questions from a record slice and a
//! [`ThreadGraph`] without owning either.

use std::collections::{HashMap, HashSet};

use crate::graph::ThreadGraph;
use crate::record::{PostId, PostRecord};

/// Read-only view for rendering a thread.
#[derive(Debug, Clone)]
pub struct ThreadView<'a> {
    records: &'a [PostRecord],
    graph: &'a ThreadGraph,
    /// Post id to index into `records`
    index: HashMap<PostId, usize>,
    /// Every id appearing in any referenced-by list
    referencing: HashSet<PostId>,
}

impl<'a> ThreadView<'a> {
    /// Create a view over records and the graph built from them.
    pub fn new(records: &'a [PostRecord], graph: &'a ThreadGraph) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(i, record)| (record.id, i))
            .collect();
        let referencing = graph
            .referenced_by_map()
            .values()
            .flatten()
            .copied()
            .collect();

        Self {
            records,
            graph,
            index,
            referencing,
        }
    }

    /// Look up a post by id.
    pub fn get(&self, id: PostId) -> Option<&'a PostRecord> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    /// Posts shown at top level: those that reference nothing, in id order.
    pub fn top_level(&self) -> Vec<&'a PostRecord> {
        self.records
            .iter()
            .filter(|record| !self.referencing.contains(&record.id))
            .collect()
    }

    /// Check if a post is only shown nested.
    pub fn is_nested_only(&self, id: PostId) -> bool {
        self.referencing.contains(&id)
    }

    /// Posts nested directly under `id`, in discovery order.
    ///
    /// A post referencing `id` twice appears twice. Ids with no record are
    /// skipped.
    pub fn replies_to(&self, id: PostId) -> Vec<&'a PostRecord> {
        self.graph
            .referenced_by(id)
            .iter()
            .filter_map(|&reply_id| self.get(reply_id))
            .collect()
    }

    /// Label for a post: the number of markers in its own content.
    pub fn reply_count(&self, id: PostId) -> usize {
        self.graph.reply_count(id).unwrap_or(0)
    }

    /// Build the nested display tree under `id`, at most `max_depth` levels
    /// of replies deep.
    ///
    /// Each post's replies are expanded at most once per tree; later
    /// occurrences of the same post are leaves. Posts already on the path
    /// from the root are left out, so self-references and reply cycles
    /// terminate. The tree has at most one node per reference plus the root.
    /// Returns `None` if `id` has no record.
    pub fn tree(&self, id: PostId, max_depth: usize) -> Option<ViewNode<'a>> {
        let record = self.get(id)?;
        let mut path = vec![id];
        let mut expanded = HashSet::new();
        Some(self.build_node(record, max_depth, &mut path, &mut expanded))
    }

    /// Display trees for every top-level post.
    pub fn trees(&self, max_depth: usize) -> Vec<ViewNode<'a>> {
        self.top_level()
            .into_iter()
            .filter_map(|record| self.tree(record.id, max_depth))
            .collect()
    }

    fn build_node(
        &self,
        record: &'a PostRecord,
        remaining: usize,
        path: &mut Vec<PostId>,
        expanded: &mut HashSet<PostId>,
    ) -> ViewNode<'a> {
        let mut replies = Vec::new();
        if remaining > 0 && expanded.insert(record.id) {
            for reply in self.replies_to(record.id) {
                if path.contains(&reply.id) {
                    continue;
                }
                path.push(reply.id);
                replies.push(self.build_node(reply, remaining - 1, path, expanded));
                path.pop();
            }
        }

        ViewNode { record, replies }
    }
}

/// A post in a display tree together with the posts nested under it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode<'a> {
    /// The post at this node
    pub record: &'a PostRecord,
    /// Posts replying to it
    pub replies: Vec<ViewNode<'a>>,
}

impl<'a> ViewNode<'a> {
    /// Count all nodes in this subtree.
    pub fn count_nodes(&self) -> usize {
        1 + self.replies.iter().map(|r| r.count_nodes()).sum::<usize>()
    }

    /// Get the maximum depth of the subtree (0 if no replies).
    pub fn max_depth(&self) -> usize {
        self.replies
            .iter()
            .map(|r| 1 + r.max_depth())
            .max()
            .unwrap_or(0)
    }

    /// Iterate over all nodes (depth-first, pre-order).
    pub fn iter(&self) -> ViewNodeIterator<'_, 'a> {
        ViewNodeIterator { stack: vec![self] }
    }
}

/// Depth-first iterator over a display tree.
pub struct ViewNodeIterator<'n, 'a> {
    stack: Vec<&'n ViewNode<'a>>,
}

impl<'n, 'a> Iterator for ViewNodeIterator<'n, 'a> {
    type Item = &'n ViewNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push replies in reverse order so they're processed left-to-right
        for reply in node.replies.iter().rev() {
            self.stack.push(reply);
        }
        Some(node)
    }
}
