//! Reply-tree reconstruction for tkt
//!
//! Rebuilds the nested thread view from flat parent-pointer records.
//! One pass to bucket children by parent, then recursive assembly, so
//! the whole forest is O(n) in the number of replies. Input order is
//! creation order and is preserved among roots and among siblings.

use crate::reply::{Reply, ReplyNode};
use std::collections::HashMap;

/// Build the reply forest for one ticket
///
/// `replies` must already be restricted to a single ticket and sorted
/// by creation order. The service guarantees every `parent_id` resolves
/// within the same slice, so every reply lands in exactly one position.
pub fn build_reply_tree(replies: &[Reply]) -> Vec<ReplyNode> {
    let mut children_of: HashMap<&str, Vec<&Reply>> = HashMap::new();
    let mut roots: Vec<&Reply> = Vec::new();

    for reply in replies {
        match reply.parent_id.as_deref() {
            Some(parent) => children_of.entry(parent).or_default().push(reply),
            None => roots.push(reply),
        }
    }

    roots
        .into_iter()
        .map(|r| attach_children(r, &children_of))
        .collect()
}

fn attach_children(reply: &Reply, children_of: &HashMap<&str, Vec<&Reply>>) -> ReplyNode {
    let children = children_of
        .get(reply.id.as_str())
        .map(|kids| {
            kids.iter()
                .map(|k| attach_children(k, children_of))
                .collect()
        })
        .unwrap_or_default();

    ReplyNode {
        reply: reply.clone(),
        children,
    }
}
