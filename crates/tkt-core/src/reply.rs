//! Reply data model for tkt
//!
//! Replies are stored flat with a parent pointer; the nested view is
//! rebuilt on demand by `tree::build_reply_tree`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A threaded comment on a ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    /// Unique identifier (rpl-xxxxxxxx)
    pub id: String,

    /// Owning ticket's ID
    pub ticket_id: String,

    /// Reply text
    pub content: String,

    /// Parent reply ID; absent means root-level within the ticket's thread
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// When the reply was created
    pub created_at: DateTime<Utc>,

    /// When the reply was last edited
    pub updated_at: DateTime<Utc>,
}

impl Reply {
    /// Create a new reply record
    pub fn new(id: String, ticket_id: String, content: String, parent_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            ticket_id,
            content,
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this reply sits at the root of its ticket's thread
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Edit the content in place
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

/// A reply with its children attached
///
/// Computed view, never stored: built per read so mutations are always
/// immediately visible and callers cannot alias the canonical records.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyNode {
    #[serde(flatten)]
    pub reply: Reply,

    /// Child replies in creation order
    pub children: Vec<ReplyNode>,
}

impl ReplyNode {
    /// Total number of replies in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ReplyNode::count).sum::<usize>()
    }
}
