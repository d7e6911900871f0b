//! Ticket data model for tkt

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ticket status
///
/// One-way state machine: Open -> Resolved, no reopening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Open,
    Resolved,
}

impl Status {
    pub fn is_open(&self) -> bool {
        matches!(self, Status::Open)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Status::Resolved)
    }
}

impl std::str::FromStr for Status {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "resolved" => Ok(Status::Resolved),
            _ => Err(crate::Error::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Open => write!(f, "open"),
            Status::Resolved => write!(f, "resolved"),
        }
    }
}

/// Core ticket structure
///
/// The store owns the canonical record; callers only ever hold clones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier (tkt-xxxxxxxx)
    pub id: String,

    /// Ticket title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Current status
    pub status: Status,

    /// Assignee, namespaced as `<department>.<agent>` (e.g. "network.expert")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// When the ticket was created
    pub created_at: DateTime<Utc>,

    /// When the ticket was last updated
    pub updated_at: DateTime<Utc>,

    /// When the ticket was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,

    /// When the ticket is due; absent means never overdue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Create a new open, unassigned ticket
    pub fn new(id: String, title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description,
            status: Status::Open,
            assignee: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
            due_date: None,
        }
    }

    /// Department part of the assignee (prefix before the first '.')
    ///
    /// None if unassigned or the assignee carries no department separator.
    pub fn department(&self) -> Option<&str> {
        let assignee = self.assignee.as_deref()?;
        let (dept, _) = assignee.split_once('.')?;
        Some(dept)
    }

    /// Whether the due date has passed and the ticket is still open
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due < now && !self.status.is_resolved(),
            None => false,
        }
    }

    /// Whether title or description contains the query, case-insensitively
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.title.to_lowercase().contains(&q) || self.description.to_lowercase().contains(&q)
    }

    /// Mark as resolved
    pub fn resolve(&mut self) {
        let now = Utc::now();
        self.status = Status::Resolved;
        self.resolved_at = Some(now);
        self.updated_at = now;
    }

    /// Set the assignee (last write wins)
    pub fn assign(&mut self, assignee: String) {
        self.assignee = Some(assignee);
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.id, self.status, self.title)
    }
}
