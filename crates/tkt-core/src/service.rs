//! Thread-safe service facade for tkt
//!
//! `TicketService` is the interface the rest of the world consumes: a
//! cloneable handle over the entity tables, safe to share across
//! threads. Mutations take the write lock, queries the read lock, so
//! once a mutation returns every subsequent call on any thread observes
//! its effect.
//!
//! Callers only ever receive owned clones of the records; the canonical
//! state can be changed exclusively through the named operations here.

use crate::reply::{Reply, ReplyNode};
use crate::store::Store;
use crate::ticket::{Status, Ticket};
use crate::tree::build_reply_tree;
use crate::{Config, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared handle to the ticket store
#[derive(Clone)]
pub struct TicketService {
    store: Arc<RwLock<Store>>,
}

impl TicketService {
    /// Create an empty service with default config
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty service with explicit config
    pub fn with_config(config: Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::with_config(config))),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a new ticket, open and unassigned
    pub fn create_ticket(&self, title: &str, description: &str) -> Ticket {
        let mut store = self.store.write().unwrap();
        store.create_ticket(title.to_string(), description.to_string())
    }

    /// Replace a ticket's title and description
    pub fn update_ticket(&self, id: &str, title: &str, description: &str) -> Result<Ticket> {
        let mut store = self.store.write().unwrap();
        store
            .update_ticket(id, title.to_string(), description.to_string())
            .cloned()
    }

    /// Resolve a ticket; fails if already resolved
    pub fn resolve_ticket(&self, id: &str) -> Result<()> {
        self.store.write().unwrap().resolve_ticket(id)
    }

    /// Assign a ticket; reassignment allowed
    pub fn assign_ticket(&self, id: &str, assignee: &str) -> Result<()> {
        self.store
            .write()
            .unwrap()
            .assign_ticket(id, assignee.to_string())
    }

    /// Set or clear a ticket's due date
    pub fn set_due_date(&self, id: &str, due: Option<DateTime<Utc>>) -> Result<()> {
        self.store.write().unwrap().set_due_date(id, due)
    }

    /// Add a reply, optionally nested under an existing reply on the
    /// same ticket
    pub fn add_reply(
        &self,
        ticket_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<Reply> {
        let mut store = self.store.write().unwrap();
        store.add_reply(
            ticket_id,
            content.to_string(),
            parent_id.map(String::from),
        )
    }

    /// Replace a reply's content
    pub fn edit_reply(&self, ticket_id: &str, reply_id: &str, content: &str) -> Result<()> {
        self.store
            .write()
            .unwrap()
            .edit_reply(ticket_id, reply_id, content.to_string())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get a ticket by ID
    pub fn ticket(&self, id: &str) -> Result<Ticket> {
        self.store.read().unwrap().ticket(id).cloned()
    }

    /// All tickets in creation order
    pub fn all_tickets(&self) -> Vec<Ticket> {
        cloned(self.store.read().unwrap().all_tickets())
    }

    /// Flat replies for a ticket, in creation order
    pub fn ticket_replies(&self, ticket_id: &str) -> Result<Vec<Reply>> {
        let store = self.store.read().unwrap();
        Ok(store
            .ticket_replies(ticket_id)?
            .into_iter()
            .cloned()
            .collect())
    }

    /// The ticket's reply forest, rebuilt from the flat records
    ///
    /// Roots and siblings appear in creation order. The tree is
    /// recomputed per call under the read lock, so it is always a
    /// consistent snapshot of the latest committed state.
    pub fn replies_tree(&self, ticket_id: &str) -> Result<Vec<ReplyNode>> {
        let store = self.store.read().unwrap();
        let flat: Vec<Reply> = store
            .ticket_replies(ticket_id)?
            .into_iter()
            .cloned()
            .collect();
        Ok(build_reply_tree(&flat))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Tickets matching a status exactly
    pub fn tickets_by_status(&self, status: Status) -> Vec<Ticket> {
        cloned(self.store.read().unwrap().tickets_by_status(status))
    }

    /// Tickets assigned to exactly this assignee
    pub fn tickets_by_assignee(&self, assignee: &str) -> Vec<Ticket> {
        cloned(self.store.read().unwrap().tickets_by_assignee(assignee))
    }

    /// Tickets grouped by department (assignee prefix before the first '.')
    pub fn tickets_by_department(&self) -> HashMap<String, Vec<Ticket>> {
        let store = self.store.read().unwrap();
        store
            .tickets_by_department()
            .into_iter()
            .map(|(dept, tickets)| (dept, tickets.into_iter().cloned().collect()))
            .collect()
    }

    /// Case-insensitive substring search over title and description
    pub fn search_tickets(&self, query: &str) -> Vec<Ticket> {
        cloned(self.store.read().unwrap().search_tickets(query))
    }

    /// The n most recently created tickets, most recent first
    pub fn recent_tickets(&self, n: usize) -> Vec<Ticket> {
        cloned(self.store.read().unwrap().recent_tickets(n))
    }

    /// Tickets with no assignee
    pub fn unassigned_tickets(&self) -> Vec<Ticket> {
        cloned(self.store.read().unwrap().unassigned_tickets())
    }

    /// Unresolved tickets whose due date has passed
    pub fn overdue_tickets(&self) -> Vec<Ticket> {
        cloned(self.store.read().unwrap().overdue_tickets())
    }

    /// Ticket count per status present in the store
    pub fn ticket_statistics(&self) -> HashMap<Status, usize> {
        self.store.read().unwrap().ticket_statistics()
    }
}

impl Default for TicketService {
    fn default() -> Self {
        Self::new()
    }
}

fn cloned(tickets: Vec<&Ticket>) -> Vec<Ticket> {
    tickets.into_iter().cloned().collect()
}
