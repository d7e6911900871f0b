//! In-memory entity tables for tkt
//!
//! No files, no database - two maps plus insertion-order bookkeeping.
//! The store is single-threaded; `service::TicketService` wraps it in a
//! lock for concurrent callers.

use crate::reply::Reply;
use crate::ticket::Ticket;
use crate::{Config, Error, Result, generate_id};
use chrono::Duration;
use std::collections::HashMap;
use tracing::debug;

/// In-memory ticket and reply tables
///
/// Creation order is tracked separately from the maps: default listing,
/// recency, and sibling order in the reply tree all read from the order
/// vectors, never from map iteration order.
pub struct Store {
    config: Config,
    tickets: HashMap<String, Ticket>,
    ticket_order: Vec<String>,
    replies: HashMap<String, Reply>,
    reply_order: Vec<String>,
}

impl Store {
    /// Create an empty store with default config
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty store with explicit config
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            tickets: HashMap::new(),
            ticket_order: Vec::new(),
            replies: HashMap::new(),
            reply_order: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Allocate an ID that is not already taken in the given table
    ///
    /// The hash tokens are collision-resistant, not collision-proof;
    /// re-roll until the ID is free so uniqueness is guaranteed for the
    /// lifetime of the store.
    fn fresh_id<V>(prefix: &str, table: &HashMap<String, V>) -> String {
        loop {
            let id = generate_id(prefix);
            if !table.contains_key(&id) {
                return id;
            }
        }
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    /// Create a new ticket, open and unassigned
    pub fn create_ticket(&mut self, title: String, description: String) -> Ticket {
        let id = Self::fresh_id(&self.config.ticket_prefix, &self.tickets);
        let mut ticket = Ticket::new(id.clone(), title, description);

        if let Some(hours) = self.config.default_due_hours {
            ticket.due_date = Some(ticket.created_at + Duration::hours(hours));
        }

        debug!(id = %id, "create ticket");
        self.tickets.insert(id.clone(), ticket.clone());
        self.ticket_order.push(id);
        ticket
    }

    /// Get a ticket by ID
    pub fn ticket(&self, id: &str) -> Result<&Ticket> {
        self.tickets
            .get(id)
            .ok_or_else(|| Error::TicketNotFound(id.to_string()))
    }

    /// All tickets in creation order
    pub fn all_tickets(&self) -> Vec<&Ticket> {
        self.ticket_order
            .iter()
            .filter_map(|id| self.tickets.get(id))
            .collect()
    }

    /// Number of tickets
    pub fn ticket_count(&self) -> usize {
        self.tickets.len()
    }

    /// Update a ticket's title and description
    ///
    /// ID, status, and assignment cannot change through this path.
    pub fn update_ticket(&mut self, id: &str, title: String, description: String) -> Result<&Ticket> {
        let ticket = self
            .tickets
            .get_mut(id)
            .ok_or_else(|| Error::TicketNotFound(id.to_string()))?;

        debug!(id = %id, "update ticket");
        ticket.title = title;
        ticket.description = description;
        ticket.updated_at = chrono::Utc::now();
        Ok(ticket)
    }

    /// Resolve a ticket (one-way)
    pub fn resolve_ticket(&mut self, id: &str) -> Result<()> {
        let ticket = self
            .tickets
            .get_mut(id)
            .ok_or_else(|| Error::TicketNotFound(id.to_string()))?;

        if ticket.status.is_resolved() {
            return Err(Error::AlreadyResolved(id.to_string()));
        }

        debug!(id = %id, "resolve ticket");
        ticket.resolve();
        Ok(())
    }

    /// Assign a ticket (reassignment allowed, last write wins)
    pub fn assign_ticket(&mut self, id: &str, assignee: String) -> Result<()> {
        let ticket = self
            .tickets
            .get_mut(id)
            .ok_or_else(|| Error::TicketNotFound(id.to_string()))?;

        debug!(id = %id, assignee = %assignee, "assign ticket");
        ticket.assign(assignee);
        Ok(())
    }

    /// Set or clear a ticket's due date
    pub fn set_due_date(
        &mut self,
        id: &str,
        due: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<()> {
        let ticket = self
            .tickets
            .get_mut(id)
            .ok_or_else(|| Error::TicketNotFound(id.to_string()))?;

        debug!(id = %id, "set due date");
        ticket.due_date = due;
        ticket.updated_at = chrono::Utc::now();
        Ok(())
    }

    // ========================================================================
    // Replies
    // ========================================================================

    /// Add a reply to a ticket, optionally nested under an existing reply
    ///
    /// Validation happens before any write: the ticket must exist, and a
    /// given parent must be an existing reply on the same ticket.
    pub fn add_reply(
        &mut self,
        ticket_id: &str,
        content: String,
        parent_id: Option<String>,
    ) -> Result<Reply> {
        if !self.tickets.contains_key(ticket_id) {
            return Err(Error::TicketNotFound(ticket_id.to_string()));
        }

        if let Some(ref parent) = parent_id {
            match self.replies.get(parent) {
                Some(p) if p.ticket_id == ticket_id => {}
                _ => {
                    return Err(Error::UnknownParent {
                        ticket_id: ticket_id.to_string(),
                        parent_id: parent.clone(),
                    });
                }
            }
        }

        let id = Self::fresh_id(&self.config.reply_prefix, &self.replies);
        let reply = Reply::new(id.clone(), ticket_id.to_string(), content, parent_id);

        debug!(id = %id, ticket_id = %ticket_id, "add reply");
        self.replies.insert(id.clone(), reply.clone());
        self.reply_order.push(id);
        Ok(reply)
    }

    /// Edit a reply's content in place
    ///
    /// ID, parent, and tree position are untouched.
    pub fn edit_reply(&mut self, ticket_id: &str, reply_id: &str, content: String) -> Result<()> {
        if !self.tickets.contains_key(ticket_id) {
            return Err(Error::TicketNotFound(ticket_id.to_string()));
        }

        let reply = self
            .replies
            .get_mut(reply_id)
            .ok_or_else(|| Error::ReplyNotFound(reply_id.to_string()))?;

        if reply.ticket_id != ticket_id {
            return Err(Error::ForeignReply {
                ticket_id: ticket_id.to_string(),
                reply_id: reply_id.to_string(),
            });
        }

        debug!(id = %reply_id, "edit reply");
        reply.edit(content);
        Ok(())
    }

    /// Flat replies for a ticket, in creation order
    pub fn ticket_replies(&self, ticket_id: &str) -> Result<Vec<&Reply>> {
        if !self.tickets.contains_key(ticket_id) {
            return Err(Error::TicketNotFound(ticket_id.to_string()));
        }

        Ok(self
            .reply_order
            .iter()
            .filter_map(|id| self.replies.get(id))
            .filter(|r| r.ticket_id == ticket_id)
            .collect())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
