//! Query engine for tkt
//!
//! Filtered, grouped, and searched views over the entity tables. All of
//! it is computed on read from the canonical records - there are no
//! secondary indexes to keep consistent, so every view reflects the
//! latest committed state at call time.

use crate::store::Store;
use crate::ticket::{Status, Ticket};
use chrono::Utc;
use std::collections::HashMap;

impl Store {
    /// Tickets matching a status exactly, in creation order
    pub fn tickets_by_status(&self, status: Status) -> Vec<&Ticket> {
        self.all_tickets()
            .into_iter()
            .filter(|t| t.status == status)
            .collect()
    }

    /// Tickets assigned to exactly this assignee, in creation order
    pub fn tickets_by_assignee(&self, assignee: &str) -> Vec<&Ticket> {
        self.all_tickets()
            .into_iter()
            .filter(|t| t.assignee.as_deref() == Some(assignee))
            .collect()
    }

    /// Tickets grouped by department
    ///
    /// Department is the assignee prefix before the first '.'. Tickets
    /// that are unassigned, or whose assignee has no separator, appear
    /// in no group.
    pub fn tickets_by_department(&self) -> HashMap<String, Vec<&Ticket>> {
        let mut groups: HashMap<String, Vec<&Ticket>> = HashMap::new();
        for ticket in self.all_tickets() {
            if let Some(dept) = ticket.department() {
                groups.entry(dept.to_string()).or_default().push(ticket);
            }
        }
        groups
    }

    /// Tickets whose title or description contains the query,
    /// case-insensitively
    pub fn search_tickets(&self, query: &str) -> Vec<&Ticket> {
        self.all_tickets()
            .into_iter()
            .filter(|t| t.matches(query))
            .collect()
    }

    /// The n most recently created tickets, most recent first
    ///
    /// Returns all tickets when fewer than n exist.
    pub fn recent_tickets(&self, n: usize) -> Vec<&Ticket> {
        self.all_tickets().into_iter().rev().take(n).collect()
    }

    /// Tickets with no assignee, in creation order
    pub fn unassigned_tickets(&self) -> Vec<&Ticket> {
        self.all_tickets()
            .into_iter()
            .filter(|t| t.assignee.is_none())
            .collect()
    }

    /// Unresolved tickets whose due date has passed
    ///
    /// Tickets without a due date are never overdue.
    pub fn overdue_tickets(&self) -> Vec<&Ticket> {
        let now = Utc::now();
        self.all_tickets()
            .into_iter()
            .filter(|t| t.is_overdue(now))
            .collect()
    }

    /// Ticket count per status, covering the statuses present
    pub fn ticket_statistics(&self) -> HashMap<Status, usize> {
        let mut stats: HashMap<Status, usize> = HashMap::new();
        for ticket in self.all_tickets() {
            *stats.entry(ticket.status).or_insert(0) += 1;
        }
        stats
    }
}
