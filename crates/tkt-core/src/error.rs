//! Error types for tkt

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("Reply not found: {0}")]
    ReplyNotFound(String),

    #[error("Reply {reply_id} does not belong to ticket {ticket_id}")]
    ForeignReply {
        ticket_id: String,
        reply_id: String,
    },

    #[error("Ticket already resolved: {0}")]
    AlreadyResolved(String),

    #[error("Parent reply {parent_id} does not exist on ticket {ticket_id}")]
    UnknownParent {
        ticket_id: String,
        parent_id: String,
    },

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid config: {0}")]
    Config(String),
}
