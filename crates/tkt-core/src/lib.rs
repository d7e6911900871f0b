//! tkt-core: Core library for the tkt ticket store
//!
//! Provides the data model, in-memory entity tables, reply-tree
//! reconstruction, and query engine for a support ticket system.
//! No database, no daemon - everything lives in process memory behind
//! a single thread-safe service handle.

pub mod config;
pub mod error;
pub mod id;
pub mod query;
pub mod reply;
pub mod service;
pub mod store;
pub mod ticket;
pub mod tree;

pub use config::Config;
pub use error::Error;
pub use id::generate_id;
pub use reply::{Reply, ReplyNode};
pub use service::TicketService;
pub use store::Store;
pub use ticket::{Status, Ticket};
pub use tree::build_reply_tree;

/// Result type for tkt operations
pub type Result<T> = std::result::Result<T, Error>;
