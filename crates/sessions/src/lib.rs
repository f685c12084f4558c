//! Session persistence and read-side projections for ForumChat.
//!
//! [`SessionRepository`] is the seam between the conversation runtime and
//! durable storage. [`SessionStore`] is the bundled implementation: an
//! in-memory map written through to `sessions.json`, with optimistic
//! version checks on save. [`projection`] derives the summary and history
//! views served to clients.

pub mod projection;
pub mod repository;
pub mod store;

pub use projection::{history_window, summarize};
pub use repository::SessionRepository;
pub use store::SessionStore;
