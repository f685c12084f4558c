//! `fc-forum`: read-only client for the forum (discussion) service.
//!
//! Provides the [`ForumSource`] trait that abstracts over the forum API, a
//! production REST implementation ([`RestForumClient`]), typed DTOs for the
//! two endpoints the chat service reads, and a [`ForumContextBuilder`] that
//! turns a subthread into a text block for the system instruction.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use fc_domain::config::ForumConfig;
//! use fc_forum::{ForumContextBuilder, RestForumClient};
//!
//! # async fn example() -> fc_domain::error::Result<()> {
//! let client = RestForumClient::new(&ForumConfig::default())?;
//! let context = ForumContextBuilder::new(&client)
//!     .build("subthread-1", Some("thread-1"))
//!     .await;
//! println!("{}", context.text);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod provider;
pub mod rest;
pub mod types;

pub use context::{ContextOutcome, ForumContext, ForumContextBuilder};
pub use provider::ForumSource;
pub use rest::RestForumClient;
pub use types::{ForumMessage, ForumSubthread};
