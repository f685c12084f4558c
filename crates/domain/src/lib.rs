//! `fc-domain`: shared types for ForumChat.
//!
//! Holds the conversation model ([`session::Session`], [`session::Message`]),
//! the shared [`error::Error`] enum, the TOML configuration tree and the
//! structured [`trace::TraceEvent`] log events used by every other crate.

pub mod config;
pub mod error;
pub mod session;
pub mod trace;
