//! Core runtime: session resolution, prompt assembly, the completion call
//! and persistence, tied together by [`ConversationOrchestrator`].

pub mod orchestrator;
pub mod prompt;
pub mod session_lock;

pub use orchestrator::{
    ChatSettings, ConversationOrchestrator, ResolvedSession, TurnInput, TurnOutcome,
};
