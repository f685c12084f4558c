pub mod openai_compat;
pub mod traits;
pub mod util;

// Re-exports for convenience.
pub use openai_compat::OpenAiCompatProvider;
pub use traits::{
    Choice, ChoiceMessage, CompletionProvider, CompletionRequest, CompletionResponse,
    ProviderMessage, Usage,
};
