//! Completion endpoint adapters.
//!
//! - [`GeminiCompletionClient`]: Google generative-language `generateContent`

mod gemini;

pub use gemini::GeminiCompletionClient;
