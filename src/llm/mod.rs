//! Explanations and idea generation backed by a local Ollama instance.
//!
//! - [`ollama`] — async HTTP client for `/api/generate` and `/api/tags`.
//! - [`prompts`] — prompt templates and parsing of structured idea replies.
//!
//! Nothing here feeds back into scoring; the keyword core stays the only
//! source of ratings.

pub mod ollama;
pub mod prompts;
