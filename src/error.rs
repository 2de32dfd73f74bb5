//! Typed errors for the scoring core and the LLM client.
//!
//! Orchestration code wraps these in [`anyhow::Error`]; the core keeps them
//! concrete so callers can match on them.

use thiserror::Error;

use crate::models::Category;

/// A keyword lookup named a category outside environment/social/governance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ESG category '{name}' (expected environment, social or governance)")]
pub struct UnknownCategoryError {
    pub name: String,
}

/// A keyword list violated one of the [`KeywordIndex`](crate::esg::keywords::KeywordIndex)
/// construction invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeywordIndexError {
    #[error("keyword list for '{0}' is empty")]
    EmptyCategory(Category),

    #[error("keyword list for '{0}' contains an empty keyword")]
    EmptyKeyword(Category),

    #[error("keyword '{keyword}' in '{category}' is not lowercase")]
    NotLowercase { category: Category, keyword: String },

    #[error("keyword '{keyword}' appears more than once in '{category}'")]
    Duplicate { category: Category, keyword: String },
}

/// Failures talking to the Ollama HTTP API.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("LLM service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed LLM response: {0}")]
    MalformedResponse(String),
}
