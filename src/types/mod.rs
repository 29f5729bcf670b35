use thiserror::Error;

mod domain_types;
mod ids;
mod keywords;

pub use domain_types::*;
pub use ids::*;
pub use keywords::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("At least one keyword is required")]
    NoKeywords,

    #[error("Duplicate keyword: {0}")]
    DuplicateKeyword(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid record ID: {0}")]
    InvalidRecordId(String),
}
