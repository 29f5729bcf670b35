// src/api/mod.rs
//! Content generation: turning generation parameters into
//! structured landing page copy.
//!
//! Business logic depends on [`ContentSource`], never on HTTP details. The
//! credential is injected per call through [`Credentials`], so nothing here
//! reads process-wide state.

pub mod client;
pub mod mock;
pub mod parser;
pub mod prompt;
mod responses;

use crate::error::AppError;
use crate::model::{GenerationParams, LandingContent};
use crate::types::ApiKey;

/// Something that can write landing page copy.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn generate(
        &self,
        credentials: &Credentials,
        params: &GenerationParams,
    ) -> Result<LandingContent, AppError>;
}

/// The caller's API credential, held for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    api_key: Option<ApiKey>,
}

impl Credentials {
    pub fn new(api_key: Option<ApiKey>) -> Self {
        Self { api_key }
    }

    pub fn set(&mut self, api_key: ApiKey) {
        self.api_key = Some(api_key);
    }

    pub fn clear(&mut self) {
        self.api_key = None;
    }

    pub fn is_set(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// The key, or a configuration error naming how to provide it.
    pub fn require(&self) -> Result<&ApiKey, AppError> {
        self.api_key.as_ref().ok_or_else(|| {
            AppError::MissingConfiguration(
                "OpenAI API key is not set. Provide it with --api-key or OPENAI_API_KEY."
                    .to_string(),
            )
        })
    }
}

impl From<ApiKey> for Credentials {
    fn from(api_key: ApiKey) -> Self {
        Self::new(Some(api_key))
    }
}

pub use client::{OpenAiClient, OpenAiSettings};
pub use mock::MockContentSource;
