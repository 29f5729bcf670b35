// src/model/mod.rs
//! Domain model for generated landing pages.
//!
//! A [`LandingPageRecord`] is the only persisted entity. Field names follow the
//! camelCase layout of the durable slot so collections written by earlier
//! versions of the page store load unchanged.

mod params;
pub(crate) mod timestamp;

pub use params::GenerationParams;

use crate::types::{Keywords, RecordId, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One question/answer pair of the FAQ section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Structured copy returned by the content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingContent {
    pub introduction: String,
    pub why_us: String,
    pub things_to_do: String,
    pub faq: Vec<FaqEntry>,
}

impl LandingContent {
    /// Checks that every section carries text and the FAQ is usable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.introduction.trim().is_empty() {
            return Err(ValidationError::EmptyField("introduction"));
        }
        if self.why_us.trim().is_empty() {
            return Err(ValidationError::EmptyField("whyUs"));
        }
        if self.things_to_do.trim().is_empty() {
            return Err(ValidationError::EmptyField("thingsToDo"));
        }
        if self.faq.is_empty() {
            return Err(ValidationError::EmptyField("faq"));
        }
        for entry in &self.faq {
            if entry.question.trim().is_empty() {
                return Err(ValidationError::EmptyField("faq.question"));
            }
            if entry.answer.trim().is_empty() {
                return Err(ValidationError::EmptyField("faq.answer"));
            }
        }
        Ok(())
    }
}

/// A saved landing page: generation inputs, creation time, and the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageRecord {
    pub id: RecordId,
    pub city: String,
    pub state: String,
    pub keywords: Keywords,
    pub tone: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub content: LandingContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl LandingPageRecord {
    /// Assembles a fresh record from the parameters that produced `content`.
    pub fn from_generation(
        params: &GenerationParams,
        content: LandingContent,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            city: params.city.clone(),
            state: params.state.clone(),
            keywords: params.keywords.clone(),
            tone: params.tone_or_default().to_string(),
            created_at,
            content,
            company_name: params.company_name.clone(),
        }
    }

    pub fn primary_keyword(&self) -> &str {
        self.keywords.primary()
    }

    /// Headline used in listings: "{primary} in {city}, {state}".
    pub fn headline(&self) -> String {
        format!("{} in {}, {}", self.primary_keyword(), self.city, self.state)
    }
}
