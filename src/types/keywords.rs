//! Ordered keyword list with a distinguished primary keyword.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered, non-empty list of keywords. The first entry is the primary keyword
/// used in titles and filenames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Keywords(Vec<String>);

impl Keywords {
    /// Builds a keyword list from raw input the way the keyword field accepts it:
    /// entries are trimmed, blanks are skipped, and repeats are dropped while the
    /// first occurrence keeps its position.
    pub fn collect<I, S>(raw: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<String> = Vec::new();
        for entry in raw {
            let trimmed = entry.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if keywords.iter().any(|existing| existing == trimmed) {
                log::debug!("Ignoring repeated keyword '{}'", trimmed);
                continue;
            }
            keywords.push(trimmed.to_string());
        }

        if keywords.is_empty() {
            return Err(ValidationError::NoKeywords);
        }
        Ok(Self(keywords))
    }

    /// Strict construction: every entry must already be trimmed, non-empty and unique.
    pub fn new(keywords: Vec<String>) -> Result<Self, ValidationError> {
        if keywords.is_empty() {
            return Err(ValidationError::NoKeywords);
        }
        for (index, keyword) in keywords.iter().enumerate() {
            if keyword.trim().is_empty() {
                return Err(ValidationError::EmptyField("keyword"));
            }
            if keywords[..index].contains(keyword) {
                return Err(ValidationError::DuplicateKeyword(keyword.clone()));
            }
        }
        Ok(Self(keywords))
    }

    pub fn primary(&self) -> &str {
        // Construction guarantees at least one entry
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    pub fn secondary(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keywords joined with `separator`.
    pub fn joined(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl fmt::Display for Keywords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined(", "))
    }
}

impl TryFrom<Vec<String>> for Keywords {
    type Error = ValidationError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Keywords> for Vec<String> {
    fn from(keywords: Keywords) -> Self {
        keywords.0
    }
}
