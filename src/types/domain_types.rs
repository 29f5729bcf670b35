// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// API key for the chat-completions endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        // The key travels in an Authorization header
        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot contain whitespace or control characters".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let visible: String = self.0.chars().take(6).collect();
        write!(f, "{}...", visible)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// Validated URL type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl Serialize for ValidatedUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidatedUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ValidatedUrl::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl ValidatedUrl {
    /// Create a new validated URL
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url) {
            Ok(parsed_url) => {
                if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: "Only HTTP and HTTPS URLs are supported".to_string(),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Appends an endpoint path, tolerating a trailing slash on the base.
    pub fn join_endpoint(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.0.as_str().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Voice the generated copy is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Authoritative,
    Conversational,
    Enthusiastic,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Friendly => "friendly",
            Self::Authoritative => "authoritative",
            Self::Conversational => "conversational",
            Self::Enthusiastic => "enthusiastic",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_validation() {
        assert!(ApiKey::new("sk-abcdefghijklmnopqrs").is_ok());
        assert!(ApiKey::new("  sk-padded  ").is_ok());
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("   ").is_err());
        assert!(ApiKey::new("sk-has space").is_err());
    }

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("sk-secretsecretsecret").unwrap();
        assert_eq!(key.to_string(), "sk-sec...");
        assert!(!format!("{:?}", key).contains("secretsecret"));
    }

    #[test]
    fn test_url_validation() {
        assert!(ValidatedUrl::parse("https://api.openai.com/v1").is_ok());
        assert!(ValidatedUrl::parse("http://localhost:8080").is_ok());
        assert!(ValidatedUrl::parse("ftp://example.com").is_err());
        assert!(ValidatedUrl::parse("not a url").is_err());
    }

    #[test]
    fn test_join_endpoint() {
        let base = ValidatedUrl::parse("https://api.openai.com/v1").unwrap();
        assert_eq!(
            base.join_endpoint("chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );

        let bare = ValidatedUrl::parse("http://127.0.0.1:9000").unwrap();
        assert_eq!(
            bare.join_endpoint("/chat/completions"),
            "http://127.0.0.1:9000/chat/completions"
        );
    }

    #[test]
    fn test_tone_names() {
        assert_eq!(Tone::default().as_str(), "professional");
        assert_eq!(Tone::Enthusiastic.to_string(), "enthusiastic");
    }
}
