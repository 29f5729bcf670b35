// src/api/client.rs
//! HTTP client for an OpenAI-compatible chat-completions endpoint.
//!
//! The client holds no credential of its own; the key comes in with each call
//! so one client can serve whichever credential the session currently holds.

use super::prompt::{build_prompt, SYSTEM_MESSAGE};
use super::responses::{ChatCompletionRequest, ChatMessage, ResponseFormat};
use super::{ContentSource, Credentials};
use crate::constants::{
    CHAT_COMPLETIONS_ENDPOINT, DEFAULT_API_BASE_URL, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
    GENERATION_MAX_TOKENS, GENERATION_TEMPERATURE,
};
use crate::error::AppError;
use crate::model::{GenerationParams, LandingContent};
use crate::types::{ValidatedUrl, ValidationError};
use reqwest::{Client, Response};
use std::time::Duration;

/// Where and how to call the endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: ValidatedUrl,
    pub model: String,
    pub timeout: Duration,
}

impl OpenAiSettings {
    pub fn new(base_url: ValidatedUrl) -> Self {
        Self {
            base_url,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Settings for the public OpenAI API.
    pub fn openai() -> Result<Self, ValidationError> {
        Ok(Self::new(ValidatedUrl::parse(DEFAULT_API_BASE_URL)?))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn completions_url(&self) -> String {
        self.base_url.join_endpoint(CHAT_COMPLETIONS_ENDPOINT)
    }
}

/// A [`ContentSource`] backed by the chat-completions API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    settings: OpenAiSettings,
}

impl OpenAiClient {
    pub fn new(settings: OpenAiSettings) -> Result<Self, AppError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }

    /// Sends one completion request and returns the raw response.
    async fn post_completion(
        &self,
        credentials: &Credentials,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<Response, AppError> {
        let api_key = credentials.require()?;
        let url = self.settings.completions_url();

        log::debug!("POST {} (model {})", url, request.model);

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key.as_str())
            .json(request)
            .send()
            .await?;

        log::debug!("Completion response status: {}", response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl ContentSource for OpenAiClient {
    async fn generate(
        &self,
        credentials: &Credentials,
        params: &GenerationParams,
    ) -> Result<LandingContent, AppError> {
        // Fail before building anything if there is no key
        credentials.require()?;

        log::info!(
            "Generating landing page for '{}' in {}, {}",
            params.keywords.primary(),
            params.city,
            params.state
        );

        let prompt = build_prompt(params);
        let request = ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage::system(SYSTEM_MESSAGE), ChatMessage::user(&prompt)],
            temperature: GENERATION_TEMPERATURE,
            max_tokens: GENERATION_MAX_TOKENS,
            response_format: ResponseFormat::json_object(),
        };

        let response = self.post_completion(credentials, &request).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_completion(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Reads the whole response body, keeping status and URL for error reports.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults() {
        let settings = OpenAiSettings::openai().unwrap();
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.timeout, Duration::from_secs(60));
        assert_eq!(
            settings.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let settings = OpenAiSettings::new(ValidatedUrl::parse("http://localhost:8080/v1/").unwrap())
            .with_model("gpt-4o-mini");
        assert_eq!(
            settings.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(settings.model, "gpt-4o-mini");
    }

    #[test]
    fn request_serializes_json_mode() {
        let request = ChatCompletionRequest {
            model: "gpt-4o",
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            temperature: GENERATION_TEMPERATURE,
            max_tokens: GENERATION_MAX_TOKENS,
            response_format: ResponseFormat::json_object(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["max_tokens"], 4000);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        // Nothing listens here; reaching the network would be a different error
        let settings = OpenAiSettings::new(ValidatedUrl::parse("http://127.0.0.1:9").unwrap());
        let client = OpenAiClient::new(settings).unwrap();
        let params = GenerationParams::new(
            crate::types::Keywords::collect(["plumbing"]).unwrap(),
            "Austin",
            "Texas",
        )
        .unwrap();

        let err = client
            .generate(&Credentials::default(), &params)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }
}
