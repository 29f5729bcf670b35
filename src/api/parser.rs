// src/api/parser.rs
//! Turns raw chat-completion responses into validated landing page content.
//!
//! Nothing the model returns is trusted: the body must be a completion, the
//! message must be JSON of the expected shape, and every section must carry
//! text before it reaches the store.

use super::client::ApiResponse;
use super::responses::{ChatCompletionResponse, ErrorEnvelope};
use crate::constants::{ERROR_BODY_PREVIEW_LENGTH, UNKNOWN_UPSTREAM_ERROR};
use crate::error::{AppError, UpstreamErrorCode};
use crate::model::LandingContent;

/// Parses a completion response, mapping non-2xx statuses to [`AppError::Upstream`].
pub fn parse_completion(result: ApiResponse<String>) -> Result<LandingContent, AppError> {
    if !result.status.is_success() {
        return Err(upstream_error(&result));
    }

    let completion: ChatCompletionResponse = serde_json::from_str(&result.data).map_err(|e| {
        log::error!(
            "Unexpected completion body from {}: {} ({})",
            result.url,
            e,
            preview(&result.data)
        );
        AppError::MalformedContent(format!("response was not a chat completion: {}", e))
    })?;

    let message = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| AppError::MalformedContent("completion carried no message".to_string()))?;

    parse_landing_content(&message)
}

/// Parses the model's message as [`LandingContent`] and validates it.
pub fn parse_landing_content(message: &str) -> Result<LandingContent, AppError> {
    let json = strip_code_fence(message);
    let content: LandingContent = serde_json::from_str(json).map_err(|e| {
        log::error!("Generated content is not the expected JSON: {}", e);
        log::debug!("Generated content preview: {}", preview(json));
        AppError::MalformedContent(e.to_string())
    })?;

    content
        .validate()
        .map_err(|e| AppError::MalformedContent(e.to_string()))?;
    Ok(content)
}

/// Models sometimes wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(message: &str) -> &str {
    let trimmed = message.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn upstream_error(result: &ApiResponse<String>) -> AppError {
    let status = result.status.as_u16();

    match serde_json::from_str::<ErrorEnvelope>(&result.data) {
        Ok(envelope) => {
            let code = envelope
                .error
                .code_or_type()
                .map(UpstreamErrorCode::from_api_response)
                .unwrap_or_else(|| UpstreamErrorCode::from_http_status(status));
            let message = envelope
                .error
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_UPSTREAM_ERROR.to_string());
            log::error!("Upstream error {} from {}: {}", status, result.url, message);
            AppError::Upstream {
                code,
                message,
                status,
            }
        }
        Err(_) => {
            log::error!(
                "Upstream error {} from {} with unparseable body: {}",
                status,
                result.url,
                preview(&result.data)
            );
            AppError::Upstream {
                code: UpstreamErrorCode::from_http_status(status),
                message: UNKNOWN_UPSTREAM_ERROR.to_string(),
                status,
            }
        }
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
