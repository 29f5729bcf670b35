// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. Reading them
//! top to bottom tells how a page is generated, stored, and exported.

// ---------------------------------------------------------------------------
// Content generation
// ---------------------------------------------------------------------------

/// Default endpoint root for the chat-completions API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completions path appended to the base URL.
pub const CHAT_COMPLETIONS_ENDPOINT: &str = "chat/completions";

/// Model asked to write the landing page copy.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Sampling temperature for generation. Moderate, so copy varies between runs.
pub const GENERATION_TEMPERATURE: f32 = 0.7;

/// Upper bound on tokens in a generated landing page.
pub const GENERATION_MAX_TOKENS: u32 = 4000;

/// Seconds to wait for the endpoint before giving up on a request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Tone used when the caller does not pick one.
pub const DEFAULT_TONE: &str = "professional";

/// Message used when an upstream error body carries no message.
pub const UNKNOWN_UPSTREAM_ERROR: &str = "Unknown error";

// ---------------------------------------------------------------------------
// Page store
// ---------------------------------------------------------------------------

/// Name of the durable slot holding the saved collection.
pub const PAGE_STORE_SLOT_NAME: &str = "landingPages";

/// File name of the default durable slot.
pub const PAGE_STORE_FILE_NAME: &str = "landingPages.json";

/// Directory under the user data dir that holds the store.
pub const APP_DATA_DIR_NAME: &str = "localpage";

/// Attempts made against a storage backend before a storage error is surfaced.
pub const STORAGE_RETRY_ATTEMPTS: u32 = 3;

/// First backoff delay between storage attempts, in milliseconds. Doubles per attempt.
pub const STORAGE_RETRY_INITIAL_DELAY_MS: u64 = 50;

/// Cap on the backoff delay between storage attempts, in milliseconds.
pub const STORAGE_RETRY_MAX_DELAY_MS: u64 = 1_000;

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Characters of the introduction reused as the meta description.
pub const META_DESCRIPTION_MAX_CHARS: usize = 155;

/// Maximum characters kept from a sanitized filename stem.
pub const FILENAME_MAX_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
