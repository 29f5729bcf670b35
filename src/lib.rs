// src/lib.rs
//! localpage library: generate location-targeted landing pages with an LLM,
//! keep them in a durable local page store, and export them.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Page store**: `PageStore` over a `DurableSlot` (`FileSlot`, `MemorySlot`, `RetryingSlot`)
//! - **Content generation**: `ContentSource`, `OpenAiClient`, `MockContentSource`, `Credentials`
//! - **Export**: `render_text`, `render_html`, `ExportTemplates`, output planning and delivery
//! - **Domain model**: `LandingPageRecord`, `LandingContent`, `GenerationParams`
//! - **Error handling**: `AppError`, `StorageError`, `ValidationError`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod error_recovery;
pub mod formatting;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod store;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, ErrorKind, StorageError, UpstreamErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Action, AppConfig, CommandLineInput};

// --- Domain Model ---
pub use crate::model::{FaqEntry, GenerationParams, LandingContent, LandingPageRecord};

// --- Domain Types ---
pub use crate::types::{ApiKey, Keywords, RecordId, Tone, ValidatedUrl};

// --- Page Store ---
pub use crate::store::{
    DurableSlot, FileSlot, MemorySlot, PageStore, RetryingSlot, SlotTransaction, SubscriptionId,
};

// --- Content Generation ---
pub use crate::api::{ContentSource, Credentials, MockContentSource, OpenAiClient, OpenAiSettings};

// --- Export ---
pub use crate::formatting::{
    render_html, render_text, time_ago, ExportFormat, ExportSubject, ExportTemplates,
};
pub use crate::output::{deliver, export_filename, DeliveryTarget, OutputPlan, OutputReport};
pub use crate::pipeline::{find_page, generate_landing_page, plan_export, ExportOptions};
