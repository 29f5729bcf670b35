// src/pipeline.rs
//! The stages a landing page goes through: generate, save, look up, export.
//!
//! Each stage takes its collaborators as arguments so it can run against a
//! mock content source, a memory slot, or a temp directory in tests.

use crate::api::{ContentSource, Credentials};
use crate::error::AppError;
use crate::formatting::{render_html_with, render_text_with, ExportFormat, ExportSubject, ExportTemplates};
use crate::model::{GenerationParams, LandingPageRecord};
use crate::output::{export_filename, export_path, print_preview_path, DeliveryTarget, OutputPlan};
use crate::store::PageStore;
use chrono::{DateTime, Datelike, Utc};
use std::path::PathBuf;

/// How and where to export a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: Option<PathBuf>,
    pub stdout: bool,
    pub templates: Option<PathBuf>,
}

impl ExportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            out_dir: None,
            stdout: false,
            templates: None,
        }
    }

    /// Embedded templates unless an override directory is configured.
    pub fn load_templates(&self) -> Result<ExportTemplates, AppError> {
        match &self.templates {
            Some(dir) => ExportTemplates::from_dir(dir),
            None => ExportTemplates::embedded(),
        }
    }
}

/// Asks `source` for content and wraps it in a fresh record stamped `now`.
///
/// The record is not saved; pass it to [`PageStore::add`] for that.
pub async fn generate_landing_page(
    source: &dyn ContentSource,
    credentials: &Credentials,
    params: &GenerationParams,
    now: DateTime<Utc>,
) -> Result<LandingPageRecord, AppError> {
    let content = source.generate(credentials, params).await?;
    let record = LandingPageRecord::from_generation(params, content, now);
    log::debug!("Generated landing page {} ({})", record.id, record.headline());
    Ok(record)
}

/// Finds a saved page by its full ID or by a prefix matching exactly one page.
pub fn find_page(store: &PageStore, query: &str) -> Option<LandingPageRecord> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if let Some(page) = store.get(query) {
        return Some(page);
    }

    let pages = store.list();
    let mut matches = pages.iter().filter(|page| page.id.as_str().starts_with(query));
    let first = matches.next()?;
    if matches.next().is_some() {
        log::warn!("ID prefix '{}' matches more than one saved page", query);
        return None;
    }
    Some(first.clone())
}

/// Renders `record` in the requested format.
pub fn render_export(
    record: &LandingPageRecord,
    format: ExportFormat,
    templates: &ExportTemplates,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let subject = ExportSubject::from(record);
    match format {
        ExportFormat::Text => render_text_with(templates, &subject),
        ExportFormat::Html | ExportFormat::Print => render_html_with(templates, &subject, now.year()),
    }
}

/// Builds the delivery plan for exporting `record`.
pub fn plan_export(
    record: &LandingPageRecord,
    options: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<OutputPlan, AppError> {
    let templates = options.load_templates()?;
    let content = render_export(record, options.format, &templates, now)?;
    let filename = export_filename(
        &record.city,
        &record.state,
        record.primary_keyword(),
        options.format.extension(),
    );

    let target = if options.stdout {
        DeliveryTarget::PrintToStdout { content }
    } else if options.format == ExportFormat::Print {
        DeliveryTarget::OpenInViewer {
            path: print_preview_path(&filename),
            content,
        }
    } else {
        DeliveryTarget::WriteFile {
            path: export_path(options.out_dir.as_deref(), &filename),
            content,
        }
    };

    Ok(OutputPlan::new().with_operation(target))
}
