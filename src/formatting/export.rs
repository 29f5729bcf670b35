// src/formatting/export.rs
//! Text and HTML exports of a landing page.

use super::templates::ExportTemplates;
use crate::constants::META_DESCRIPTION_MAX_CHARS;
use crate::error::AppError;
use crate::model::{GenerationParams, LandingContent, LandingPageRecord};
use crate::types::Keywords;
use serde::Serialize;
use serde_json::json;

/// Export file formats offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Markdown-flavoured plain text
    Text,
    /// Self-contained HTML page with SEO metadata
    Html,
    /// HTML opened in the system viewer for printing or saving as PDF
    Print,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Html | Self::Print => "html",
        }
    }
}

/// What an export is made from: location, keywords, and the generated copy.
#[derive(Debug, Clone, Copy)]
pub struct ExportSubject<'a> {
    pub city: &'a str,
    pub state: &'a str,
    pub keywords: &'a Keywords,
    pub content: &'a LandingContent,
}

impl<'a> ExportSubject<'a> {
    pub fn new(params: &'a GenerationParams, content: &'a LandingContent) -> Self {
        Self {
            city: &params.city,
            state: &params.state,
            keywords: &params.keywords,
            content,
        }
    }

    pub fn primary_keyword(&self) -> &'a str {
        self.keywords.primary()
    }

    /// "{primary} Services in {city}, {state}"
    pub fn title(&self) -> String {
        format!(
            "{} Services in {}, {}",
            self.primary_keyword(),
            self.city,
            self.state
        )
    }

    /// The introduction cut to the length search engines display.
    pub fn description(&self) -> String {
        self.content
            .introduction
            .chars()
            .take(META_DESCRIPTION_MAX_CHARS)
            .collect()
    }
}

impl<'a> From<&'a LandingPageRecord> for ExportSubject<'a> {
    fn from(record: &'a LandingPageRecord) -> Self {
        Self {
            city: &record.city,
            state: &record.state,
            keywords: &record.keywords,
            content: &record.content,
        }
    }
}

#[derive(Serialize)]
struct TemplateData<'a> {
    title: String,
    description: String,
    primary: &'a str,
    keywords: String,
    city: &'a str,
    state: &'a str,
    introduction: &'a str,
    why_us: &'a str,
    things_to_do: &'a str,
    faq: &'a [crate::model::FaqEntry],
    faq_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
}

impl<'a> TemplateData<'a> {
    fn new(subject: &ExportSubject<'a>) -> Self {
        Self {
            title: subject.title(),
            description: subject.description(),
            primary: subject.primary_keyword(),
            keywords: subject.keywords.joined(", "),
            city: subject.city,
            state: subject.state,
            introduction: &subject.content.introduction,
            why_us: &subject.content.why_us,
            things_to_do: &subject.content.things_to_do,
            faq: &subject.content.faq,
            faq_text: faq_text(&subject.content.faq),
            schema: None,
            year: None,
        }
    }
}

/// FAQ block of the text export: `### question` / answer entries separated by a blank line.
fn faq_text(faq: &[crate::model::FaqEntry]) -> String {
    faq.iter()
        .map(|entry| format!("### {}\n{}\n", entry.question, entry.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the plain-text export with the embedded templates.
pub fn render_text(subject: &ExportSubject<'_>) -> Result<String, AppError> {
    render_text_with(&ExportTemplates::embedded()?, subject)
}

/// Renders the HTML export with the embedded templates. `year` goes in the footer.
pub fn render_html(subject: &ExportSubject<'_>, year: i32) -> Result<String, AppError> {
    render_html_with(&ExportTemplates::embedded()?, subject, year)
}

pub fn render_text_with(
    templates: &ExportTemplates,
    subject: &ExportSubject<'_>,
) -> Result<String, AppError> {
    templates.render_text(&TemplateData::new(subject))
}

pub fn render_html_with(
    templates: &ExportTemplates,
    subject: &ExportSubject<'_>,
    year: i32,
) -> Result<String, AppError> {
    let mut data = TemplateData::new(subject);
    data.schema = Some(local_business_schema(subject)?);
    data.year = Some(year);
    templates.render_html(&data)
}

/// schema.org `LocalBusiness` JSON-LD, safe to embed in a `<script>` element.
pub fn local_business_schema(subject: &ExportSubject<'_>) -> Result<String, AppError> {
    let schema = json!({
        "@context": "https://schema.org",
        "@type": "LocalBusiness",
        "name": format!("{} Services", subject.primary_keyword()),
        "description": subject.description(),
        "address": {
            "@type": "PostalAddress",
            "addressLocality": subject.city,
            "addressRegion": subject.state,
        },
        "geo": {
            "@type": "GeoCoordinates",
        },
    });

    let rendered = serde_json::to_string_pretty(&schema).map_err(|e| AppError::InternalError {
        message: "Failed to serialize schema markup".to_string(),
        source: Some(Box::new(e)),
    })?;

    // A literal "</" would end the script element early
    Ok(rendered.replace("</", "<\\/"))
}
