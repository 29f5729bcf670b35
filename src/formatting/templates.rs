// src/formatting/templates.rs
//! Handlebars registries for the text and HTML exports.
//!
//! Both templates ship inside the binary. A directory holding
//! `landing.txt.hbs` and `landing.html.hbs` can replace them.

use crate::error::AppError;
use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

pub const TEXT_TEMPLATE: &str = "landing.txt";
pub const HTML_TEMPLATE: &str = "landing.html";

const EMBEDDED_TEXT: &str = include_str!("../../templates/landing.txt.hbs");
const EMBEDDED_HTML: &str = include_str!("../../templates/landing.html.hbs");

/// Compiled export templates.
pub struct ExportTemplates {
    text: Handlebars<'static>,
    html: Handlebars<'static>,
}

impl ExportTemplates {
    /// The templates compiled into the binary.
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_sources(EMBEDDED_TEXT, EMBEDDED_HTML)
    }

    /// Loads `landing.txt.hbs` and `landing.html.hbs` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, AppError> {
        let text = read_template(dir, TEXT_TEMPLATE)?;
        let html = read_template(dir, HTML_TEMPLATE)?;
        log::debug!("Loaded export templates from {}", dir.display());
        Self::from_sources(&text, &html)
    }

    fn from_sources(text: &str, html: &str) -> Result<Self, AppError> {
        // Plain text goes out verbatim; HTML keeps the default escaping
        let mut text_registry = Handlebars::new();
        text_registry.set_strict_mode(true);
        text_registry.register_escape_fn(handlebars::no_escape);
        register(&mut text_registry, TEXT_TEMPLATE, text)?;

        let mut html_registry = Handlebars::new();
        html_registry.set_strict_mode(true);
        register(&mut html_registry, HTML_TEMPLATE, html)?;

        Ok(Self {
            text: text_registry,
            html: html_registry,
        })
    }

    pub(crate) fn render_text<T: Serialize>(&self, data: &T) -> Result<String, AppError> {
        render(&self.text, TEXT_TEMPLATE, data)
    }

    pub(crate) fn render_html<T: Serialize>(&self, data: &T) -> Result<String, AppError> {
        render(&self.html, HTML_TEMPLATE, data)
    }
}

impl std::fmt::Debug for ExportTemplates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportTemplates").finish_non_exhaustive()
    }
}

fn read_template(dir: &Path, name: &str) -> Result<String, AppError> {
    let path = dir.join(format!("{}.hbs", name));
    std::fs::read_to_string(&path).map_err(|e| AppError::TemplateNotFound {
        path: path.display().to_string(),
        source: e,
    })
}

fn register(registry: &mut Handlebars<'static>, name: &str, source: &str) -> Result<(), AppError> {
    registry
        .register_template_string(name, source)
        .map_err(|e| AppError::TemplateRenderError {
            name: name.to_string(),
            message: e.to_string(),
        })
}

fn render<T: Serialize>(registry: &Handlebars<'_>, name: &str, data: &T) -> Result<String, AppError> {
    registry
        .render(name, data)
        .map_err(|e| AppError::TemplateRenderError {
            name: name.to_string(),
            message: e.to_string(),
        })
}
