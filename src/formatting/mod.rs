// src/formatting/mod.rs
//! Renders landing pages for export files and for the terminal.

pub mod export;
pub mod listing;
pub mod relative_time;
pub mod templates;

pub use self::export::{
    local_business_schema, render_html, render_html_with, render_text, render_text_with,
    ExportFormat, ExportSubject,
};
pub use self::listing::{render_details, render_listing};
pub use self::relative_time::time_ago;
pub use self::templates::ExportTemplates;
