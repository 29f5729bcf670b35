//! Terminal rendering of saved pages for `list` and `show`.

use super::relative_time::time_ago;
use crate::model::LandingPageRecord;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// One block per saved page, most recent first.
pub fn render_listing<'a, I>(pages: I, now: DateTime<Utc>) -> String
where
    I: IntoIterator<Item = &'a LandingPageRecord>,
{
    let mut out = String::new();
    for page in pages {
        let _ = writeln!(out, "{}  {}", page.id.short(), page.headline());
        let _ = writeln!(
            out,
            "          Keywords: {} | Tone: {} | Created {}",
            page.keywords,
            page.tone,
            time_ago(page.created_at, now)
        );
    }

    if out.is_empty() {
        out.push_str("No saved landing pages yet.\n");
    }
    out
}

/// Full view of one saved page.
pub fn render_details(page: &LandingPageRecord, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", page.headline());
    let _ = writeln!(out, "ID:       {}", page.id);
    if let Some(company) = &page.company_name {
        let _ = writeln!(out, "Company:  {}", company);
    }
    let _ = writeln!(out, "Keywords: {}", page.keywords);
    let _ = writeln!(out, "Tone:     {}", page.tone);
    let _ = writeln!(
        out,
        "Created:  {} ({})",
        page.created_at.format("%Y-%m-%d %H:%M UTC"),
        time_ago(page.created_at, now)
    );

    let content = &page.content;
    let _ = writeln!(out, "\nIntroduction\n{}", content.introduction);
    let _ = writeln!(out, "\nWhy Choose Us\n{}", content.why_us);
    let _ = writeln!(
        out,
        "\nThings to Do in {}, {}\n{}",
        page.city, page.state, content.things_to_do
    );
    let _ = writeln!(out, "\nFrequently Asked Questions");
    for entry in &content.faq {
        let _ = writeln!(out, "\nQ: {}\nA: {}", entry.question, entry.answer);
    }
    out
}
