use chrono::{TimeZone, Utc};
use localpage::{
    deliver, export_filename, plan_export, render_html, render_text, DeliveryTarget, ExportFormat,
    ExportOptions, ExportSubject, FaqEntry, GenerationParams, Keywords, LandingContent,
    LandingPageRecord,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn params(city: &str) -> GenerationParams {
    GenerationParams::new(
        Keywords::collect(["plumbing", "drain cleaning"]).unwrap(),
        city,
        "Texas",
    )
    .unwrap()
}

fn content() -> LandingContent {
    LandingContent {
        introduction: "Fast plumbing help across Austin.".into(),
        why_us: "Licensed local crews.".into(),
        things_to_do: "Swim at Barton Springs.".into(),
        faq: vec![
            FaqEntry::new("Do you work weekends?", "Yes, every weekend."),
            FaqEntry::new("Are estimates free?", "Always."),
        ],
    }
}

#[test]
fn test_text_export_layout() {
    let params = params("Austin");
    let content = content();

    let text = render_text(&ExportSubject::new(&params, &content)).unwrap();

    assert!(text.starts_with(
        "# plumbing Services in Austin, Texas\n\nKeywords: plumbing, drain cleaning\n"
    ));
    let sections = [
        "## Introduction\nFast plumbing help across Austin.",
        "## Why Choose Us\nLicensed local crews.",
        "## Things to Do in Austin, Texas\nSwim at Barton Springs.",
        "## Frequently Asked Questions",
        "### Do you work weekends?\nYes, every weekend.",
        "### Are estimates free?\nAlways.",
        "Ready to Get Started? Contact us today to discuss your plumbing, drain cleaning needs in Austin, Texas.",
    ];
    let mut cursor = 0;
    for section in sections {
        let found = text[cursor..]
            .find(section)
            .unwrap_or_else(|| panic!("missing or out of order: {section}"));
        cursor += found + section.len();
    }
}

#[test]
fn test_text_export_keeps_markup_verbatim() {
    let params = params("Austin");
    let mut content = content();
    content.why_us = "We are <b>fast</b> & fair".into();

    let text = render_text(&ExportSubject::new(&params, &content)).unwrap();

    assert!(text.contains("We are <b>fast</b> & fair"));
}

#[test]
fn test_html_export_metadata_and_footer() {
    let params = params("Austin");
    let content = content();

    let html = render_html(&ExportSubject::new(&params, &content), 2031).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>plumbing Services in Austin, Texas</title>"));
    assert!(html.contains(
        r#"<meta name="description" content="Fast plumbing help across Austin.">"#
    ));
    assert!(html.contains(
        r#"<meta name="keywords" content="plumbing, drain cleaning, Austin, Texas">"#
    ));
    assert!(html.contains(r#"<script type="application/ld+json">"#));
    assert!(html.contains(r#""@type": "LocalBusiness""#));
    assert!(html.contains(r#""addressLocality": "Austin""#));
    assert!(html.contains("<h3>Do you work weekends?</h3>"));
    assert!(html.contains("<h3>Are estimates free?</h3>"));
    assert!(html.contains("© 2031 plumbing Services. All rights reserved."));
}

#[test]
fn test_html_export_escapes_generated_copy() {
    let params = params("Austin");
    let mut content = content();
    content.introduction = "<script>alert(1)</script> Best plumbers".into();

    let html = render_html(&ExportSubject::new(&params, &content), 2024).unwrap();

    assert!(html.contains("<p>&lt;script&gt;alert(1)&lt;/script&gt; Best plumbers</p>"));
    // Only the JSON-LD element itself is closed
    assert_eq!(html.matches("</script>").count(), 1);
    assert!(html.contains(r#"<\/script>"#));
}

#[test]
fn test_meta_description_is_bounded() {
    let params = params("Austin");
    let mut content = content();
    content.introduction = "a".repeat(400);

    let subject = ExportSubject::new(&params, &content);

    assert_eq!(subject.description().chars().count(), 155);
}

#[test]
fn test_export_filenames() {
    assert_eq!(
        export_filename("San Antonio", "Texas", "Drain Cleaning", "html"),
        "san-antonio-texas-drain-cleaning.html"
    );
    assert_eq!(
        export_filename("Austin", "Texas", "heating/cooling", "txt"),
        "austin-texas-heating_cooling.txt"
    );
    assert_eq!(ExportFormat::Print.extension(), "html");
}

#[test]
fn test_export_writes_file_into_out_dir() {
    let dir = TempDir::new().unwrap();
    let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let record = LandingPageRecord::from_generation(&params("Round Rock"), content(), now);
    let mut options = ExportOptions::new(ExportFormat::Html);
    options.out_dir = Some(dir.path().join("exports"));

    let plan = plan_export(&record, &options, now).unwrap();
    let report = deliver(plan).into_result().unwrap();

    let expected = dir.path().join("exports").join("round-rock-texas-plumbing.html");
    assert_eq!(report.completed.len(), 1);
    assert!(matches!(
        &report.completed[0].operation,
        DeliveryTarget::WriteFile { path, .. } if path == &expected
    ));
    let written = fs::read_to_string(expected).unwrap();
    assert!(written.contains("<title>plumbing Services in Round Rock, Texas</title>"));
    assert!(written.contains("© 2025 plumbing Services."));
}

#[test]
fn test_template_directory_overrides_embedded_layout() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("landing.txt.hbs"), "CUSTOM {{title}} / {{primary}}").unwrap();
    fs::write(dir.path().join("landing.html.hbs"), "<p>{{city}}</p>").unwrap();
    let now = Utc::now();
    let record = LandingPageRecord::from_generation(&params("Austin"), content(), now);
    let mut options = ExportOptions::new(ExportFormat::Text);
    options.stdout = true;
    options.templates = Some(dir.path().to_path_buf());

    let plan = plan_export(&record, &options, now).unwrap();

    assert_eq!(
        plan.operations,
        vec![DeliveryTarget::PrintToStdout {
            content: "CUSTOM plumbing Services in Austin, Texas / plumbing".to_string()
        }]
    );
}

#[test]
fn test_missing_template_directory_is_reported() {
    let dir = TempDir::new().unwrap();
    let record =
        LandingPageRecord::from_generation(&params("Austin"), content(), Utc::now());
    let mut options = ExportOptions::new(ExportFormat::Html);
    options.templates = Some(dir.path().join("nope"));

    let err = plan_export(&record, &options, Utc::now()).unwrap_err();

    assert!(matches!(err, localpage::AppError::TemplateNotFound { .. }));
}
