// src/output/paths.rs
//! Pure functions for export filenames and paths. No I/O here.

use crate::constants::{APP_DATA_DIR_NAME, FILENAME_MAX_CHARS};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// `{city}-{state}-{primary}.{ext}`, lowercased, whitespace runs turned into `-`.
pub fn export_filename(city: &str, state: &str, primary_keyword: &str, extension: &str) -> String {
    let stem = format!("{}-{}-{}", city.trim(), state.trim(), primary_keyword.trim()).to_lowercase();
    let stem = WHITESPACE_RUN.replace_all(&stem, "-");
    format!("{}.{}", sanitize_filename(&stem), extension)
}

/// Where the print preview of an export is written before it is opened.
pub fn print_preview_path(filename: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("{}-print", APP_DATA_DIR_NAME))
        .join(filename)
}

/// `filename` inside `dir`, or in the working directory when no dir is given.
pub fn export_path(dir: Option<&Path>, filename: &str) -> PathBuf {
    match dir {
        Some(dir) => dir.join(filename),
        None => PathBuf::from(filename),
    }
}

/// Replaces characters that are unsafe in filenames and bounds the length.
pub fn sanitize_filename(name: &str) -> String {
    let safe_name: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let mut safe_name: String = safe_name
        .trim()
        .trim_matches('.')
        .chars()
        .take(FILENAME_MAX_CHARS)
        .collect();

    if safe_name.is_empty() {
        safe_name = "unnamed".to_string();
    }
    safe_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_filename_follows_location_and_keyword() {
        assert_eq!(
            export_filename("Austin", "Texas", "plumbing", "txt"),
            "austin-texas-plumbing.txt"
        );
        assert_eq!(
            export_filename("San Antonio", "TX", "Drain  Cleaning", "html"),
            "san-antonio-tx-drain-cleaning.html"
        );
    }

    #[test]
    fn export_filename_strips_unsafe_characters() {
        assert_eq!(
            export_filename("Winston/Salem", "NC", "HVAC: repair?", "txt"),
            "winston_salem-nc-hvac_-repair_.txt"
        );
    }

    #[test]
    fn sanitize_filename_rules() {
        assert_eq!(sanitize_filename("Hello/World"), "Hello_World");
        assert_eq!(sanitize_filename("   spaces   "), "spaces");
        assert_eq!(sanitize_filename("...dots..."), "dots");
        assert_eq!(sanitize_filename(""), "unnamed");
        assert_eq!(sanitize_filename(&"é".repeat(150)).chars().count(), 100);
    }

    #[test]
    fn export_path_uses_dir_when_given() {
        assert_eq!(
            export_path(Some(Path::new("/out")), "a.txt"),
            PathBuf::from("/out/a.txt")
        );
        assert_eq!(export_path(None, "a.txt"), PathBuf::from("a.txt"));
        assert!(print_preview_path("a.html").ends_with("localpage-print/a.html"));
    }
}
