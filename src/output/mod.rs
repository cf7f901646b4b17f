//! Output formatting for CLI display
//!
//! This module provides utilities for formatting photos, albums and tags in
//! the CLI. In quiet mode only the bare value is printed so results can be
//! piped into other tools.

use colored::Colorize;
use std::path::Path;

use crate::model::{AlbumSummary, DATE_DISPLAY_FORMAT, Photo, TagType};

/// Format a photo for listings: path, capture time, caption and tags
#[must_use]
pub fn photo_line(photo: &Photo, quiet: bool) -> String {
    if quiet {
        return photo.path().to_string();
    }
    let mut line = format!(
        "  {} {}",
        colorize_path(photo.path()),
        photo.date_taken().format(DATE_DISPLAY_FORMAT).to_string().dimmed()
    );
    if !photo.caption().is_empty() {
        line.push_str(&format!(" \"{}\"", photo.caption()));
    }
    if !photo.tags().is_empty() {
        let tags: Vec<String> = photo.tags().iter().map(ToString::to_string).collect();
        line.push_str(&format!(" [{}]", tags.join("; ").cyan()));
    }
    line
}

/// Format an album summary line
#[must_use]
pub fn album_line(summary: &AlbumSummary<'_>, quiet: bool) -> String {
    if quiet {
        summary.name.to_string()
    } else {
        format!("  {summary}")
    }
}

/// Format a tag type with its multiplicity
#[must_use]
pub fn tag_type_line(tag_type: &TagType, quiet: bool) -> String {
    if quiet {
        tag_type.name().to_string()
    } else if tag_type.allows_multiple_values() {
        format!("  {} {}", tag_type.name(), "(multiple values)".dimmed())
    } else {
        format!("  {} {}", tag_type.name(), "(single value)".dimmed())
    }
}

/// Color a path based on file existence (green if exists, red if missing)
#[must_use]
pub fn colorize_path(path: &str) -> String {
    if Path::new(path).exists() {
        path.green().to_string()
    } else {
        path.red().to_string()
    }
}

/// Informational message, suppressed in quiet mode
pub fn info(message: &str, quiet: bool) {
    if !quiet {
        println!("{message}");
    }
}

/// Success message, suppressed in quiet mode
pub fn success(message: &str, quiet: bool) {
    if !quiet {
        println!("{} {message}", "✓".green());
    }
}
