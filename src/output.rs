//! CLI output formatting for the build pipeline.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (record, category, page kind) is its semantic identity,
//! with counts and filesystem paths as indented context. Each report has a
//! `format_*` function (returns `Vec<String>`) for testability and a
//! `print_*` wrapper that writes to stdout. Format functions are pure: no
//! I/O, no side effects.
//!
//! # Output Format
//!
//! ## Catalog
//!
//! ```text
//! Catalog
//!     Source: games.json
//!     142 records: 128 games, 14 skipped
//!     Action: 40
//!     Racing: 22
//!     Skipped
//!         003 missing title (racing)
//!         017 unknown category ("arcade2")
//! ```
//!
//! ## Build summary
//!
//! ```text
//! Pages
//!     Home listing: 5
//!     Category indexes: 12
//!     Game details: 128
//! Assets
//!     Copied from source: 3
//!     Stock installed: 1
//! Generated 145 pages in 0.21s
//! ```
//!
//! A `Warnings` section appears between `Assets` and the closing line when
//! the run collected unresolved references or write failures.

use crate::catalog::{Catalog, Category, SkipReason, SkippedRecord};
use crate::config::SiteConfig;
use crate::render;
use crate::site::BuildReport;

/// At most this many reference samples per page in the warning list.
const UNRESOLVED_SAMPLES: usize = 3;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// One skipped record, led by its catalog position. The parenthesized
/// detail is whatever identification the record offered.
fn skipped_line(record: &SkippedRecord) -> String {
    let index = format_index(record.index + 1);
    match record.reason {
        SkipReason::UnknownCategory => format!("{index} unknown category (\"{}\")", record.detail),
        _ if record.detail.is_empty() => format!("{index} {}", record.reason),
        _ => format!("{index} {} ({})", record.reason, record.detail),
    }
}

// ============================================================================
// Catalog inventory
// ============================================================================

/// Format the catalog inventory: source file, record accounting, per-category
/// totals in navigation order, and every skipped record with its reason.
pub fn format_catalog_output(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Catalog".to_string());

    let source = catalog
        .source_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| catalog.source_file.display().to_string());
    lines.push(format!("    Source: {source}"));
    lines.push(format!(
        "    {} records: {} games, {} skipped",
        catalog.stats.total_records,
        catalog.games.len(),
        catalog.stats.skipped()
    ));

    for (category, total) in &catalog.category_totals {
        lines.push(format!("    {}: {}", category.label(), total));
    }

    if !catalog.skipped.is_empty() {
        lines.push("    Skipped".to_string());
        for record in &catalog.skipped {
            lines.push(format!("        {}", skipped_line(record)));
        }
    }

    lines
}

/// Print the catalog inventory to stdout.
pub fn print_catalog_output(catalog: &Catalog) {
    for line in format_catalog_output(catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Build summary
// ============================================================================

/// Format the end-of-build summary: pages by kind, asset installation,
/// collected warnings, and the closing line with the elapsed time.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    lines.push(format!("    Home listing: {}", report.home_pages));
    lines.push(format!("    Category indexes: {}", report.category_pages));
    lines.push(format!("    Game details: {}", report.detail_pages));

    lines.push("Assets".to_string());
    lines.push(format!("    Copied from source: {}", report.assets.copied));
    lines.push(format!(
        "    Stock installed: {}",
        report.assets.stock_installed
    ));

    let warnings = format_warnings(report);
    if !warnings.is_empty() {
        lines.push("Warnings".to_string());
        lines.extend(warnings);
    }

    let written = report.pages_written;
    let planned = report.pages_planned();
    let elapsed = format!("{:.2}s", report.elapsed.as_secs_f64());
    if written == planned {
        lines.push(format!("Generated {written} pages in {elapsed}"));
    } else {
        lines.push(format!("Generated {written} of {planned} pages in {elapsed}"));
    }

    lines
}

fn format_warnings(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(error) = &report.asset_error {
        lines.push(format!("    assets: {error}"));
    }
    for page in &report.unresolved {
        let shown: Vec<&str> = page
            .references
            .iter()
            .take(UNRESOLVED_SAMPLES)
            .map(String::as_str)
            .collect();
        let extra = page.references.len().saturating_sub(UNRESOLVED_SAMPLES);
        if extra > 0 {
            lines.push(format!(
                "    {}: unresolved {} (+{} more)",
                page.path,
                shown.join(", "),
                extra
            ));
        } else {
            lines.push(format!("    {}: unresolved {}", page.path, shown.join(", ")));
        }
    }
    for failure in &report.write_failures {
        lines.push(format!("    {}: {}", failure.path, failure.error));
    }
    lines
}

/// Print the build summary to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check inventory
// ============================================================================

/// Format what a build of this catalog would produce, without writing it.
pub fn format_check_output(catalog: &Catalog, config: &SiteConfig) -> Vec<String> {
    let home = render::home_page_count(catalog.games.len(), config.games_per_page);
    vec![
        "Site".to_string(),
        format!(
            "    Home listing: {} pages of {}",
            home, config.games_per_page
        ),
        format!("    Category indexes: {}", Category::ALL.len()),
        format!("    Game details: {}", catalog.games.len()),
    ]
}

/// Print the check inventory to stdout.
pub fn print_check_output(catalog: &Catalog, config: &SiteConfig) {
    for line in format_check_output(catalog, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
