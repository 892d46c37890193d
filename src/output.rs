//! CLI output formatting.
//!
//! Output is information-first: each guide leads with its positional index
//! and title, with the source file and URL as indented context lines.
//!
//! ## Check
//!
//! ```text
//! v3 / en
//! 001 Add a pallet to the runtime
//!     Source: v3/en/basics/pallet-integration.md
//!     URL: /how-to-guides/v3/basics/pallet-integration
//! 002 Benchmark a pallet (not in menu)
//!     Source: v3/en/testing/benchmarking.md
//!     URL: /how-to-guides/v3/testing/benchmarking
//!
//! Config
//!     config.toml
//!     menus.toml (how-to-guides)
//! ```
//!
//! ## Build
//!
//! ```text
//! en
//! 001 Add a pallet to the runtime → how-to-guides/v3/basics/pallet-integration/index.html
//!
//! Generated 4 pages
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::{GenerateReport, page_pathname};
use crate::menu::{MenuCatalog, NavMenuProvider, same_page};
use crate::query::ContentIndex;
use crate::template::SECTION;
use serde::Serialize;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// One guide as listed by `check`.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub version: String,
    pub locale: String,
    pub slug: String,
    pub title: String,
    pub pathname: String,
    pub source: String,
    pub in_menu: bool,
}

/// Summaries of every indexed guide, in index order.
pub fn inventory(index: &ContentIndex, menus: &MenuCatalog, default_locale: &str) -> Vec<PageSummary> {
    let section = menus.section(SECTION);
    let menu_urls: Vec<&str> = section.flatten().iter().map(|e| e.url.as_str()).collect();
    index
        .docs()
        .map(|doc| PageSummary {
            version: doc.version.clone(),
            locale: doc.locale.clone(),
            slug: doc.frontmatter.slug.clone(),
            title: doc.frontmatter.title.clone(),
            pathname: page_pathname(&doc.frontmatter.slug, &doc.locale, default_locale),
            source: doc.relative_path.clone(),
            in_menu: menu_urls.iter().any(|u| same_page(u, &doc.frontmatter.slug)),
        })
        .collect()
}

/// Format `check` output: guides grouped by version and locale, then config files.
pub fn format_check_output(
    pages: &[PageSummary],
    menus: &MenuCatalog,
    source_root: &Path,
) -> Vec<String> {
    let mut lines = Vec::new();

    let mut groups: Vec<(&str, &str)> = pages
        .iter()
        .map(|p| (p.version.as_str(), p.locale.as_str()))
        .collect();
    groups.sort_unstable();
    groups.dedup();

    for (version, locale) in groups {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("{} / {}", version, locale));
        let group = pages
            .iter()
            .filter(|p| p.version == version && p.locale == locale);
        for (i, page) in group.enumerate() {
            let marker = if page.in_menu { "" } else { " (not in menu)" };
            lines.push(format!("{} {}{}", format_index(i + 1), page.title, marker));
            lines.push(format!("    Source: {}", page.source));
            lines.push(format!("    URL: {}", page.pathname));
        }
    }

    if pages.is_empty() {
        lines.push("No guides found".to_string());
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    }
    if source_root.join("menus.toml").exists() {
        let sections: Vec<&str> = menus.section_names().collect();
        lines.push(format!("    menus.toml ({})", sections.join(", ")));
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(pages: &[PageSummary], menus: &MenuCatalog, source_root: &Path) {
    for line in format_check_output(pages, menus, source_root) {
        println!("{}", line);
    }
}

/// Format build output: written pages grouped by locale, then a total.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    let mut locales: Vec<&str> = report.pages.iter().map(|p| p.locale.as_str()).collect();
    locales.sort_unstable();
    locales.dedup();

    for locale in locales {
        lines.push(locale.to_string());
        let group = report.pages.iter().filter(|p| p.locale == locale);
        for (i, page) in group.enumerate() {
            lines.push(format!(
                "{} {} \u{2192} {}",
                format_index(i + 1),
                page.title,
                page.output.display()
            ));
        }
        lines.push(String::new());
    }

    let count = report.pages.len();
    lines.push(format!(
        "Generated {} {}",
        count,
        if count == 1 { "page" } else { "pages" }
    ));
    lines
}

/// Print build output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedPage;
    use crate::test_helpers::setup_fixtures;
    use std::path::PathBuf;

    fn fixture_inventory() -> (tempfile::TempDir, Vec<PageSummary>, MenuCatalog) {
        let tmp = setup_fixtures();
        let index = ContentIndex::scan(tmp.path()).unwrap();
        let menus = MenuCatalog::load(tmp.path()).unwrap();
        let pages = inventory(&index, &menus, "en");
        (tmp, pages, menus)
    }

    #[test]
    fn inventory_marks_menu_membership() {
        let (_tmp, pages, _) = fixture_inventory();
        assert_eq!(pages.len(), 4);
        assert!(pages.iter().all(|p| p.in_menu));
    }

    #[test]
    fn inventory_prefixes_locale_paths() {
        let (_tmp, pages, _) = fixture_inventory();
        let zh = pages.iter().find(|p| p.locale == "zh-CN").unwrap();
        assert_eq!(
            zh.pathname,
            "/zh-CN/how-to-guides/v3/basics/pallet-integration"
        );
        assert_eq!(zh.source, "v3/zh-CN/basics/pallet-integration.md");
    }

    #[test]
    fn check_output_groups_by_version_and_locale() {
        let (tmp, pages, menus) = fixture_inventory();
        let lines = format_check_output(&pages, &menus, tmp.path());
        assert_eq!(lines[0], "v3 / en");
        assert!(lines.contains(&"v3 / zh-CN".to_string()));
        assert!(lines.contains(&"    Source: v3/en/basics/mint-token.md".to_string()));
        assert!(lines.contains(&"    config.toml".to_string()));
        assert!(lines.contains(&"    menus.toml (how-to-guides)".to_string()));
    }

    #[test]
    fn check_output_flags_pages_missing_from_menu() {
        let pages = vec![PageSummary {
            version: "v3".to_string(),
            locale: "en".to_string(),
            slug: "/orphan".to_string(),
            title: "Orphan".to_string(),
            pathname: "/orphan".to_string(),
            source: "v3/en/orphan.md".to_string(),
            in_menu: false,
        }];
        let lines = format_check_output(&pages, &MenuCatalog::default(), Path::new("/nonexistent"));
        assert_eq!(lines[1], "001 Orphan (not in menu)");
    }

    #[test]
    fn check_output_reports_empty_content() {
        let lines = format_check_output(&[], &MenuCatalog::default(), Path::new("/nonexistent"));
        assert_eq!(lines[0], "No guides found");
    }

    #[test]
    fn generate_output_lists_pages_and_total() {
        let report = GenerateReport {
            pages: vec![GeneratedPage {
                locale: "en".to_string(),
                title: "Mint a token".to_string(),
                pathname: "/htg/mint".to_string(),
                output: PathBuf::from("htg/mint/index.html"),
            }],
        };
        let lines = format_generate_output(&report);
        assert_eq!(lines[0], "en");
        assert_eq!(lines[1], "001 Mint a token \u{2192} htg/mint/index.html");
        assert_eq!(lines.last().unwrap(), "Generated 1 page");
    }
}
