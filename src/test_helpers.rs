//! Shared test utilities for the htg-docs test suite.
//!
//! Provides the fixture content tree, fixed menus, and sample records so
//! template, component, and pipeline tests build their inputs the same way.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let index = ContentIndex::scan(tmp.path()).unwrap();
//! let record = sample_record("/how-to-guides/v3/basics/mint-token");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::markdown;
use crate::menu::{NavEntry, NavMenu, NavMenuProvider};
use crate::template::SECTION;
use crate::types::{DocRecord, Frontmatter};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_doc(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Menus
// =========================================================================

pub fn entry(name: &str, url: &str, items: Vec<NavEntry>) -> NavEntry {
    NavEntry {
        name: name.to_string(),
        url: url.to_string(),
        items,
    }
}

/// The how-to guides section menu used across tests.
pub fn how_to_menu() -> NavMenu {
    NavMenu {
        entries: vec![
            entry(
                "Basics",
                "/how-to-guides/v3/basics",
                vec![
                    entry(
                        "Add a pallet",
                        "/how-to-guides/v3/basics/pallet-integration",
                        vec![],
                    ),
                    entry("Mint a token", "/how-to-guides/v3/basics/mint-token", vec![]),
                ],
            ),
            entry("Testing", "/how-to-guides/v3/testing", vec![]),
        ],
    }
}

/// Fixed in-memory menus.
#[derive(Default)]
pub struct FixedMenus;

impl NavMenuProvider for FixedMenus {
    fn global(&self) -> NavMenu {
        NavMenu {
            entries: vec![
                entry("Docs", "/v3/docs", vec![]),
                entry("Tutorials", "/tutorials/v3", vec![]),
                entry("How-to guides", "/how-to-guides/v3", vec![]),
            ],
        }
    }

    fn section(&self, name: &str) -> NavMenu {
        if name == SECTION {
            how_to_menu()
        } else {
            NavMenu::default()
        }
    }
}

// =========================================================================
// Records
// =========================================================================

/// A matched document for `slug` with a small body and heading tree.
pub fn sample_record(slug: &str) -> DocRecord {
    let compiled = markdown::compile(
        "Mint your first token.\n\n## Setup\n\n### Dependencies\n\n#### Too deep\n",
        3,
    );
    DocRecord {
        frontmatter: Frontmatter {
            slug: slug.to_string(),
            title: "Mint a token".to_string(),
            section: "Basics".to_string(),
            category: "tokens".to_string(),
            ..Frontmatter::default()
        },
        body: compiled.body,
        table_of_contents: compiled.table_of_contents,
        file_absolute_path: "/content/v3/en/basics/mint-token.md".to_string(),
    }
}
