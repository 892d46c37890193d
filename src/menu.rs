//! Navigation menus.
//!
//! Pages get two menus: the global menu shared by every documentation
//! section, and the menu of the section the page belongs to. Both come from a
//! [`NavMenuProvider`] handed to the template, so tests can substitute fixed
//! menus without touching the filesystem.
//!
//! ## `menus.toml`
//!
//! ```toml
//! [[global]]
//! name = "Docs"
//! url = "/v3/getting-started/overview"
//!
//! [[global]]
//! name = "How-to guides"
//! url = "/how-to-guides/v3"
//!
//! [[sections.how-to-guides]]
//! name = "Basics"
//! url = "/how-to-guides/v3/basics"
//!
//! [[sections.how-to-guides.items]]
//! name = "Add a pallet"
//! url = "/how-to-guides/v3/basics/pallet-integration"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("menus.toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// An ordered navigation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavMenu {
    pub entries: Vec<NavEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavEntry {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavEntry>,
}

impl NavEntry {
    /// True if this entry or any descendant links to `url`.
    pub fn contains_url(&self, url: &str) -> bool {
        same_page(&self.url, url) || self.items.iter().any(|i| i.contains_url(url))
    }
}

impl NavMenu {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Depth-first, document-order list of every entry.
    pub fn flatten(&self) -> Vec<&NavEntry> {
        fn walk<'a>(entries: &'a [NavEntry], out: &mut Vec<&'a NavEntry>) {
            for entry in entries {
                out.push(entry);
                walk(&entry.items, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.entries, &mut out);
        out
    }
}

/// Compare two site paths ignoring a trailing slash.
pub fn same_page(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}

/// Stateless menu lookup used by the page template.
pub trait NavMenuProvider {
    /// Menu shared by all documentation sections.
    fn global(&self) -> NavMenu;
    /// Menu for one section, e.g. `how-to-guides`. Unknown sections are empty.
    fn section(&self, name: &str) -> NavMenu;
}

/// Menus loaded from `menus.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuCatalog {
    global: Vec<NavEntry>,
    sections: BTreeMap<String, Vec<NavEntry>>,
}

impl MenuCatalog {
    /// Load `menus.toml` from `dir`. A missing file yields empty menus.
    pub fn load(dir: &Path) -> Result<Self, MenuError> {
        let path = dir.join("menus.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

impl NavMenuProvider for MenuCatalog {
    fn global(&self) -> NavMenu {
        NavMenu {
            entries: self.global.clone(),
        }
    }

    fn section(&self, name: &str) -> NavMenu {
        NavMenu {
            entries: self.sections.get(name).cloned().unwrap_or_default(),
        }
    }
}
