//! Render-time data model shared by the query layer and the page template.
//!
//! Everything here is built once per page by the content index, handed to
//! [`crate::template::DocsTemplate::render`], and dropped when the render
//! finishes. Nothing is mutated after construction.

use serde::{Deserialize, Serialize};

/// Per-page context supplied by the build pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub slug: String,
    pub version: String,
}

/// Current navigation position: the page path plus an optional `#fragment`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    #[serde(default)]
    pub hash: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            hash: String::new(),
        }
    }
}

/// Result of the page query. `mdx` is `None` when no document matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    pub mdx: Option<DocRecord>,
}

/// A matched document: frontmatter, compiled body, and heading tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocRecord {
    pub frontmatter: Frontmatter,
    pub body: CompiledBody,
    pub table_of_contents: TableOfContents,
    pub file_absolute_path: String,
}

/// Document metadata parsed from the YAML block at the top of a guide.
///
/// Only `slug` and `title` are required; everything else falls back to an
/// empty or false value so partial frontmatter still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub hide_nav: bool,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub category: String,
}

impl Frontmatter {
    /// The difficulty as written, or `None` when absent or empty.
    ///
    /// Whitespace is kept: `"  "` is a difficulty like any other non-empty
    /// string. YAML `false`, `0` and empty values never get here, the
    /// frontmatter parser drops them.
    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref().filter(|d| !d.is_empty())
    }
}

/// Markdown body already compiled to HTML by the query layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompiledBody(pub String);

impl CompiledBody {
    pub fn as_html(&self) -> &str {
        &self.0
    }
}

/// Heading tree of a document, already truncated to the query's depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOfContents {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TocItem>,
}

impl TableOfContents {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Deepest nesting level in the tree (0 when empty).
    pub fn depth(&self) -> usize {
        fn depth_of(items: &[TocItem]) -> usize {
            items
                .iter()
                .map(|i| 1 + depth_of(&i.items))
                .max()
                .unwrap_or(0)
        }
        depth_of(&self.items)
    }
}

/// One heading: anchor url (`#id`), text, and nested sub-headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TocItem>,
}
