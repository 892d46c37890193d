//! The page query and the content index that answers it.
//!
//! A page is looked up by `(locale, slug)`. The result carries the
//! frontmatter, the compiled body, the heading tree truncated to
//! [`TOC_MAX_DEPTH`], and the absolute source path. No match is not an error:
//! the result simply has no document.
//!
//! ## Content Layout
//!
//! ```text
//! content/
//! ├── config.toml                     # Site config (optional)
//! ├── menus.toml                      # Navigation menus (optional)
//! └── v3/                             # Version
//!     ├── en/                         # Locale
//!     │   └── basics/
//!     │       └── pallet-integration.md
//!     └── zh-CN/
//!         └── basics/
//!             └── pallet-integration.md
//! ```
//!
//! Any depth of subdirectories below the locale is allowed; the URL of a
//! page comes from its frontmatter `slug`, never from its file name.

use crate::frontmatter::{self, FrontmatterError};
use crate::markdown;
use crate::types::{DocRecord, Frontmatter, QueryResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Headings deeper than this never reach the table of contents.
pub const TOC_MAX_DEPTH: usize = 3;

const DOC_EXTENSIONS: &[&str] = &["md", "mdx"];

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{path}: {source}")]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },
    #[error("{path}: frontmatter field '{field}' must not be empty")]
    EmptyField { path: PathBuf, field: &'static str },
    #[error("{path}: slug {slug} may not contain '.' or '..' segments or backslashes")]
    InvalidSlug { path: PathBuf, slug: String },
    #[error("Duplicate slug {slug} in locale {locale}: {first} and {second}")]
    DuplicateSlug {
        locale: String,
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Parameters of the page query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocQuery {
    pub locale: String,
    pub slug: String,
    pub toc_max_depth: usize,
}

impl DocQuery {
    pub fn new(locale: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            slug: slug.into(),
            toc_max_depth: TOC_MAX_DEPTH,
        }
    }
}

/// Anything that can answer a [`DocQuery`].
pub trait ContentSource {
    fn query(&self, query: &DocQuery) -> Result<QueryResult, QueryError>;
}

/// One indexed guide.
#[derive(Debug, Clone)]
pub struct IndexedDoc {
    pub version: String,
    pub locale: String,
    pub frontmatter: Frontmatter,
    pub absolute_path: PathBuf,
    /// Path relative to the content root, `/`-separated.
    pub relative_path: String,
    /// Markdown after the frontmatter block.
    pub markdown: String,
}

/// Identifies one page to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRef<'a> {
    pub locale: &'a str,
    pub version: &'a str,
    pub slug: &'a str,
}

impl IndexedDoc {
    pub fn page_ref(&self) -> PageRef<'_> {
        PageRef {
            locale: &self.locale,
            version: &self.version,
            slug: &self.frontmatter.slug,
        }
    }
}

/// Canonical form of a slug: its non-empty segments joined by `/`.
///
/// `/a`, `/a/` and `a` share the key `a`, the same way they share an output
/// file. Lookups and duplicate detection both go through this.
pub fn slug_key(slug: &str) -> String {
    slug.split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.contains('\\') && slug.split('/').all(|s| s != "." && s != "..")
}

/// All guides under a content root, keyed by `(locale, slug_key)`.
#[derive(Debug, Default)]
pub struct ContentIndex {
    root: PathBuf,
    docs: BTreeMap<(String, String), IndexedDoc>,
}

impl ContentIndex {
    /// Walk `root/<version>/<locale>/**` and index every markdown file.
    pub fn scan(root: &Path) -> Result<Self, QueryError> {
        let root = fs::canonicalize(root)?;
        let mut docs: BTreeMap<(String, String), IndexedDoc> = BTreeMap::new();

        for version_dir in sorted_subdirs(&root)? {
            let version = dir_name(&version_dir);
            for locale_dir in sorted_subdirs(&version_dir)? {
                let locale = dir_name(&locale_dir);
                for doc in scan_locale(&root, &locale_dir, &version, &locale)? {
                    let key = (doc.locale.clone(), slug_key(&doc.frontmatter.slug));
                    if let Some(existing) = docs.get(&key) {
                        return Err(QueryError::DuplicateSlug {
                            locale: key.0,
                            slug: doc.frontmatter.slug,
                            first: existing.absolute_path.clone(),
                            second: doc.absolute_path,
                        });
                    }
                    docs.insert(key, doc);
                }
            }
        }

        Ok(Self { root, docs })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Every indexed guide, ordered by locale then slug key.
    pub fn docs(&self) -> impl Iterator<Item = &IndexedDoc> {
        self.docs.values()
    }

    /// Look up a guide; `slug` may differ from the indexed one by slashes.
    pub fn get(&self, locale: &str, slug: &str) -> Option<&IndexedDoc> {
        self.docs.get(&(locale.to_string(), slug_key(slug)))
    }
}

impl ContentSource for ContentIndex {
    fn query(&self, query: &DocQuery) -> Result<QueryResult, QueryError> {
        let Some(doc) = self.get(&query.locale, &query.slug) else {
            return Ok(QueryResult { mdx: None });
        };
        let compiled = markdown::compile(&doc.markdown, query.toc_max_depth);
        Ok(QueryResult {
            mdx: Some(DocRecord {
                frontmatter: doc.frontmatter.clone(),
                body: compiled.body,
                table_of_contents: compiled.table_of_contents,
                file_absolute_path: doc.absolute_path.to_string_lossy().into_owned(),
            }),
        })
    }
}

fn scan_locale(
    root: &Path,
    locale_dir: &Path,
    version: &str,
    locale: &str,
) -> Result<Vec<IndexedDoc>, QueryError> {
    let mut docs = Vec::new();
    let walker = WalkDir::new(locale_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e.path()));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_doc(entry.path()) {
            continue;
        }
        let path = entry.into_path();
        let source = fs::read_to_string(&path)?;
        let split = frontmatter::parse_document(&source).map_err(|source| {
            QueryError::Frontmatter {
                path: path.clone(),
                source,
            }
        })?;

        for (field, value) in [
            ("slug", &split.frontmatter.slug),
            ("title", &split.frontmatter.title),
        ] {
            if value.trim().is_empty() {
                return Err(QueryError::EmptyField { path, field });
            }
        }
        if !is_safe_slug(&split.frontmatter.slug) {
            return Err(QueryError::InvalidSlug {
                path,
                slug: split.frontmatter.slug,
            });
        }

        let relative_path = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        docs.push(IndexedDoc {
            version: version.to_string(),
            locale: locale.to_string(),
            markdown: split.body.to_string(),
            frontmatter: split.frontmatter,
            absolute_path: path,
            relative_path,
        });
    }
    Ok(docs)
}

fn sorted_subdirs(path: &Path) -> Result<Vec<PathBuf>, QueryError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !is_hidden(p))
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') && n.len() > 1)
}

fn is_doc(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DOC_EXTENSIONS.iter().any(|d| e.eq_ignore_ascii_case(d)))
}
