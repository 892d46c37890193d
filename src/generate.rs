//! Static site generation.
//!
//! Renders every indexed guide through [`DocsTemplate`] and writes one
//! `index.html` per page. Pages are independent, so they render in parallel
//! on the rayon pool; the template itself stays single-threaded per page.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── how-to-guides/v3/basics/pallet-integration/index.html   # default locale
//! └── zh-CN/
//!     └── how-to-guides/v3/basics/pallet-integration/index.html
//! ```
//!
//! The page URL is the frontmatter slug, prefixed with `/<locale>` for every
//! locale except the configured default.

use crate::components::{Components, SiteComponents};
use crate::config::{self, SiteConfig};
use crate::menu::NavMenuProvider;
use crate::query::{ContentIndex, ContentSource, DocQuery, IndexedDoc, PageRef, QueryError};
use crate::template::{DocsTemplate, RenderError};
use crate::types::{Location, PageContext};
use maud::Markup;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Query error: {0}")]
    Query(#[from] QueryError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// A page written by [`generate`].
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPage {
    pub locale: String,
    pub title: String,
    pub pathname: String,
    /// Output file relative to the output directory.
    pub output: PathBuf,
}

#[derive(Debug, Default, Serialize)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
}

/// URL path of a page: the slug, under `/<locale>` for non-default locales.
pub fn page_pathname(slug: &str, locale: &str, default_locale: &str) -> String {
    let slug = if slug.starts_with('/') {
        slug.to_string()
    } else {
        format!("/{slug}")
    };
    if locale == default_locale {
        slug
    } else {
        format!("/{locale}{slug}")
    }
}

/// `index.html` location for a page path, relative to the output directory.
pub fn output_file(pathname: &str) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in pathname.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.join("index.html")
}

/// Full stylesheet: color variables from config followed by the base styles.
pub fn site_css(config: &SiteConfig) -> String {
    format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC)
}

/// Query one page and render it.
pub fn render_page<S, M, C>(
    source: &S,
    template: &DocsTemplate<'_, M, C>,
    page: PageRef<'_>,
    default_locale: &str,
) -> Result<Markup, GenerateError>
where
    S: ContentSource + ?Sized,
    M: NavMenuProvider + ?Sized,
    C: Components + ?Sized,
{
    let data = source.query(&DocQuery::new(page.locale, page.slug))?;
    let location = Location::new(page_pathname(page.slug, page.locale, default_locale));
    let context = PageContext {
        slug: page.slug.to_string(),
        version: page.version.to_string(),
    };
    Ok(template.render(&location, &data, &context)?)
}

/// Render every indexed page into `output_dir`.
pub fn generate<M>(
    index: &ContentIndex,
    menus: &M,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError>
where
    M: NavMenuProvider + Sync + ?Sized,
{
    fs::create_dir_all(output_dir)?;
    let css = site_css(config);
    let default_locale = config.site.default_locale.as_str();
    let docs: Vec<&IndexedDoc> = index.docs().collect();

    let mut pages = docs
        .par_iter()
        .map(|doc| -> Result<GeneratedPage, GenerateError> {
            let components =
                SiteComponents::new(config, index.root(), &css).with_locale(&doc.locale);
            let template = DocsTemplate::new(menus, &components);
            let html = render_page(index, &template, doc.page_ref(), default_locale)?;

            let pathname = page_pathname(&doc.frontmatter.slug, &doc.locale, default_locale);
            let output = output_file(&pathname);
            let target = output_dir.join(&output);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, html.into_string())?;

            Ok(GeneratedPage {
                locale: doc.locale.clone(),
                title: doc.frontmatter.title.clone(),
                pathname,
                output,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    pages.sort_by(|a, b| a.output.cmp(&b.output));
    Ok(GenerateReport { pages })
}
