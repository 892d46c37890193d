//! # HTG Docs
//!
//! A static renderer for how-to guide documentation. Markdown guides with YAML
//! frontmatter become full HTML pages with site navigation, a breadcrumb, a
//! version switcher, a difficulty tag, previous/next links and an on-page
//! table of contents.
//!
//! # Architecture
//!
//! ```text
//! 1. Query     content/  →  ContentIndex     (frontmatter + raw markdown per slug)
//! 2. Compile   markdown  →  DocRecord        (HTML body + heading tree)
//! 3. Render    DocRecord →  dist/**/index.html  via DocsTemplate
//! ```
//!
//! The template never reads files or talks to the network. It receives the
//! query result, the location and the page context, asks a [`menu::NavMenuProvider`]
//! for menus and hands owned props to a [`components::Components`]
//! implementation. Both are traits so the template can be exercised with
//! recording doubles in tests.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Data shapes passed into the template (`Location`, `QueryResult`, `PageContext`) |
//! | [`frontmatter`] | YAML frontmatter split and parse |
//! | [`markdown`] | Markdown to HTML with heading anchors and a depth-limited TOC |
//! | [`query`] | Content directory index, answering the per-page document query |
//! | [`menu`] | Global and section menus loaded from `menus.toml` |
//! | [`components`] | Props types, the `Components` trait and the Maud site components |
//! | [`template`] | `DocsTemplate`, composing the page from its components |
//! | [`config`] | Layered `config.toml` loading, validation and CSS color variables |
//! | [`generate`] | Parallel render of every guide into the output directory |
//! | [`output`] | CLI output formatting for `build` and `check` |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup is
//! a build error and every interpolation is escaped. The only raw HTML that
//! reaches a page is the compiled markdown body.
//!
//! ## Slugs Are URLs
//!
//! A guide's URL is the `slug` in its frontmatter, not its file path. Files can
//! move between directories without breaking links, and the section menu in
//! `menus.toml` refers to guides by the same slug.
//!
//! ## Locale Prefixes
//!
//! Guides for the default locale are written at their slug. Every other locale
//! lives under `/<locale>`, mirroring the `content/<version>/<locale>/` layout.

pub mod components;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod markdown;
pub mod menu;
pub mod output;
pub mod query;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
