//! Page chrome components.
//!
//! The page template never builds chrome markup itself: it hands each piece a
//! props struct and places whatever comes back. [`Components`] is that seam.
//! [`SiteComponents`] is the HTML implementation used for real builds; tests
//! swap in a recorder to check exactly which props each piece received.
//!
//! All markup is produced with [maud](https://maud.lambda.xyz/), so
//! interpolated text is escaped. The only unescaped insertion is the compiled
//! markdown body, which pulldown-cmark already produced as HTML.

use crate::config::SiteConfig;
use crate::menu::{NavEntry, NavMenu, same_page};
use crate::types::{CompiledBody, TableOfContents, TocItem};
use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;

/// Head metadata. `title` is `None` when the page query matched nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeoProps {
    pub title: Option<String>,
}

/// Shared by the mobile and desktop navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavProps {
    pub pathname: String,
    pub hash_link: String,
    pub side_nav: NavMenu,
    pub global_nav: NavMenu,
    /// Index of the global menu entry this page family belongs to.
    pub template_id: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbProps {
    pub section: String,
    pub section_url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionControlProps {
    pub version: String,
    pub slug: String,
    pub absolute_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTagProps {
    pub difficulty: String,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdxBodyProps {
    pub body: CompiledBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastUpdateProps {
    pub absolute_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BottomButtonsProps {
    pub menu: NavMenu,
    pub page_slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocProps {
    pub headings: TableOfContents,
}

/// One method per chrome piece placed by the page template.
pub trait Components {
    /// Wrap the page in a full HTML document.
    fn layout(&self, head: Markup, content: Markup) -> Markup;
    fn seo(&self, props: SeoProps) -> Markup;
    fn docs_nav_mobile(&self, props: NavProps) -> Markup;
    fn docs_nav(&self, props: NavProps) -> Markup;
    fn breadcrumb_nav(&self, props: BreadcrumbProps) -> Markup;
    fn version_control(&self, props: VersionControlProps) -> Markup;
    fn doc_tag(&self, props: DocTagProps) -> Markup;
    fn mdx_body(&self, props: MdxBodyProps) -> Markup;
    fn last_update_github(&self, props: LastUpdateProps) -> Markup;
    fn bottom_buttons(&self, props: BottomButtonsProps) -> Markup;
    fn table_of_content(&self, props: TocProps) -> Markup;
}

/// HTML chrome for a real site build.
pub struct SiteComponents<'a> {
    config: &'a SiteConfig,
    content_root: &'a Path,
    css: &'a str,
    lang: &'a str,
    /// `/<locale>` for non-default locales, prepended to every site link.
    link_prefix: String,
}

impl<'a> SiteComponents<'a> {
    pub fn new(config: &'a SiteConfig, content_root: &'a Path, css: &'a str) -> Self {
        Self {
            config,
            content_root,
            css,
            lang: &config.site.default_locale,
            link_prefix: String::new(),
        }
    }

    /// Render for `locale`: sets the document `lang` and, unless it is the
    /// default locale, points site links under `/<locale>`.
    ///
    /// Menus and slugs stay locale-free; matching the current page happens
    /// on the unprefixed path and only the emitted `href`s carry the prefix.
    pub fn with_locale(mut self, locale: &'a str) -> Self {
        self.lang = locale;
        self.link_prefix = if locale == self.config.site.default_locale {
            String::new()
        } else {
            format!("/{locale}")
        };
        self
    }

    /// Link to a site path as seen from this locale. External links and
    /// anchors are left alone.
    fn href(&self, url: &str) -> String {
        if url.starts_with('/') && !url.starts_with("//") {
            format!("{}{}", self.link_prefix, url)
        } else {
            url.to_string()
        }
    }

    /// The current pathname with this locale's prefix removed.
    fn local_path<'p>(&self, pathname: &'p str) -> &'p str {
        if self.link_prefix.is_empty() {
            return pathname;
        }
        match pathname.strip_prefix(self.link_prefix.as_str()) {
            Some(rest) if rest.is_empty() => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => pathname,
        }
    }

    /// Source path relative to the content root, `/`-separated.
    fn relative_source(&self, absolute_path: &str) -> String {
        let path = Path::new(absolute_path);
        match path.strip_prefix(self.content_root) {
            Ok(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    fn nav_lists(&self, props: &NavProps) -> Markup {
        let pathname = self.local_path(&props.pathname);
        html! {
            ul.global-nav {
                @for (idx, entry) in props.global_nav.entries.iter().enumerate() {
                    li class=[(idx == props.template_id).then_some("active")] {
                        a href=(self.href(&entry.url)) { (entry.name) }
                    }
                }
            }
            ul.side-nav {
                @for entry in &props.side_nav.entries {
                    (self.nav_entry(entry, pathname, &props.hash_link))
                }
            }
        }
    }

    fn nav_entry(&self, entry: &NavEntry, pathname: &str, hash: &str) -> Markup {
        let current = is_current(&entry.url, pathname, hash);
        let expanded = !entry.items.is_empty() && entry.contains_url(pathname);
        let class = match (current, expanded) {
            (true, true) => Some("current expanded"),
            (true, false) => Some("current"),
            (false, true) => Some("expanded"),
            (false, false) => None,
        };
        html! {
            li class=[class] {
                a href=(self.href(&entry.url)) aria-current=[current.then_some("page")] { (entry.name) }
                @if !entry.items.is_empty() {
                    ul {
                        @for child in &entry.items {
                            (self.nav_entry(child, pathname, hash))
                        }
                    }
                }
            }
        }
    }
}

/// Is `url` the page (or page anchor) currently shown?
fn is_current(url: &str, pathname: &str, hash: &str) -> bool {
    if !hash.is_empty() && url.contains('#') {
        return url == format!("{pathname}{hash}");
    }
    same_page(url, pathname)
}

fn toc_list(items: &[TocItem]) -> Markup {
    html! {
        ul {
            @for item in items {
                li {
                    a href=(item.url) { (item.title) }
                    @if !item.items.is_empty() {
                        (toc_list(&item.items))
                    }
                }
            }
        }
    }
}

/// Swap the version segment of `slug` for `target`.
///
/// `/how-to-guides/v3/basics/x` with current `v3` and target `v2` becomes
/// `/how-to-guides/v2/basics/x`. A slug without the segment is returned as is.
pub fn version_url(slug: &str, current: &str, target: &str) -> String {
    let needle = format!("/{current}/");
    if slug.contains(&needle) {
        slug.replacen(&needle, &format!("/{target}/"), 1)
    } else if let Some(stripped) = slug.strip_suffix(&format!("/{current}")) {
        format!("{stripped}/{target}")
    } else {
        slug.to_string()
    }
}

/// Modification date of a file as `YYYY-MM-DD`, if the filesystem reports one.
fn modified_date(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    let date: DateTime<Utc> = modified.into();
    Some(date.format("%Y-%m-%d").to_string())
}

impl Components for SiteComponents<'_> {
    fn layout(&self, head: Markup, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang=(self.lang) {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    (head)
                    style { (PreEscaped(self.css)) }
                }
                body {
                    (content)
                }
            }
        }
    }

    fn seo(&self, props: SeoProps) -> Markup {
        let site = &self.config.site.title;
        let full = match &props.title {
            Some(title) => format!("{title} | {site}"),
            None => site.clone(),
        };
        html! {
            title { (full) }
            meta property="og:title" content=(full);
            meta property="og:site_name" content=(site);
        }
    }

    fn docs_nav_mobile(&self, props: NavProps) -> Markup {
        let pathname = self.local_path(&props.pathname);
        let current = props
            .side_nav
            .flatten()
            .into_iter()
            .find(|e| is_current(&e.url, pathname, &props.hash_link))
            .map_or("Menu", |e| e.name.as_str());
        html! {
            details.docs-nav-mobile data-template=(props.template_id) {
                summary { (current) }
                (self.nav_lists(&props))
            }
        }
    }

    fn docs_nav(&self, props: NavProps) -> Markup {
        html! {
            nav.docs-nav aria-label="Documentation" data-template=(props.template_id) {
                (self.nav_lists(&props))
            }
        }
    }

    fn breadcrumb_nav(&self, props: BreadcrumbProps) -> Markup {
        html! {
            nav.breadcrumb aria-label="Breadcrumb" {
                a href=(self.href(&props.section_url)) { (props.section) }
                span.separator { " › " }
                span.current { (props.title) }
            }
        }
    }

    fn version_control(&self, props: VersionControlProps) -> Markup {
        let relative = self.relative_source(&props.absolute_path);
        html! {
            div.version-control {
                select.version-select aria-label="Version" onchange="location.href=this.value" {
                    @for v in &self.config.versions {
                        option value=(self.href(&version_url(&props.slug, &props.version, v)))
                            selected[*v == props.version] { (v) }
                    }
                }
                a.edit-link href=(self.config.github.edit_url(&relative))
                    target="_blank" rel="noopener" { "Edit on GitHub" }
            }
        }
    }

    fn doc_tag(&self, props: DocTagProps) -> Markup {
        html! {
            div.doc-tag {
                span.difficulty data-level=(props.difficulty.to_lowercase()) { (props.difficulty) }
                @if let Some(duration) = &props.duration {
                    span.duration { (duration) }
                }
            }
        }
    }

    fn mdx_body(&self, props: MdxBodyProps) -> Markup {
        PreEscaped(props.body.0)
    }

    fn last_update_github(&self, props: LastUpdateProps) -> Markup {
        let relative = self.relative_source(&props.absolute_path);
        let date = modified_date(Path::new(&props.absolute_path));
        html! {
            a.last-update href=(self.config.github.history_url(&relative))
                target="_blank" rel="noopener" {
                "Last updated"
                @if let Some(date) = date {
                    " " time datetime=(date) { (date) }
                }
                " on GitHub"
            }
        }
    }

    fn bottom_buttons(&self, props: BottomButtonsProps) -> Markup {
        let entries = props.menu.flatten();
        let Some(idx) = entries
            .iter()
            .position(|e| same_page(&e.url, &props.page_slug))
        else {
            return html! {};
        };
        let prev = idx.checked_sub(1).and_then(|i| entries.get(i));
        let next = entries.get(idx + 1);
        html! {
            nav.bottom-buttons aria-label="Pagination" {
                @if let Some(prev) = prev {
                    a.prev href=(self.href(&prev.url)) rel="prev" { "← " (prev.name) }
                }
                @if let Some(next) = next {
                    a.next href=(self.href(&next.url)) rel="next" { (next.name) " →" }
                }
            }
        }
    }

    fn table_of_content(&self, props: TocProps) -> Markup {
        if props.headings.is_empty() {
            return html! {};
        }
        html! {
            nav.table-of-contents aria-label="On this page" {
                h2 { "On this page" }
                (toc_list(&props.headings.items))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{entry, how_to_menu};
    use std::path::PathBuf;

    fn with_components<F: FnOnce(&SiteComponents<'_>)>(f: F) {
        let config = SiteConfig {
            versions: vec!["v3".to_string(), "v2".to_string()],
            ..SiteConfig::default()
        };
        let root = PathBuf::from("/site/content");
        let components = SiteComponents::new(&config, &root, "body{}");
        f(&components);
    }

    fn nav_props(pathname: &str) -> NavProps {
        NavProps {
            pathname: pathname.to_string(),
            hash_link: String::new(),
            side_nav: how_to_menu(),
            global_nav: NavMenu {
                entries: vec![
                    entry("Docs", "/v3/docs", vec![]),
                    entry("Tutorials", "/tutorials/v3", vec![]),
                    entry("How-to guides", "/how-to-guides/v3", vec![]),
                ],
            },
            template_id: 2,
        }
    }

    #[test]
    fn layout_wraps_document() {
        with_components(|c| {
            let doc = c.layout(html! { title { "T" } }, html! { p { "x" } }).into_string();
            assert!(doc.starts_with("<!DOCTYPE html>"));
            assert!(doc.contains(r#"<html lang="en">"#));
            assert!(doc.contains("<style>body{}</style>"));
            assert!(doc.contains("<title>T</title>"));
        });
    }

    #[test]
    fn seo_appends_site_title() {
        with_components(|c| {
            let head = c
                .seo(SeoProps {
                    title: Some("Mint a token".to_string()),
                })
                .into_string();
            assert!(head.contains("<title>Mint a token | Developer Hub</title>"));
        });
    }

    #[test]
    fn seo_tolerates_missing_title() {
        with_components(|c| {
            let head = c.seo(SeoProps { title: None }).into_string();
            assert!(head.contains("<title>Developer Hub</title>"));
        });
    }

    #[test]
    fn docs_nav_marks_active_global_entry() {
        with_components(|c| {
            let html = c.docs_nav(nav_props("/x")).into_string();
            assert!(html.contains(r#"<li class="active"><a href="/how-to-guides/v3">"#));
            assert_eq!(html.matches(r#"class="active""#).count(), 1);
        });
    }

    #[test]
    fn docs_nav_marks_current_page_and_expands_parent() {
        with_components(|c| {
            let html = c
                .docs_nav(nav_props("/how-to-guides/v3/basics/mint-token"))
                .into_string();
            assert!(html.contains(r#"<li class="expanded"><a href="/how-to-guides/v3/basics">"#));
            assert!(html.contains(r#"aria-current="page">Mint a token"#));
        });
    }

    #[test]
    fn docs_nav_mobile_summarizes_current_page() {
        with_components(|c| {
            let html = c
                .docs_nav_mobile(nav_props("/how-to-guides/v3/basics/mint-token/"))
                .into_string();
            assert!(html.contains("<summary>Mint a token</summary>"));
            let fallback = c.docs_nav_mobile(nav_props("/elsewhere")).into_string();
            assert!(fallback.contains("<summary>Menu</summary>"));
        });
    }

    #[test]
    fn hash_entries_match_only_with_hash() {
        assert!(is_current("/a#setup", "/a", "#setup"));
        assert!(!is_current("/a#other", "/a", "#setup"));
        assert!(is_current("/a/", "/a", "#setup"));
    }

    #[test]
    fn breadcrumb_links_section() {
        with_components(|c| {
            let html = c
                .breadcrumb_nav(BreadcrumbProps {
                    section: "Basics".to_string(),
                    section_url: "/how-to-guides/v3".to_string(),
                    title: "Mint".to_string(),
                })
                .into_string();
            assert!(html.contains(r#"<a href="/how-to-guides/v3">Basics</a>"#));
            assert!(html.contains(r#"<span class="current">Mint</span>"#));
        });
    }

    #[test]
    fn version_control_lists_versions_and_edit_link() {
        with_components(|c| {
            let html = c
                .version_control(VersionControlProps {
                    version: "v3".to_string(),
                    slug: "/how-to-guides/v3/basics/mint".to_string(),
                    absolute_path: "/site/content/v3/en/basics/mint.md".to_string(),
                })
                .into_string();
            assert!(html.contains(r#"<option value="/how-to-guides/v3/basics/mint" selected>v3</option>"#));
            assert!(html.contains(r#"<option value="/how-to-guides/v2/basics/mint">v2</option>"#));
            assert!(html.contains("/edit/main/content/v3/en/basics/mint.md"));
        });
    }

    #[test]
    fn version_url_rewrites_segment() {
        assert_eq!(version_url("/htg/v3/a", "v3", "v2"), "/htg/v2/a");
        assert_eq!(version_url("/htg/v3", "v3", "v2"), "/htg/v2");
        assert_eq!(version_url("/other", "v3", "v2"), "/other");
    }

    #[test]
    fn doc_tag_omits_missing_duration() {
        with_components(|c| {
            let with = c
                .doc_tag(DocTagProps {
                    difficulty: "Beginner".to_string(),
                    duration: Some("15 min".to_string()),
                })
                .into_string();
            assert!(with.contains(r#"data-level="beginner""#));
            assert!(with.contains(r#"<span class="duration">15 min</span>"#));
            let without = c
                .doc_tag(DocTagProps {
                    difficulty: "Advanced".to_string(),
                    duration: None,
                })
                .into_string();
            assert!(!without.contains("duration"));
        });
    }

    #[test]
    fn mdx_body_is_not_escaped() {
        with_components(|c| {
            let html = c
                .mdx_body(MdxBodyProps {
                    body: CompiledBody("<p><strong>hi</strong></p>".to_string()),
                })
                .into_string();
            assert_eq!(html, "<p><strong>hi</strong></p>");
        });
    }

    #[test]
    fn last_update_links_history() {
        with_components(|c| {
            let html = c
                .last_update_github(LastUpdateProps {
                    absolute_path: "/site/content/v3/en/a.md".to_string(),
                })
                .into_string();
            assert!(html.contains("/commits/main/content/v3/en/a.md"));
            // The file does not exist, so no date is shown.
            assert!(!html.contains("<time"));
        });
    }

    #[test]
    fn last_update_shows_modified_date() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("a.md");
        fs::write(&file, "x").unwrap();
        let config = SiteConfig::default();
        let c = SiteComponents::new(&config, tmp.path(), "");
        let html = c
            .last_update_github(LastUpdateProps {
                absolute_path: file.to_string_lossy().into_owned(),
            })
            .into_string();
        assert!(html.contains("<time datetime=\""));
        assert!(html.contains("/commits/main/content/a.md"));
    }

    #[test]
    fn bottom_buttons_link_neighbours() {
        with_components(|c| {
            let html = c
                .bottom_buttons(BottomButtonsProps {
                    menu: how_to_menu(),
                    page_slug: "/how-to-guides/v3/basics/mint-token".to_string(),
                })
                .into_string();
            assert!(html.contains(r#"href="/how-to-guides/v3/basics/pallet-integration" rel="prev""#));
            assert!(html.contains(r#"href="/how-to-guides/v3/testing" rel="next""#));
        });
    }

    #[test]
    fn bottom_buttons_first_page_has_no_prev() {
        with_components(|c| {
            let html = c
                .bottom_buttons(BottomButtonsProps {
                    menu: how_to_menu(),
                    page_slug: "/how-to-guides/v3/basics".to_string(),
                })
                .into_string();
            assert!(!html.contains("rel=\"prev\""));
            assert!(html.contains("rel=\"next\""));
        });
    }

    #[test]
    fn bottom_buttons_empty_for_unknown_slug() {
        with_components(|c| {
            let html = c
                .bottom_buttons(BottomButtonsProps {
                    menu: how_to_menu(),
                    page_slug: "/not/in/menu".to_string(),
                })
                .into_string();
            assert!(html.is_empty());
        });
    }

    #[test]
    fn toc_renders_nested_list() {
        with_components(|c| {
            let headings = TableOfContents {
                items: vec![TocItem {
                    url: "#install".to_string(),
                    title: "Install".to_string(),
                    items: vec![TocItem {
                        url: "#from-source".to_string(),
                        title: "From source".to_string(),
                        items: vec![],
                    }],
                }],
            };
            let html = c.table_of_content(TocProps { headings }).into_string();
            assert!(html.contains(r##"<a href="#install">Install</a><ul><li><a href="#from-source">"##));
            assert!(c
                .table_of_content(TocProps {
                    headings: TableOfContents::default()
                })
                .into_string()
                .is_empty());
        });
    }

    #[test]
    fn text_is_escaped() {
        with_components(|c| {
            let html = c
                .breadcrumb_nav(BreadcrumbProps {
                    section: "<script>".to_string(),
                    section_url: "/".to_string(),
                    title: "a & b".to_string(),
                })
                .into_string();
            assert!(html.contains("&lt;script&gt;"));
            assert!(html.contains("a &amp; b"));
        });
    }

    fn with_zh_components<F: FnOnce(&SiteComponents<'_>)>(f: F) {
        let config = SiteConfig::default();
        let root = PathBuf::from("/site/content");
        let components = SiteComponents::new(&config, &root, "").with_locale("zh-CN");
        f(&components);
    }

    #[test]
    fn default_locale_links_are_unprefixed() {
        let config = SiteConfig::default();
        let root = PathBuf::from("/site/content");
        let c = SiteComponents::new(&config, &root, "").with_locale("en");
        let html = c
            .docs_nav(nav_props("/how-to-guides/v3/basics/mint-token"))
            .into_string();
        assert!(html.contains(r#"<a href="/how-to-guides/v3/basics/mint-token" aria-current="page">"#));
    }

    #[test]
    fn locale_nav_marks_current_page_and_prefixes_links() {
        with_zh_components(|c| {
            let html = c
                .docs_nav(nav_props("/zh-CN/how-to-guides/v3/basics/mint-token"))
                .into_string();
            assert!(html.contains(
                r#"<a href="/zh-CN/how-to-guides/v3/basics/mint-token" aria-current="page">"#
            ));
            assert!(html.contains(r#"<li class="expanded"><a href="/zh-CN/how-to-guides/v3/basics">"#));
            assert!(html.contains(r#"<a href="/zh-CN/tutorials/v3">"#));
            let mobile = c
                .docs_nav_mobile(nav_props("/zh-CN/how-to-guides/v3/basics/mint-token"))
                .into_string();
            assert!(mobile.contains("<summary>Mint a token</summary>"));
        });
    }

    #[test]
    fn locale_bottom_buttons_stay_in_locale() {
        with_zh_components(|c| {
            let html = c
                .bottom_buttons(BottomButtonsProps {
                    menu: how_to_menu(),
                    page_slug: "/how-to-guides/v3/basics/mint-token".to_string(),
                })
                .into_string();
            assert!(html.contains(
                r#"href="/zh-CN/how-to-guides/v3/basics/pallet-integration" rel="prev""#
            ));
            assert!(html.contains(r#"href="/zh-CN/how-to-guides/v3/testing" rel="next""#));
        });
    }

    #[test]
    fn locale_prefix_leaves_external_links_alone() {
        with_zh_components(|c| {
            assert_eq!(c.href("https://example.com/x"), "https://example.com/x");
            assert_eq!(c.href("#setup"), "#setup");
            assert_eq!(c.href("/a"), "/zh-CN/a");
            assert_eq!(c.local_path("/zh-CN"), "/");
            assert_eq!(c.local_path("/zh-CNX/a"), "/zh-CNX/a");
        });
    }
}
