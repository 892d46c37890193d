//! The how-to guide page template.
//!
//! [`DocsTemplate::render`] is a single synchronous pass over three inputs:
//! where the reader is ([`Location`]), what the page query returned
//! ([`QueryResult`]), and which page is being built ([`PageContext`]). It
//! fetches the two menus, asks each chrome component for its markup, and
//! arranges the results:
//!
//! ```text
//! layout
//! ├── seo (head)
//! ├── docs_nav_mobile            hidden at lg and up
//! ├── docs_nav                   hidden below lg
//! └── article
//!     ├── breadcrumb_nav · version_control
//!     ├── h1 title · doc_tag?    only with a difficulty
//!     ├── mdx_body
//!     ├── last_update_github
//!     ├── bottom_buttons?        unless hideNav
//!     └── table_of_content       hidden below xl
//! ```
//!
//! The template holds no state between renders and performs no I/O of its
//! own.
//!
//! ## Missing documents
//!
//! With no document, `seo` still runs and receives a `None` title. Everything after the navigation
//! requires a document, and its absence fails the render with
//! [`RenderError::MissingDocument`]. Callers are expected to render only
//! pages whose query matched.

use crate::components::{
    BottomButtonsProps, BreadcrumbProps, Components, DocTagProps, LastUpdateProps, MdxBodyProps,
    NavProps, SeoProps, TocProps, VersionControlProps,
};
use crate::menu::{NavMenu, NavMenuProvider};
use crate::types::{Frontmatter, Location, PageContext, QueryResult};
use maud::{Markup, html};
use thiserror::Error;

/// Position of the how-to guides entry in the global menu.
pub const TEMPLATE_ID: usize = 2;
/// Menu section rendered in the sidebar.
pub const SECTION: &str = "how-to-guides";
/// Target of the breadcrumb's section link.
pub const SECTION_URL: &str = "/how-to-guides/v3";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No document for page {slug}: the page query matched nothing")]
    MissingDocument { slug: String },
}

/// Renders one how-to guide page.
pub struct DocsTemplate<'a, M: ?Sized, C: ?Sized> {
    menus: &'a M,
    components: &'a C,
}

impl<'a, M, C> DocsTemplate<'a, M, C>
where
    M: NavMenuProvider + ?Sized,
    C: Components + ?Sized,
{
    pub fn new(menus: &'a M, components: &'a C) -> Self {
        Self { menus, components }
    }

    pub fn render(
        &self,
        location: &Location,
        data: &QueryResult,
        page_context: &PageContext,
    ) -> Result<Markup, RenderError> {
        let PageContext { slug, version } = page_context;
        let c = self.components;

        let global_docs_nav = self.menus.global();
        let docs_menu = self.menus.section(SECTION);

        let head = c.seo(SeoProps {
            title: data.mdx.as_ref().map(|m| m.frontmatter.title.clone()),
        });

        let nav_props = NavProps {
            pathname: location.pathname.clone(),
            hash_link: location.hash.clone(),
            side_nav: docs_menu.clone(),
            global_nav: global_docs_nav,
            template_id: TEMPLATE_ID,
        };
        let nav_mobile = c.docs_nav_mobile(nav_props.clone());
        let nav_desktop = c.docs_nav(nav_props);

        let mdx = data
            .mdx
            .as_ref()
            .ok_or_else(|| RenderError::MissingDocument { slug: slug.clone() })?;
        let fm = &mdx.frontmatter;

        let breadcrumb = c.breadcrumb_nav(BreadcrumbProps {
            section: fm.section.clone(),
            section_url: SECTION_URL.to_string(),
            title: fm.title.clone(),
        });
        let version_control = c.version_control(VersionControlProps {
            version: version.clone(),
            slug: slug.clone(),
            absolute_path: mdx.file_absolute_path.clone(),
        });
        let tag = self.difficulty_tag(fm);
        let body = c.mdx_body(MdxBodyProps {
            body: mdx.body.clone(),
        });
        let last_update = c.last_update_github(LastUpdateProps {
            absolute_path: mdx.file_absolute_path.clone(),
        });
        let paging = self.paging_controls(fm, docs_menu, slug);
        let toc = c.table_of_content(TocProps {
            headings: mdx.table_of_contents.clone(),
        });

        let content = html! {
            div.page {
                div.docs-shell {
                    div.nav-mobile."lg:hidden" { (nav_mobile) }
                    div.nav-desktop.hidden."lg:inline-block" { (nav_desktop) }
                    article.guide {
                        div.guide-main {
                            div.guide-header {
                                (breadcrumb)
                                (version_control)
                            }
                            div.markdown-body.mdx-anchor {
                                h1 { (fm.title) }
                                @if let Some(tag) = tag {
                                    (tag)
                                }
                                (body)
                            }
                            div.guide-updated {
                                (last_update)
                            }
                            @if let Some(paging) = paging {
                                (paging)
                            }
                        }
                        div.guide-toc.hidden."xl:inline-block" {
                            (toc)
                        }
                    }
                }
            }
        };

        Ok(c.layout(head, content))
    }

    /// Difficulty and duration, only when the guide declares a difficulty.
    fn difficulty_tag(&self, fm: &Frontmatter) -> Option<Markup> {
        let difficulty = fm.difficulty()?;
        Some(self.components.doc_tag(DocTagProps {
            difficulty: difficulty.to_string(),
            duration: fm.duration.clone(),
        }))
    }

    /// Previous/next links, unless the guide opts out with `hideNav`.
    fn paging_controls(&self, fm: &Frontmatter, menu: NavMenu, slug: &str) -> Option<Markup> {
        if fm.hide_nav {
            return None;
        }
        Some(self.components.bottom_buttons(BottomButtonsProps {
            menu,
            page_slug: slug.to_string(),
        }))
    }
}
