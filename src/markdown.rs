//! Markdown compilation for guide bodies.
//!
//! A single pulldown-cmark pass produces both outputs the page query needs:
//!
//! - the body HTML, with every heading given a stable `id` anchor;
//! - the heading tree for the table of contents, truncated to a maximum
//!   heading level.
//!
//! Anchors follow github-slugger rules (lowercase, punctuation dropped, spaces
//! to dashes, `-1`/`-2` suffixes for repeats), so links written against
//! GitHub's rendering of the same file keep working. An explicit
//! `## Heading {#custom}` id wins and is reserved against later collisions.

use crate::types::{CompiledBody, TableOfContents, TocItem};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html as md_html};
use std::collections::HashMap;

/// Output of compiling one guide body.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub body: CompiledBody,
    pub table_of_contents: TableOfContents,
}

/// A heading as it appears in the document, before tree building.
#[derive(Debug, Clone, PartialEq)]
struct Heading {
    level: usize,
    id: String,
    text: String,
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Compile `markdown` to HTML and collect headings up to `toc_max_depth`.
pub fn compile(markdown: &str, toc_max_depth: usize) -> Compiled {
    let mut events: Vec<Event<'_>> = Parser::new_ext(markdown, options()).collect();
    let headings = assign_heading_ids(&mut events);

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    md_html::push_html(&mut html, events.into_iter());

    let included: Vec<Heading> = headings
        .into_iter()
        .filter(|h| h.level <= toc_max_depth)
        .collect();

    Compiled {
        body: CompiledBody(html),
        table_of_contents: TableOfContents {
            items: build_tree(&included),
        },
    }
}

/// Give every heading an id and return the headings in document order.
fn assign_heading_ids(events: &mut [Event<'_>]) -> Vec<Heading> {
    let mut slugger = Slugger::default();

    // Explicit ids are reserved first so generated ones never shadow them.
    for event in events.iter() {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            slugger.reserve(id);
        }
    }

    let mut headings = Vec::new();
    let mut open: Option<(usize, usize, String)> = None;

    for idx in 0..events.len() {
        let closes = match &events[idx] {
            Event::Start(Tag::Heading { level, .. }) => {
                open = Some((idx, *level as usize, String::new()));
                false
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some((_, _, text)) = open.as_mut() {
                    text.push_str(t);
                }
                false
            }
            Event::End(TagEnd::Heading(_)) => true,
            _ => false,
        };
        if !closes {
            continue;
        }
        let Some((start, level, text)) = open.take() else {
            continue;
        };
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
            let resolved = match id.as_deref() {
                Some(existing) => existing.to_string(),
                None => slugger.next_slug(&text),
            };
            *id = Some(CowStr::from(resolved.clone()));
            headings.push(Heading {
                level,
                id: resolved,
                text: text.trim().to_string(),
            });
        }
    }
    headings
}

/// Nest a flat heading list: each heading owns the following headings with a
/// deeper level, up to the next heading at its own level or shallower.
fn build_tree(headings: &[Heading]) -> Vec<TocItem> {
    let mut items = Vec::new();
    let mut i = 0;
    while i < headings.len() {
        let head = &headings[i];
        let mut end = i + 1;
        while end < headings.len() && headings[end].level > head.level {
            end += 1;
        }
        items.push(TocItem {
            url: format!("#{}", head.id),
            title: head.text.clone(),
            items: build_tree(&headings[i + 1..end]),
        });
        i = end;
    }
    items
}

/// github-slugger compatible anchor generator.
#[derive(Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn next_slug(&mut self, text: &str) -> String {
        let mut base = String::with_capacity(text.len());
        for ch in text.trim().chars() {
            if ch.is_alphanumeric() || ch == '-' || ch == '_' {
                base.extend(ch.to_lowercase());
            } else if ch == ' ' {
                base.push('-');
            }
        }
        if base.is_empty() {
            base.push_str("heading");
        }

        let mut slug = base.clone();
        while self.occurrences.contains_key(&slug) {
            let n = self.occurrences.entry(base.clone()).or_insert(0);
            *n += 1;
            slug = format!("{base}-{n}");
        }
        self.occurrences.insert(slug.clone(), 0);
        slug
    }

    pub fn reserve(&mut self, slug: &str) {
        self.occurrences.entry(slug.to_string()).or_insert(0);
    }
}
