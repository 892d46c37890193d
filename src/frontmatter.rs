//! YAML frontmatter extraction.
//!
//! A guide starts with an optional `---` fenced YAML block:
//!
//! ```text
//! ---
//! slug: /how-to-guides/v3/basics/pallet-integration
//! title: Integrate a pallet
//! section: Basics
//! difficulty: Beginner
//! duration: 30 min
//! ---
//!
//! # Body starts here
//! ```
//!
//! The block is parsed with `serde_yaml`, converted to JSON so scalar values
//! can be normalized, then deserialized into [`Frontmatter`]:
//!
//! - keys with an empty value (`section:`) are dropped and take their default
//! - a falsy `difficulty` (`false`, `0`, `""`) is dropped
//! - numbers and bools in text fields become strings (`duration: 30` is `"30"`)

use crate::types::Frontmatter;
use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Unterminated frontmatter block: expected closing '---'")]
    Unterminated,
    #[error("Frontmatter YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Frontmatter must be a YAML mapping")]
    NotAMapping,
    #[error("Invalid frontmatter: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// A document split into parsed frontmatter and the remaining markdown.
#[derive(Debug)]
pub struct SplitDocument<'a> {
    pub frontmatter: Frontmatter,
    pub body: &'a str,
}

/// Fields that are displayed as text even when written as YAML numbers.
const TEXT_FIELDS: &[&str] = &["difficulty", "duration", "section", "category", "title"];

/// Split `source` into frontmatter and body and deserialize the frontmatter.
///
/// A document without a leading `---` fence has no frontmatter; that fails
/// here because `slug` and `title` are required.
pub fn parse_document(source: &str) -> Result<SplitDocument<'_>, FrontmatterError> {
    let (block, body) = split_block(source)?;
    let value = parse_block(block.unwrap_or(""))?;
    let frontmatter = serde_json::from_value(value)?;
    Ok(SplitDocument { frontmatter, body })
}

/// Returns `(yaml_block, body)`. `yaml_block` is `None` if there is no fence.
fn split_block(source: &str) -> Result<(Option<&str>, &str), FrontmatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let trimmed = source.trim_start_matches(['\r', '\n']);

    let Some(after_open) = strip_fence_line(trimmed) else {
        return Ok((None, source));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if is_fence(line) {
            let block = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok((Some(block), body));
        }
        offset += line.len();
    }
    Err(FrontmatterError::Unterminated)
}

fn strip_fence_line(s: &str) -> Option<&str> {
    let first_len = s.find('\n').map_or(s.len(), |i| i + 1);
    is_fence(&s[..first_len]).then(|| &s[first_len..])
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == "---"
}

fn parse_block(block: &str) -> Result<JsonValue, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(JsonValue::Object(Default::default()));
    }
    let yaml: serde_yaml::Value = serde_yaml::from_str(block)?;
    let mut json = serde_json::to_value(yaml)?;
    match &mut json {
        JsonValue::Object(map) => {
            map.retain(|_, v| !v.is_null());
            if map.get("difficulty").is_some_and(is_falsy) {
                map.remove("difficulty");
            }
            for key in TEXT_FIELDS {
                if let Some(v) = map.get_mut(*key) {
                    normalize_text(v);
                }
            }
            Ok(json)
        }
        JsonValue::Null => Ok(JsonValue::Object(Default::default())),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

fn is_falsy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => false,
    }
}

fn normalize_text(value: &mut JsonValue) {
    match value {
        JsonValue::Number(n) => *value = JsonValue::String(n.to_string()),
        JsonValue::Bool(b) => *value = JsonValue::String(b.to_string()),
        _ => {}
    }
}
