//! Site configuration.
//!
//! Handles loading, validating, and layering `config.toml`. The file lives in
//! the content root; every value it sets overrides the stock default and
//! everything it omits keeps the default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # Every key is optional; these are the defaults
//!
//! versions = ["v3"]          # Versions offered by the version selector
//!
//! [site]
//! title = "Developer Hub"    # Appended to every <title>
//! default_locale = "en"      # Locale served without a path prefix
//!
//! [github]
//! repository = "substrate-developer-hub/substrate-docs"
//! branch = "main"
//! content_path = "content"   # Where the content root sits inside the repo
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#1a1a1a"
//! text_muted = "#6b7280"     # Breadcrumbs, tags, "last updated"
//! border = "#e5e7eb"
//! link = "#0b7285"
//! accent = "#e6007a"         # Active nav entries, difficulty tag
//!
//! [colors.dark]
//! background = "#11131a"
//! text = "#e5e7eb"
//! text_muted = "#9ca3af"
//! border = "#374151"
//! link = "#66d9e8"
//! accent = "#ff4fa8"
//! ```
//!
//! A misspelled key is an error rather than a silently ignored setting.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Versions listed by the version selector, newest first.
    pub versions: Vec<String>,
    /// Site identity and locale settings.
    pub site: SiteSection,
    /// Source repository used for edit and history links.
    pub github: GithubConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            versions: vec!["v3".to_string()],
            site: SiteSection::default(),
            github: GithubConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable for rendering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.versions.is_empty() {
            return Err(ConfigError::Validation("versions must not be empty".into()));
        }
        if self.versions.iter().any(|v| v.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "versions must not contain blank entries".into(),
            ));
        }
        if self.site.default_locale.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.default_locale must not be empty".into(),
            ));
        }
        let repo = &self.github.repository;
        if repo.split('/').filter(|p| !p.is_empty()).count() != 2 {
            return Err(ConfigError::Validation(format!(
                "github.repository must be \"owner/name\", got \"{repo}\""
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Site name, appended to every page title.
    pub title: String,
    /// Locale whose pages are served without a `/<locale>` path prefix.
    pub default_locale: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Developer Hub".to_string(),
            default_locale: "en".to_string(),
        }
    }
}

/// Where the content lives on GitHub.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// `owner/name`.
    pub repository: String,
    pub branch: String,
    /// Path of the content root inside the repository.
    pub content_path: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            repository: "substrate-developer-hub/substrate-docs".to_string(),
            branch: "main".to_string(),
            content_path: "content".to_string(),
        }
    }
}

impl GithubConfig {
    /// Repository path of a file given relative to the content root.
    pub fn repo_path(&self, relative: &str) -> String {
        let prefix = self.content_path.trim_matches('/');
        let relative = relative.trim_start_matches('/');
        if prefix.is_empty() {
            relative.to_string()
        } else {
            format!("{prefix}/{relative}")
        }
    }

    pub fn edit_url(&self, relative: &str) -> String {
        format!(
            "https://github.com/{}/edit/{}/{}",
            self.repository,
            self.branch,
            self.repo_path(relative)
        )
    }

    pub fn history_url(&self, relative: &str) -> String {
        format!(
            "https://github.com/{}/commits/{}/{}",
            self.repository,
            self.branch,
            self.repo_path(relative)
        )
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text: breadcrumbs, tags, "last updated".
    pub text_muted: String,
    pub border: String,
    pub link: String,
    /// Active navigation entries and the difficulty tag.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#6b7280".to_string(),
            border: "#e5e7eb".to_string(),
            link: "#0b7285".to_string(),
            accent: "#e6007a".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#11131a".to_string(),
            text: "#e5e7eb".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#374151".to_string(),
            link: "#66d9e8".to_string(),
            accent: "#ff4fa8".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Layer `overlay` over `base`.
///
/// Nested tables merge per key. Any other overlay value (arrays included, so
/// `versions` is replaced rather than extended) wins outright, and keys only
/// present in `base` survive.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    use toml::Value::Table;
    match (base, overlay) {
        (Table(mut defaults), Table(user)) => {
            for (key, value) in user {
                let layered = match defaults.remove(&key) {
                    Some(default) => merge_toml(default, value),
                    None => value,
                };
                defaults.insert(key, layered);
            }
            Table(defaults)
        }
        (_, user) => user,
    }
}

/// Site config from the text of a `config.toml`.
///
/// The text only needs the keys it changes: it is layered over
/// [`SiteConfig::default`] before deserializing, so an empty string yields
/// the defaults. The result is validated.
pub fn parse_config(text: &str) -> Result<SiteConfig, ConfigError> {
    let defaults = toml::Value::try_from(SiteConfig::default())?;
    let user: toml::Value = toml::from_str(text)?;
    let config: SiteConfig = merge_toml(defaults, user).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Site config for a content root. A root without `config.toml` gets the
/// defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    let text = if path.is_file() {
        fs::read_to_string(&path)?
    } else {
        String::new()
    };
    parse_config(&text)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# htg-docs Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file in the content root.
# Unknown keys will cause an error.

# Versions offered by the version selector, newest first. Content for each
# version lives in content/<version>/<locale>/.
versions = ["v3"]

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Appended to every page title: "<page> | <title>".
title = "Developer Hub"

# Pages in this locale are served without a /<locale> path prefix.
default_locale = "en"

# ---------------------------------------------------------------------------
# Source repository (edit and "last updated" links)
# ---------------------------------------------------------------------------
[github]
repository = "substrate-developer-hub/substrate-docs"
branch = "main"

# Path of the content root inside the repository.
content_path = "content"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#6b7280"   # Breadcrumbs, tags, "last updated"
border = "#e5e7eb"
link = "#0b7285"
accent = "#e6007a"       # Active nav entries, difficulty tag

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#11131a"
text = "#e5e7eb"
text_muted = "#9ca3af"
border = "#374151"
link = "#66d9e8"
accent = "#ff4fa8"
"##
}

/// `--color-*` custom properties for both schemes, dark behind a media query.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_accent = colors.dark.accent,
    )
}
