//! Build configuration schema definitions.
//!
//! Field names follow the document's own keys so the JSON carried in
//! `static/` round-trips unchanged through `/data.json`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The utility-CSS build configuration.
///
/// Immutable once parsed; constructed only through
/// [`loader::parse_build_config`](crate::tailwind::loader::parse_build_config),
/// so every reachable value has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Glob patterns for the source files the CSS tool scans for class
    /// names. Required; must be non-empty.
    pub content: Vec<String>,

    /// Design-token overrides layered onto the tool's default scales.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Plugin identifiers to load. May be empty.
    #[serde(default)]
    pub plugins: Vec<String>,

    /// How dark-mode variants are activated.
    #[serde(default, rename = "darkMode")]
    pub dark_mode: DarkModeStrategy,
}

/// Theme section of the build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Scale name → token key → token value (a CSS length expression).
    ///
    /// Entries are additive: keys may shadow the tool's defaults but never
    /// delete them. Declaration order is preserved.
    #[serde(default)]
    pub extend: IndexMap<String, IndexMap<String, String>>,
}

/// Dark-mode activation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DarkModeStrategy {
    /// Variants apply under an ancestor marker selector.
    Selector,
    /// Variants follow the `prefers-color-scheme` media query. The CSS
    /// tool's own default when the key is absent.
    #[default]
    Media,
    /// Variants apply under an ancestor `class="dark"` marker.
    Class,
}

impl BuildConfig {
    /// Token overrides declared for one scale, if any.
    pub fn scale_extensions(&self, scale: &str) -> Option<&IndexMap<String, String>> {
        self.theme.extend.get(scale)
    }
}
