//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's `config.toml` in the content root; the file only
//! needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Tidemark Studio"
//! base_url = "https://tidemark.studio"
//! tagline = "Websites for Dorset businesses"
//! email = "hello@tidemark.studio"
//! phone = "01202 000000"
//!
//! [navigation]
//! hero_threshold = 600.0    # px scrolled before the homepage sticky bar shows
//! throttle_ms = 16          # minimum interval between scroll evaluations
//! tablet_min_width = 768.0  # px
//! desktop_min_width = 1024.0
//!
//! [colors]
//! background = "#fbfaf7"
//! text = "#14213d"
//! text_muted = "#5c677d"
//! accent = "#0f766e"
//! nav_background = "#ffffff"
//! border = "#e5e7eb"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::context::Breakpoints;
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
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Agency identity used in page titles, structured data and the footer.
    pub site: SiteInfo,
    /// Sticky navigation and viewport behaviour.
    pub navigation: NavigationConfig,
    /// Colour palette injected as CSS custom properties.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if !(self.site.base_url.starts_with("https://") || self.site.base_url.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "site.base_url must be an absolute http(s) URL".into(),
            ));
        }
        let nav = &self.navigation;
        if !nav.hero_threshold.is_finite() || nav.hero_threshold < 0.0 {
            return Err(ConfigError::Validation(
                "navigation.hero_threshold must be a non-negative number".into(),
            ));
        }
        if !(nav.tablet_min_width > 0.0 && nav.tablet_min_width < nav.desktop_min_width) {
            return Err(ConfigError::Validation(
                "navigation.tablet_min_width must be positive and below desktop_min_width".into(),
            ));
        }
        if nav.throttle_ms > 1000 {
            return Err(ConfigError::Validation(
                "navigation.throttle_ms must be at most 1000".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    /// Absolute origin for canonical URLs and the sitemap, without trailing slash.
    pub base_url: String,
    pub tagline: String,
    pub email: String,
    pub phone: String,
}

impl SiteInfo {
    /// Absolute URL of a route path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Tidemark Studio".to_string(),
            base_url: "https://tidemark.studio".to_string(),
            tagline: "Websites for Dorset businesses".to_string(),
            email: "hello@tidemark.studio".to_string(),
            phone: "01202 000000".to_string(),
        }
    }
}

/// Sticky navigation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Scroll offset (px) past which the homepage counts as scrolled past the hero.
    pub hero_threshold: f64,
    /// Minimum interval between scroll evaluations; 16 ms is one frame at 60 Hz.
    pub throttle_ms: u64,
    pub tablet_min_width: f64,
    pub desktop_min_width: f64,
}

impl NavigationConfig {
    pub fn breakpoints(&self) -> Breakpoints {
        Breakpoints {
            tablet_min: self.tablet_min_width,
            desktop_min: self.desktop_min_width,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        let breakpoints = Breakpoints::default();
        Self {
            hero_threshold: 600.0,
            throttle_ms: 16,
            tablet_min_width: breakpoints.tablet_min,
            desktop_min_width: breakpoints.desktop_min,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    /// Secondary text: nav links, captions, footer.
    pub text_muted: String,
    /// Buttons, active nav item, links.
    pub accent: String,
    pub nav_background: String,
    pub border: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#fbfaf7".to_string(),
            text: "#14213d".to_string(),
            text_muted: "#5c677d".to_string(),
            accent: "#0f766e".to_string(),
            nav_background: "#ffffff".to_string(),
            border: "#e5e7eb".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(base, overlay),
        None => {
            log::debug!("no config.toml in {}, using stock defaults", root.display());
            base
        }
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Tidemark Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
#
# The town list for /web-design/{town} pages lives in towns.toml next to
# this file; without it the built-in Dorset towns are used.

# ---------------------------------------------------------------------------
# Agency details (titles, structured data, footer)
# ---------------------------------------------------------------------------
[site]
name = "Tidemark Studio"
# Absolute origin used for canonical links and sitemap.xml.
base_url = "https://tidemark.studio"
tagline = "Websites for Dorset businesses"
email = "hello@tidemark.studio"
phone = "01202 000000"

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[navigation]
# Pixels scrolled before the homepage reveals the sticky bar.
# Service and town pages always show it.
hero_threshold = 600.0

# Minimum milliseconds between scroll evaluations (16 = one frame at 60 Hz).
throttle_ms = 16

# Viewport breakpoints in CSS pixels.
tablet_min_width = 768.0
desktop_min_width = 1024.0

# ---------------------------------------------------------------------------
# Colours
# ---------------------------------------------------------------------------
[colors]
background = "#fbfaf7"
text = "#14213d"
text_muted = "#5c677d"    # Nav links, captions, footer
accent = "#0f766e"        # Buttons, active nav item
nav_background = "#ffffff"
border = "#e5e7eb"
"##
}

/// Generate CSS custom properties from colour and navigation config.
pub fn generate_root_css(config: &SiteConfig) -> String {
    let colors = &config.colors;
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --color-nav-bg: {nav_background};
    --color-border: {border};
    --bp-tablet: {tablet}px;
    --bp-desktop: {desktop}px;
}}"#,
        background = colors.background,
        text = colors.text,
        text_muted = colors.text_muted,
        accent = colors.accent,
        nav_background = colors.nav_background,
        border = colors.border,
        tablet = config.navigation.tablet_min_width,
        desktop = config.navigation.desktop_min_width,
    )
}
