//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User config files
//! are sparse: stock defaults are the base layer and the file only needs the
//! keys it wants to override. Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! [site]
//! title = "Ada Lovelace"
//!
//! [github]
//! user = "ada"
//! exclude = ["my-resume"]
//!
//! [colors.dark]
//! background = "#0b1020"
//!
//! [pdf]
//! filename = "ada-lovelace-resume.pdf"
//! ```

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
///
/// All fields have sensible defaults; user files override only what they name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site-wide metadata (title, attribution line).
    pub site: SiteMeta,
    /// Repository listing fetch settings.
    pub github: GithubConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Theme/layout settings injected into the CSS.
    pub theme: ThemeConfig,
    /// Résumé PDF export settings.
    pub pdf: PdfConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pdf.validate()?;
        if self.github.api_root.trim().is_empty() {
            return Err(ConfigError::Validation(
                "github.api_root must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Site-wide metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// `<title>` prefix for every page. Empty falls back to the profile name.
    pub title: String,
    /// Footer line on the site and bottom-center stamp on every PDF page.
    pub attribution: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            attribution: "Generated with vitae".to_string(),
        }
    }
}

/// Repository listing fetch settings.
///
/// An empty `user` disables the fetch entirely; the community page then shows
/// only the hand-picked featured projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// GitHub username whose public repositories are listed.
    pub user: String,
    /// Repository names excluded from the listing (exact match).
    pub exclude: Vec<String>,
    /// Listing API root. Overridable so tests can point at a stub server.
    pub api_root: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            exclude: Vec::new(),
            api_root: "https://api.github.com".to_string(),
        }
    }
}

/// Résumé PDF export settings. Dimensions are PDF points (1/72 inch).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdfConfig {
    /// Output filename, written into the site output directory.
    pub filename: String,
    /// Page width in points. Default is A4 portrait.
    pub page_width: f32,
    /// Page height in points.
    pub page_height: f32,
    /// Uniform page margin in points.
    pub margin: f32,
    /// Body text size in points.
    pub body_size: f32,
    /// Section heading size in points.
    pub heading_size: f32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            filename: "resume.pdf".to_string(),
            page_width: 595.276,
            page_height: 841.89,
            margin: 54.0,
            body_size: 9.5,
            heading_size: 13.0,
        }
    }
}

impl PdfConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filename.trim().is_empty() {
            return Err(ConfigError::Validation(
                "pdf.filename must not be empty".into(),
            ));
        }
        if self.body_size <= 0.0 || self.heading_size <= 0.0 {
            return Err(ConfigError::Validation(
                "pdf font sizes must be positive".into(),
            ));
        }
        // The writable area must fit at least a heading plus a few body
        // lines, otherwise the page-break rule can never place anything.
        let writable_h = self.page_height - 2.0 * self.margin;
        let writable_w = self.page_width - 2.0 * self.margin;
        if writable_w < 10.0 * self.body_size || writable_h < 4.0 * self.heading_size {
            return Err(ConfigError::Validation(
                "pdf margins leave no usable page area".into(),
            ));
        }
        Ok(())
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
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
    /// Page background color.
    pub background: String,
    /// Card/panel background color.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (dates, captions, nav).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Accent color (links, tag chips, section markers).
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f8fafc".to_string(),
            surface: "#ffffff".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#64748b".to_string(),
            border: "#e2e8f0".to_string(),
            accent: "#2563eb".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111827".to_string(),
            surface: "#1f2937".to_string(),
            text: "#f3f4f6".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#374151".to_string(),
            accent: "#60a5fa".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

/// Theme/layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Maximum content column width (CSS value).
    pub content_width: String,
    /// Vertical gap between index-page sections (CSS value).
    pub section_gap: String,
    /// Gap between cards in grids (CSS value).
    pub card_gap: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            content_width: "52rem".to_string(),
            section_gap: "4rem".to_string(),
            card_gap: "1.25rem".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# vitae configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys are an error.

[site]
# <title> prefix for every page. Empty falls back to profile.name.
title = ""

# Footer line on the site; also stamped bottom-center on every PDF page.
attribution = "Generated with vitae"

# ---------------------------------------------------------------------------
# Repository listing (community page)
# ---------------------------------------------------------------------------
[github]
# GitHub username whose public repos are listed. Empty = fetch disabled.
user = ""

# Repository names to exclude from the listing (exact match).
exclude = []

# Listing API root. Only override for testing against a stub.
api_root = "https://api.github.com"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f8fafc"
surface = "#ffffff"
text = "#0f172a"
text_muted = "#64748b"    # Dates, captions, nav
border = "#e2e8f0"
accent = "#2563eb"        # Links, tag chips

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111827"
surface = "#1f2937"
text = "#f3f4f6"
text_muted = "#9ca3af"
border = "#374151"
accent = "#60a5fa"

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
# Maximum content column width (CSS value).
content_width = "52rem"

# Vertical gap between index-page sections (CSS value).
section_gap = "4rem"

# Gap between cards in grids (CSS value).
card_gap = "1.25rem"

# ---------------------------------------------------------------------------
# Résumé PDF export (dimensions in PDF points, 1/72 inch)
# ---------------------------------------------------------------------------
[pdf]
# Output filename, written into the site output directory.
filename = "resume.pdf"

# Page size. Default is A4 portrait.
page_width = 595.276
page_height = 841.89

# Uniform page margin.
margin = 54.0

# Font sizes.
body_size = 9.5
heading_size = 13.0
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-surface: {light_surface};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-surface: {dark_surface};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_surface = colors.light.surface,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_surface = colors.dark.surface,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --content-width: {content_width};
    --section-gap: {section_gap};
    --card-gap: {card_gap};
}}"#,
        content_width = theme.content_width,
        section_gap = theme.section_gap,
        card_gap = theme.card_gap,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.background, "#f8fafc");
        assert_eq!(config.colors.dark.background, "#111827");
    }

    #[test]
    fn default_pdf_settings_are_a4() {
        let config = SiteConfig::default();
        assert_eq!(config.pdf.filename, "resume.pdf");
        assert!((config.pdf.page_width - 595.276).abs() < 0.001);
        assert!((config.pdf.page_height - 841.89).abs() < 0.001);
    }

    #[test]
    fn default_github_fetch_disabled() {
        let config = SiteConfig::default();
        assert!(config.github.user.is_empty());
        assert_eq!(config.github.api_root, "https://api.github.com");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.colors.light.background, "#fafafa");
        // Default values preserved
        assert_eq!(config.colors.light.text, "#0f172a");
        assert_eq!(config.colors.dark.background, "#111827");
        assert_eq!(config.pdf.filename, "resume.pdf");
    }

    #[test]
    fn parse_github_settings() {
        let toml = r#"
[github]
user = "octocat"
exclude = ["my-resume", "scratch"]
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.github.user, "octocat");
        assert_eq!(config.github.exclude, vec!["my-resume", "scratch"]);
        // Unspecified default preserved
        assert_eq!(config.github.api_root, "https://api.github.com");
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn generate_theme_css_includes_variables() {
        let css = generate_theme_css(&ThemeConfig::default());
        assert!(css.contains("--content-width: 52rem"));
        assert!(css.contains("--section-gap: 4rem"));
        assert!(css.contains("--card-gap: 1.25rem"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.pdf.filename, "resume.pdf");
        assert_eq!(config.site.attribution, "Generated with vitae");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
title = "Ada Lovelace"

[pdf]
filename = "ada.pdf"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Ada Lovelace");
        assert_eq!(config.pdf.filename, "ada.pdf");
        // Unspecified values should be defaults
        assert_eq!(config.colors.dark.background, "#111827");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"margin = 54.0"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"margin = 36.0"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("margin").unwrap().as_float(), Some(36.0));
    }

    #[test]
    fn merge_toml_table_merge_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
[pdf]
filename = "resume.pdf"
margin = 54.0
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[pdf]
margin = 36.0
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let pdf = merged.get("pdf").unwrap();
        assert_eq!(pdf.get("margin").unwrap().as_float(), Some(36.0));
        assert_eq!(pdf.get("filename").unwrap().as_str(), Some("resume.pdf"));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fff"
text = "#000"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let light = merged.get("colors").unwrap().get("light").unwrap();
        assert_eq!(light.get("background").unwrap().as_str(), Some("#fafafa"));
        assert_eq!(light.get("text").unwrap().as_str(), Some("#000"));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[pdf]
filenme = "resume.pdf"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[githb]\nuser = \"x\"\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_pdf_filename() {
        let mut config = SiteConfig::default();
        config.pdf.filename = " ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_degenerate_margins() {
        let mut config = SiteConfig::default();
        config.pdf.margin = 300.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("usable page area"));
    }

    #[test]
    fn validate_nonpositive_font_size() {
        let mut config = SiteConfig::default();
        config.pdf.body_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[pdf]
margin = 400.0
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config.pdf.filename, "resume.pdf");
        assert_eq!(config.colors.light.background, "#f8fafc");
        assert_eq!(config.colors.dark.background, "#111827");
        assert_eq!(config.theme.content_width, "52rem");
        assert_eq!(config.site.attribution, "Generated with vitae");
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[site]"));
        assert!(content.contains("[github]"));
        assert!(content.contains("[colors.light]"));
        assert!(content.contains("[colors.dark]"));
        assert!(content.contains("[theme]"));
        assert!(content.contains("[pdf]"));
    }
}
