//! Configuration types for Coptree rendering.
//!
//! This module provides configuration structures that control how trees
//! are laid out, rendered and styled. All types implement
//! [`serde::Deserialize`] so the CLI can load them from a TOML file; every
//! field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LayoutConfig`] - Selects the [`LayoutEngine`], [`Orientation`] and spacing.
//! - [`RenderConfig`] - Options shared by the render adapters.
//! - [`StyleConfig`] - Colors used by the SVG renderer.
//! - [`LintConfig`] - Toggles the advisory grammar lint.
//!
//! # Example
//!
//! ```
//! # use coptree::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert!(config.lint().enabled());
//! ```

use serde::Deserialize;

use coptree_core::color::Color;

use crate::layout::{LayoutEngine, Orientation};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    render: RenderConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    lint: LintConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        layout: LayoutConfig,
        render: RenderConfig,
        style: StyleConfig,
        lint: LintConfig,
    ) -> Self {
        Self {
            layout,
            render,
            style,
            lint,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn lint(&self) -> &LintConfig {
        &self.lint
    }
}

/// Layout engine selection and grid spacing.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    engine: LayoutEngine,

    #[serde(default)]
    orientation: Orientation,

    /// Distance between adjacent columns, in SVG units.
    #[serde(default = "default_column_spacing")]
    column_spacing: f32,

    /// Distance between adjacent depth levels, in SVG units.
    #[serde(default = "default_level_spacing")]
    level_spacing: f32,
}

fn default_column_spacing() -> f32 {
    90.0
}

fn default_level_spacing() -> f32 {
    80.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            orientation: Orientation::default(),
            column_spacing: default_column_spacing(),
            level_spacing: default_level_spacing(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`] with default spacing.
    pub fn new(engine: LayoutEngine, orientation: Orientation) -> Self {
        Self {
            engine,
            orientation,
            ..Self::default()
        }
    }

    pub fn with_spacing(mut self, column_spacing: f32, level_spacing: f32) -> Self {
        self.column_spacing = column_spacing;
        self.level_spacing = level_spacing;
        self
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }
}

/// Options shared by the render adapters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Show a Latin transliteration next to each Coptic form.
    #[serde(default)]
    transliterate: bool,

    /// Title of exported HTML documents.
    #[serde(default)]
    html_title: Option<String>,
}

impl RenderConfig {
    const DEFAULT_HTML_TITLE: &'static str = "Coptic Dependency Analysis";

    pub fn new(transliterate: bool) -> Self {
        Self {
            transliterate,
            html_title: None,
        }
    }

    pub fn with_html_title(mut self, title: impl Into<String>) -> Self {
        self.html_title = Some(title.into());
        self
    }

    pub fn transliterate(&self) -> bool {
        self.transliterate
    }

    pub fn html_title(&self) -> &str {
        self.html_title
            .as_deref()
            .unwrap_or(Self::DEFAULT_HTML_TITLE)
    }
}

/// Colors used by the SVG renderer.
///
/// Colors are kept as strings until they are used so a typo is reported
/// with the name of the setting it came from. Unset colors fall back to
/// renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    node_color: Option<String>,

    #[serde(default)]
    edge_color: Option<String>,

    #[serde(default)]
    root_color: Option<String>,
}

impl StyleConfig {
    /// Sets the background color string.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.background_color.as_deref(), "background")
    }

    /// Returns the parsed fill [`Color`] of token boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn node_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.node_color.as_deref(), "node")
    }

    /// Returns the parsed [`Color`] of dependency arcs.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn edge_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.edge_color.as_deref(), "edge")
    }

    /// Returns the parsed fill [`Color`] of the root token box.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn root_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.root_color.as_deref(), "root")
    }
}

fn parse_color(value: Option<&str>, setting: &str) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {setting} color in config: {err}"))
}

/// Advisory grammar lint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LintConfig {
    #[serde(default = "default_lint_enabled")]
    enabled: bool,
}

fn default_lint_enabled() -> bool {
    true
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: default_lint_enabled(),
        }
    }
}

impl LintConfig {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}
