//! Render configuration.
//!
//! Everything a renderer needs to know about its environment travels in a
//! [`RenderConfig`]: the width budget, whether to emit styled output, and the
//! layout knobs. Renderers never query the terminal themselves, so the same
//! inputs always produce the same output.
//!
//! ```rust
//! use statgrid::{RenderConfig, WidthBudget};
//!
//! let config = RenderConfig::from_yaml("
//! width_budget: 100
//! max_children_per_group: 5
//! ").unwrap();
//!
//! assert_eq!(config.width_budget, WidthBudget::new(100));
//! assert_eq!(config.max_children_per_group, 5);
//! assert!(!config.color);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::layout::WidthBudget;
use crate::terminal;

/// Budgets at or above this many columns count as wide terminals.
pub const DEFAULT_WIDE_THRESHOLD: usize = 120;

/// Child rows shown per group before the rest collapse into "+N more".
pub const DEFAULT_MAX_CHILDREN: usize = 3;

/// Layout and styling settings for one render call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Total terminal columns available.
    pub width_budget: WidthBudget,
    /// Minimum budget before surplus width is handed out to variable columns.
    pub wide_threshold: usize,
    /// Child rows rendered per group in a tree.
    pub max_children_per_group: usize,
    /// Emit styled cell forms.
    pub color: bool,
}

/// Keys present in a YAML document; absent keys stay `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigOverlay {
    width_budget: Option<WidthBudget>,
    wide_threshold: Option<usize>,
    max_children_per_group: Option<usize>,
    color: Option<bool>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width_budget: WidthBudget::UNCONSTRAINED,
            wide_threshold: DEFAULT_WIDE_THRESHOLD,
            max_children_per_group: DEFAULT_MAX_CHILDREN,
            color: false,
        }
    }
}

impl RenderConfig {
    /// Defaults: unconstrained, plain output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with the width budget and color setting read from the
    /// current terminal.
    pub fn detect() -> Self {
        RenderConfig {
            width_budget: WidthBudget::from(terminal::terminal_width()),
            color: terminal::color_enabled(),
            ..Self::default()
        }
    }

    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply the keys set in a YAML document on top of `self`.
    ///
    /// Unlike [`from_yaml`](Self::from_yaml), keys the document leaves out
    /// keep their current values rather than the defaults, so a file can
    /// refine a detected config. An explicit `width_budget: 0` makes the
    /// result unconstrained.
    ///
    /// ```rust
    /// use statgrid::RenderConfig;
    ///
    /// let detected = RenderConfig::new().width_budget(132usize).color(true);
    /// let config = detected.merge_yaml("color: false\n").unwrap();
    /// assert!(!config.color);
    /// assert_eq!(config.width_budget.columns(), Some(132));
    /// ```
    pub fn merge_yaml(mut self, yaml: &str) -> Result<Self, RenderError> {
        let overlay: Option<ConfigOverlay> = serde_yaml::from_str(yaml)?;
        let overlay = overlay.unwrap_or_default();
        if let Some(budget) = overlay.width_budget {
            self.width_budget = budget;
        }
        if let Some(threshold) = overlay.wide_threshold {
            self.wide_threshold = threshold;
        }
        if let Some(max) = overlay.max_children_per_group {
            self.max_children_per_group = max;
        }
        if let Some(color) = overlay.color {
            self.color = color;
        }
        Ok(self)
    }

    /// Set the width budget.
    pub fn width_budget(mut self, budget: impl Into<WidthBudget>) -> Self {
        self.width_budget = budget.into();
        self
    }

    /// Set the wide-terminal threshold.
    pub fn wide_threshold(mut self, threshold: usize) -> Self {
        self.wide_threshold = threshold;
        self
    }

    /// Set how many children a tree group shows.
    pub fn max_children_per_group(mut self, max: usize) -> Self {
        self.max_children_per_group = max;
        self
    }

    /// Enable or disable styled output.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}
