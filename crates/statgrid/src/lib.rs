//! # statgrid - Width-Adaptive Status Tables for the Terminal
//!
//! `statgrid` renders status information as flat tables and two-level trees
//! that stay aligned from narrow terminals to very wide ones, even when cells
//! carry color, underline or hyperlink escape sequences.
//!
//! ## Core Concepts
//!
//! - [`Cell`]: Plain text plus an optional styled form of the same visible width
//! - [`Column`] / [`TableSpec`]: Column minimums, alignment, truncation and shrink priority
//! - [`WidthBudget`]: How many terminal columns a render may use (or unconstrained)
//! - [`FlatTable`]: Header plus data rows
//! - [`TreeView`]: Groups with nested children, tree connectors and a `+N more` cap
//! - [`RenderConfig`]: Budget, color and layout knobs for one render call
//!
//! Text measurement lives in [`metrics`]: widths are counted in code points
//! with escape sequences removed.
//!
//! ## Quick Start
//!
//! ```rust
//! use statgrid::{render_flat_table, Cell, Column};
//!
//! let columns = [
//!     Column::new("Workspace", 10).variable(1),
//!     Column::new("Status", 8),
//! ];
//! let rows = vec![vec![Cell::plain("api"), Cell::plain("running")]];
//!
//! let out = render_flat_table(&columns, &rows, 80usize);
//! assert_eq!(out, "Workspace   Status\napi         running\n");
//! ```
//!
//! ## Trees
//!
//! ```rust
//! use statgrid::{render_hierarchy, Child, Group};
//!
//! let groups = vec![Group::new("api", "task/api")
//!     .status("running")
//!     .child(Child::new("api-1", "completed").progress(2, 2))];
//!
//! let out = render_hierarchy(&groups, 0usize);
//! assert!(out.lines().any(|l| l.starts_with("  └─ api-1")));
//! ```
//!
//! ## Styled Output
//!
//! Renderers never look at the terminal. Color and width are passed in through
//! [`RenderConfig`]; [`RenderConfig::detect`] fills them from the current
//! terminal when that is what you want.
//!
//! ```rust
//! use console::Style;
//! use statgrid::{Cell, Column, FlatTable, RenderConfig};
//!
//! let table = FlatTable::new(vec![Column::new("Status", 6), Column::new("Id", 2)]);
//! let rows = vec![vec![Cell::styled("failed", Style::new().red()), Cell::plain("7")]];
//!
//! let out = table.render(&rows, &RenderConfig::new().color(true));
//! assert_eq!(out.lines().nth(1), Some("\x1b[31mfailed\x1b[0m  7"));
//! ```

pub mod cell;
pub mod config;
mod error;
pub mod layout;
pub mod metrics;
pub mod table;
pub mod terminal;
pub mod tree;

pub use cell::Cell;
pub use config::{RenderConfig, DEFAULT_MAX_CHILDREN, DEFAULT_WIDE_THRESHOLD};
pub use error::RenderError;
pub use layout::{
    Align, Column, ResolvedWidths, TableSpec, TableSpecBuilder, Truncation, WidthBudget,
    DEFAULT_SEPARATOR,
};
pub use metrics::{pad_left, pad_right, strip_escapes, truncate, truncate_path, visible_width};
pub use table::{render_flat_table, FlatTable, Row};
pub use tree::{render_hierarchy, Child, Group, Phase, TreeView};
