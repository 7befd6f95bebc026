//! Core types for table layout: columns, alignment, truncation and the table spec.

use serde::{Deserialize, Serialize};

use crate::metrics::visible_width;

/// Text alignment within a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left-align text (pad on the right).
    #[default]
    Left,
    /// Right-align text (pad on the left).
    Right,
}

/// How a cell is shortened when it does not fit its column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Truncation {
    /// Keep the start: "task-wo..."
    #[default]
    End,
    /// Keep the final `/` segment: ".../main.rs"
    Path,
}

/// Configuration for a single column.
///
/// Columns are fixed-role by default: they take the width their header and
/// content need and never give it up. Marking a column [`variable`] makes it
/// eligible to shrink toward `min_width` when the width budget is tight, and
/// to grow when a wide terminal leaves room to spare.
///
/// [`variable`]: Column::variable
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Header label.
    pub name: String,
    /// Declared minimum width.
    pub min_width: usize,
    /// Text alignment within the column.
    #[serde(default)]
    pub align: Align,
    /// How overlong cells are shortened.
    #[serde(default)]
    pub truncation: Truncation,
    /// Shrink priority for variable columns; lower values give up width first.
    /// `None` marks a fixed-role column.
    #[serde(default)]
    pub priority: Option<u8>,
}

impl Column {
    /// Create a fixed-role, left-aligned column.
    pub fn new(name: impl Into<String>, min_width: usize) -> Self {
        Column {
            name: name.into(),
            min_width,
            align: Align::Left,
            truncation: Truncation::End,
            priority: None,
        }
    }

    /// Set the text alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set alignment to right (shorthand for `.align(Align::Right)`).
    pub fn right(self) -> Self {
        self.align(Align::Right)
    }

    /// Set the truncation mode.
    pub fn truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    /// Truncate overlong values as paths (shorthand for `.truncation(Truncation::Path)`).
    pub fn path(self) -> Self {
        self.truncation(Truncation::Path)
    }

    /// Mark the column as variable with the given shrink priority.
    pub fn variable(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns `true` for columns that take part in budget shrink and expansion.
    pub fn is_variable(&self) -> bool {
        self.priority.is_some()
    }

    /// Width before any content is seen: the larger of the minimum and the header.
    pub fn base_width(&self) -> usize {
        self.min_width.max(visible_width(&self.name))
    }
}

/// Separator placed between columns unless a spec overrides it.
pub const DEFAULT_SEPARATOR: &str = "  ";

/// The shape of a table: columns plus separator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Columns, in display order.
    pub columns: Vec<Column>,
    /// Separator between adjacent columns.
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl TableSpec {
    /// Create a spec with the given columns and the default two-space separator.
    pub fn new(columns: Vec<Column>) -> Self {
        TableSpec {
            columns,
            separator: default_separator(),
        }
    }

    /// Create a spec builder.
    pub fn builder() -> TableSpecBuilder {
        TableSpecBuilder::default()
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Total width taken by separators on one row.
    pub fn separator_overhead(&self) -> usize {
        visible_width(&self.separator) * self.columns.len().saturating_sub(1)
    }

    /// Indices of the variable columns, in shrink order.
    ///
    /// Ties on priority keep declaration order.
    pub fn shrink_order(&self) -> Vec<usize> {
        let mut order: Vec<(u8, usize)> = self
            .columns
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.priority.map(|p| (p, i)))
            .collect();
        order.sort();
        order.into_iter().map(|(_, i)| i).collect()
    }
}

/// Builder for [`TableSpec`].
#[derive(Clone, Debug, Default)]
pub struct TableSpecBuilder {
    columns: Vec<Column>,
    separator: Option<String>,
}

impl TableSpecBuilder {
    /// Append a column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Append several columns.
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Set the column separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Build the spec.
    pub fn build(self) -> TableSpec {
        TableSpec {
            columns: self.columns,
            separator: self.separator.unwrap_or_else(default_separator),
        }
    }
}
