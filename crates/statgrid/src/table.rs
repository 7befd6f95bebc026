//! Flat tables: a header row followed by one line per data row.
//!
//! # Example
//!
//! ```rust
//! use statgrid::{Cell, Column, FlatTable, RenderConfig};
//!
//! let table = FlatTable::new(vec![
//!     Column::new("Name", 6).variable(0),
//!     Column::new("Count", 5).right(),
//!     Column::new("Note", 4),
//! ]);
//!
//! let rows = vec![
//!     vec![Cell::plain("alpha"), Cell::plain("3"), Cell::plain("ok")],
//!     vec![Cell::plain("beta"), Cell::plain("12"), Cell::plain("slow")],
//! ];
//!
//! let out = table.render(&rows, &RenderConfig::default());
//! assert_eq!(
//!     out,
//!     "Name    Count  Note\n\
//!      alpha       3  ok\n\
//!      beta       12  slow\n"
//! );
//! ```

use std::io::Write;

use console::Style;

use crate::cell::Cell;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::layout::{Align, Column, ResolvedWidths, TableSpec, WidthBudget};
use crate::metrics::{pad_left, pad_right};

/// One data row: a cell per column, in column order.
///
/// Rows shorter than the column list render empty cells for the missing
/// columns; extra cells are ignored.
pub type Row = Vec<Cell>;

/// Formats cells into fixed-width lines for a resolved layout.
pub(crate) struct LineFormatter<'a> {
    spec: &'a TableSpec,
    widths: &'a ResolvedWidths,
    color: bool,
}

impl<'a> LineFormatter<'a> {
    pub(crate) fn new(spec: &'a TableSpec, widths: &'a ResolvedWidths, color: bool) -> Self {
        LineFormatter {
            spec,
            widths,
            color,
        }
    }

    /// Format one cell for column `index`.
    ///
    /// A left-aligned cell in the final column is not padded, so lines never
    /// end in whitespace.
    pub(crate) fn cell(&self, index: usize, cell: &Cell) -> String {
        let column = &self.spec.columns[index];
        let width = self.widths.get(index).unwrap_or(0);
        let rendered = cell.fit(width, column.truncation).render(self.color);
        let last = index + 1 == self.spec.columns.len();

        match column.align {
            Align::Right => pad_left(&rendered, width),
            Align::Left if last => rendered,
            Align::Left => pad_right(&rendered, width),
        }
    }

    /// Format a full line from cells in column order.
    pub(crate) fn line(&self, cells: &[Cell]) -> String {
        let empty = Cell::empty();
        (0..self.spec.columns.len())
            .map(|i| self.cell(i, cells.get(i).unwrap_or(&empty)))
            .collect::<Vec<_>>()
            .join(&self.spec.separator)
    }
}

/// A flat table renderer.
#[derive(Clone, Debug)]
pub struct FlatTable {
    spec: TableSpec,
    header_style: Option<Style>,
}

impl FlatTable {
    /// Create a table over `columns` with the default separator.
    pub fn new(columns: Vec<Column>) -> Self {
        Self::from_spec(TableSpec::new(columns))
    }

    /// Create a table from a full spec.
    pub fn from_spec(spec: TableSpec) -> Self {
        FlatTable {
            spec,
            header_style: None,
        }
    }

    /// Style applied to header labels when color is enabled.
    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = Some(style);
        self
    }

    /// The table's layout spec.
    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    /// Resolve column widths for `rows` under `config`.
    pub fn resolve(&self, rows: &[Row], config: &RenderConfig) -> ResolvedWidths {
        self.spec
            .resolve_widths_from_cells(rows, config.width_budget, config.wide_threshold)
    }

    /// Header line plus one line per row, without line terminators.
    pub fn lines(&self, rows: &[Row], config: &RenderConfig) -> Vec<String> {
        let widths = self.resolve(rows, config);
        let formatter = LineFormatter::new(&self.spec, &widths, config.color);

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(formatter.line(&self.header_cells()));
        lines.extend(rows.iter().map(|row| formatter.line(row)));
        lines
    }

    /// Render the table to a string, one terminated line per row.
    pub fn render(&self, rows: &[Row], config: &RenderConfig) -> String {
        self.lines(rows, config)
            .into_iter()
            .map(|line| line + "\n")
            .collect()
    }

    /// Write the table to `out`.
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        rows: &[Row],
        config: &RenderConfig,
    ) -> Result<(), RenderError> {
        for line in self.lines(rows, config) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn header_cells(&self) -> Vec<Cell> {
        self.spec
            .columns
            .iter()
            .map(|c| match &self.header_style {
                Some(style) => Cell::styled(c.name.clone(), style.clone()),
                None => Cell::plain(c.name.clone()),
            })
            .collect()
    }
}

/// Render `rows` under `columns` as plain text within `budget`.
///
/// ```rust
/// use statgrid::{render_flat_table, Cell, Column};
///
/// let out = render_flat_table(
///     &[Column::new("Task", 4), Column::new("State", 5)],
///     &[vec![Cell::plain("build"), Cell::plain("done")]],
///     0usize,
/// );
/// assert_eq!(out, "Task   State\nbuild  done\n");
/// ```
pub fn render_flat_table(
    columns: &[Column],
    rows: &[Row],
    budget: impl Into<WidthBudget>,
) -> String {
    let config = RenderConfig::default().width_budget(budget);
    FlatTable::new(columns.to_vec()).render(rows, &config)
}
