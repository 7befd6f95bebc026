//! Width resolution algorithm for table columns.
//!
//! Widths are resolved in four passes:
//!
//! 1. Base: each column starts at `max(min_width, header width)`.
//! 2. Content: columns grow to the widest value they hold.
//! 3. Shrink: if the row (columns plus separators) is wider than the budget,
//!    variable columns give up width in shrink order, each down to its
//!    declared minimum before the next one is touched. Overflow that remains
//!    once every variable column is at its minimum is accepted.
//! 4. Expand: on terminals at least `wide_threshold` columns wide, leftover
//!    space is shared among the variable columns in proportion to their
//!    width, each growing by at most half of what it had.
//!
//! Fixed-role columns are only ever touched by passes 1 and 2.

use tracing::debug;

use super::budget::WidthBudget;
use super::types::TableSpec;
use crate::cell::Cell;

/// Resolved widths for all columns in a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedWidths {
    /// Width for each column in visible columns.
    pub widths: Vec<usize>,
}

impl ResolvedWidths {
    /// Get the width of a specific column.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.widths.get(index).copied()
    }

    /// Get the total width of all columns (without separators).
    pub fn total(&self) -> usize {
        self.widths.iter().sum()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

impl TableSpec {
    /// Resolve column widths from per-cell plain-text widths.
    ///
    /// `data` holds one entry per row, each listing the plain width of the
    /// row's cells in column order. Short rows are fine; extra entries are
    /// ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statgrid::{Column, TableSpec, WidthBudget};
    ///
    /// let spec = TableSpec::new(vec![
    ///     Column::new("Name", 4).variable(0),
    ///     Column::new("Status", 6),
    /// ]);
    ///
    /// let resolved = spec.resolve_widths(&[vec![20, 9]], WidthBudget::new(24), 120);
    /// // 20 + 2 + 9 = 31 overflows by 7; only Name may shrink.
    /// assert_eq!(resolved.widths, vec![13, 9]);
    /// ```
    pub fn resolve_widths(
        &self,
        data: &[Vec<usize>],
        budget: WidthBudget,
        wide_threshold: usize,
    ) -> ResolvedWidths {
        if self.columns.is_empty() {
            return ResolvedWidths { widths: vec![] };
        }

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.base_width()).collect();

        for row in data {
            for (width, &cell_width) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell_width);
            }
        }

        let Some(budget) = budget.columns() else {
            return ResolvedWidths { widths };
        };

        let order = self.shrink_order();
        let total = self.row_width(&widths);

        if total > budget {
            self.shrink(&mut widths, &order, total - budget);
        } else if budget >= wide_threshold {
            expand(&mut widths, &order, budget - total);
        }

        ResolvedWidths { widths }
    }

    /// Resolve column widths by measuring the plain form of every cell.
    pub fn resolve_widths_from_cells(
        &self,
        rows: &[Vec<Cell>],
        budget: WidthBudget,
        wide_threshold: usize,
    ) -> ResolvedWidths {
        let data: Vec<Vec<usize>> = rows
            .iter()
            .map(|row| row.iter().map(Cell::width).collect())
            .collect();
        self.resolve_widths(&data, budget, wide_threshold)
    }

    /// Width of one rendered row: columns plus separators.
    pub fn row_width(&self, widths: &[usize]) -> usize {
        widths.iter().sum::<usize>() + self.separator_overhead()
    }

    fn shrink(&self, widths: &mut [usize], order: &[usize], mut overflow: usize) {
        for &i in order {
            if overflow == 0 {
                break;
            }
            let slack = widths[i].saturating_sub(self.columns[i].min_width);
            let cut = slack.min(overflow);
            widths[i] -= cut;
            overflow -= cut;
        }

        if overflow > 0 {
            debug!(
                overflow,
                "variable columns at minimum; accepting soft overflow"
            );
        } else {
            debug!(widths = ?widths, "shrunk columns to fit budget");
        }
    }
}

fn expand(widths: &mut [usize], order: &[usize], extra: usize) {
    let variable_total: usize = order.iter().map(|&i| widths[i]).sum();
    if extra == 0 || variable_total == 0 {
        return;
    }

    for &i in order {
        let current = widths[i];
        let share = extra * current / variable_total;
        widths[i] = current + share.min(current / 2);
    }
    debug!(extra, widths = ?widths, "expanded variable columns");
}
