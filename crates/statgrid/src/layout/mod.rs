//! Column layout: table shapes, width budgets and width resolution.
//!
//! A [`TableSpec`] lists the columns of a table. Each [`Column`] declares a
//! minimum width, an alignment, a truncation mode and, for variable columns,
//! a shrink priority. [`TableSpec::resolve_widths`] turns a spec, the plain
//! widths of the rows to render and a [`WidthBudget`] into [`ResolvedWidths`].
//!
//! ```rust
//! use statgrid::{Column, TableSpec, WidthBudget};
//!
//! let spec = TableSpec::builder()
//!     .column(Column::new("Workspace", 10).variable(1))
//!     .column(Column::new("Branch", 12).variable(0).path())
//!     .column(Column::new("Status", 18))
//!     .build();
//!
//! let resolved = spec.resolve_widths(&[vec![14, 35, 9]], WidthBudget::new(60), 120);
//! assert_eq!(spec.row_width(&resolved.widths), 60);
//! ```

mod budget;
mod resolve;
mod types;

pub use budget::WidthBudget;
pub use resolve::ResolvedWidths;
pub use types::{Align, Column, TableSpec, TableSpecBuilder, Truncation, DEFAULT_SEPARATOR};
