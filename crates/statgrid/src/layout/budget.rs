//! The terminal-width budget a render call may use.

use serde::{Deserialize, Serialize};

/// Total terminal columns available to a render call.
///
/// Zero, negative, or missing budgets all mean "unconstrained": columns take
/// exactly the width their headers and content need.
///
/// ```rust
/// use statgrid::WidthBudget;
///
/// assert_eq!(WidthBudget::new(80).columns(), Some(80));
/// assert_eq!(WidthBudget::new(0).columns(), None);
/// assert_eq!(WidthBudget::new(-5).columns(), None);
/// assert!(!WidthBudget::default().is_constrained());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub struct WidthBudget(Option<usize>);

impl WidthBudget {
    /// No width limit.
    pub const UNCONSTRAINED: WidthBudget = WidthBudget(None);

    /// Budget of `columns` terminal columns; non-positive values are unconstrained.
    pub fn new(columns: i64) -> Self {
        WidthBudget(usize::try_from(columns).ok().filter(|&c| c > 0))
    }

    /// The column limit, if any.
    pub fn columns(&self) -> Option<usize> {
        self.0
    }

    /// Returns `true` when a positive limit is set.
    pub fn is_constrained(&self) -> bool {
        self.0.is_some()
    }

    /// Budget from a terminal-width probe, falling back to `default` when the
    /// width is unknown (`None` keeps it unconstrained).
    pub fn from_probe(probed: Option<usize>, default: Option<usize>) -> Self {
        WidthBudget::from(probed.or(default))
    }
}

impl From<usize> for WidthBudget {
    fn from(columns: usize) -> Self {
        WidthBudget(Some(columns).filter(|&c| c > 0))
    }
}

impl From<Option<usize>> for WidthBudget {
    fn from(columns: Option<usize>) -> Self {
        columns.map_or(WidthBudget::UNCONSTRAINED, WidthBudget::from)
    }
}

impl From<Option<i64>> for WidthBudget {
    fn from(columns: Option<i64>) -> Self {
        columns.map_or(WidthBudget::UNCONSTRAINED, WidthBudget::new)
    }
}

impl From<WidthBudget> for Option<i64> {
    fn from(budget: WidthBudget) -> Self {
        budget.0.map(|c| c as i64)
    }
}
