//! Display cells: plain text with an optional styled twin.
//!
//! Layout always measures the plain form. The styled form is what reaches
//! the terminal when color is enabled, and it must occupy exactly the same
//! number of visible columns.

use console::Style;
use tracing::warn;

use crate::layout::Truncation;
use crate::metrics::{truncate, truncate_path, visible_width};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum Styling {
    #[default]
    None,
    /// Re-applied after truncation, so the styled form always tracks the plain one.
    Style(Style),
    /// Pre-rendered bytes (hyperlinks, mixed styles). Dropped when the cell is cut.
    Raw(String),
}

/// A single table or tree cell.
///
/// # Example
///
/// ```rust
/// use console::Style;
/// use statgrid::Cell;
///
/// let cell = Cell::styled("completed", Style::new().green());
/// assert_eq!(cell.width(), 9);
/// assert_eq!(cell.render(false), "completed");
/// assert_eq!(cell.render(true), "\x1b[32mcompleted\x1b[0m");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    plain: String,
    styling: Styling,
}

impl Cell {
    /// Creates an unstyled cell.
    pub fn plain(text: impl Into<String>) -> Self {
        Cell {
            plain: text.into(),
            styling: Styling::None,
        }
    }

    /// Creates a cell whose styled form is `style` applied to `text`.
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Cell {
            plain: text.into(),
            styling: Styling::Style(style),
        }
    }

    /// Creates a cell from a plain string and an already-styled rendering of it.
    ///
    /// If the two forms do not have the same visible width the styled form is
    /// discarded, since padding it against the plain width would misalign
    /// every column to its right.
    pub fn raw(plain: impl Into<String>, styled: impl Into<String>) -> Self {
        let plain = plain.into();
        let styled = styled.into();
        let (plain_width, styled_width) = (visible_width(&plain), visible_width(&styled));
        if plain_width != styled_width {
            warn!(
                plain = %plain,
                plain_width,
                styled_width,
                "styled cell width differs from plain text; dropping styling"
            );
            return Cell::plain(plain);
        }
        Cell {
            plain,
            styling: Styling::Raw(styled),
        }
    }

    /// An empty cell.
    pub fn empty() -> Self {
        Cell::default()
    }

    /// The plain text.
    pub fn text(&self) -> &str {
        &self.plain
    }

    /// Visible width of the plain text.
    pub fn width(&self) -> usize {
        visible_width(&self.plain)
    }

    /// Returns `true` if this cell carries a styled form.
    pub fn is_styled(&self) -> bool {
        !matches!(self.styling, Styling::None)
    }

    /// Returns the bytes to emit: the styled form when `color` is set, else the plain one.
    pub fn render(&self, color: bool) -> String {
        if !color {
            return self.plain.clone();
        }
        match &self.styling {
            Styling::None => self.plain.clone(),
            Styling::Style(style) => style
                .apply_to(&self.plain)
                .force_styling(true)
                .to_string(),
            Styling::Raw(styled) => styled.clone(),
        }
    }

    /// Shrinks the cell to at most `width` visible columns.
    ///
    /// The plain form is truncated with the ellipsis rules of `truncation`,
    /// then hard-cut if it still does not fit (the ellipsis is skipped for
    /// widths of three or less). A [`Style`] is carried over to the shorter
    /// text; a raw styled form cannot be re-derived and is dropped.
    pub fn fit(&self, width: usize, truncation: Truncation) -> Cell {
        if self.width() <= width {
            return self.clone();
        }

        let shortened = match truncation {
            Truncation::End => truncate(&self.plain, width),
            Truncation::Path => truncate_path(&self.plain, width),
        };
        let plain: String = shortened.chars().take(width).collect();

        let styling = match &self.styling {
            Styling::Style(style) => Styling::Style(style.clone()),
            Styling::None | Styling::Raw(_) => Styling::None,
        };
        Cell { plain, styling }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::plain(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::plain(text)
    }
}
