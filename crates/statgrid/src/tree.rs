//! Two-level tree rendering: group rows with their children nested below.
//!
//! Each [`Group`] renders as one row across four columns (workspace, branch,
//! status, progress). Its children follow, drawn with tree connectors and
//! lined up under the same status and progress columns:
//!
//! ```text
//! Workspace   Branch             Status      Progress
//! api (5)     task/api-20260103  running     —
//!   ├─ api-1                     completed   100%
//!   ├─ api-2                     running     ██░░░░░░
//!   ├─ api-3                     pending     0%
//!   └─ +2 more
//! ```
//!
//! Only the first [`RenderConfig::max_children_per_group`] children are
//! shown; the rest collapse into a single `+N more` row.

use std::io::Write;

use console::Style;

use crate::cell::Cell;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::layout::{Column, ResolvedWidths, TableSpec, Truncation, WidthBudget};
use crate::metrics::{pad_right, visible_width};
use crate::table::LineFormatter;

/// Connector for every child row except the final one.
pub const BRANCH: &str = "├─";
/// Connector for the final row under a group.
pub const LAST_BRANCH: &str = "└─";
/// Leading indent of child rows.
pub const INDENT: &str = "  ";
/// Placeholder in the progress column of group rows.
pub const EM_DASH: &str = "—";
/// Cells in a progress bar.
pub const BAR_WIDTH: usize = 8;
/// Completed portion of a progress bar.
pub const BAR_FILLED: char = '█';
/// Remaining portion of a progress bar.
pub const BAR_EMPTY: char = '░';

const WORKSPACE: usize = 0;
const BRANCH_COL: usize = 1;
const STATUS: usize = 2;
const PROGRESS: usize = 3;

/// Coarse progress state of a child, which picks its progress indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Finished successfully: shown as `100%`.
    Succeeded,
    /// In flight: shown as a bar.
    Running,
    /// Anything else: shown as a percentage.
    Other,
}

impl Phase {
    /// Classify a status label.
    ///
    /// ```rust
    /// use statgrid::Phase;
    ///
    /// assert_eq!(Phase::from_status("merged"), Phase::Succeeded);
    /// assert_eq!(Phase::from_status("in_progress"), Phase::Running);
    /// assert_eq!(Phase::from_status("failed"), Phase::Other);
    /// ```
    pub fn from_status(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "completed" | "done" | "merged" => Phase::Succeeded,
            "running" | "in_progress" | "validating" | "active" => Phase::Running,
            _ => Phase::Other,
        }
    }
}

/// A nested row under a [`Group`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Child {
    /// Identifier shown after the connector.
    pub id: String,
    /// Status cell, aligned under the group's status column.
    pub status: Cell,
    /// Picks the progress indicator.
    pub phase: Phase,
    /// `(current, total)` steps.
    pub progress: (u64, u64),
}

impl Child {
    /// A child whose phase is derived from the plain status text.
    pub fn new(id: impl Into<String>, status: impl Into<Cell>) -> Self {
        let status = status.into();
        Child {
            id: id.into(),
            phase: Phase::from_status(status.text()),
            status,
            progress: (0, 0),
        }
    }

    /// Override the phase derived from the status text.
    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    /// Set the `(current, total)` step counts.
    pub fn progress(mut self, current: u64, total: u64) -> Self {
        self.progress = (current, total);
        self
    }

    fn progress_cell(&self) -> Cell {
        let (current, total) = self.progress;
        match self.phase {
            Phase::Succeeded => Cell::styled("100%", Style::new().green()),
            Phase::Running => progress_bar(current, total),
            Phase::Other => {
                let percent = if total == 0 {
                    0
                } else {
                    u128::from(current) * 100 / u128::from(total)
                };
                Cell::plain(format!("{}%", percent))
            }
        }
    }
}

/// A top-level row owning zero or more children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Group {
    /// Display name in the workspace column.
    pub name: String,
    /// Branch cell, shortened as a path when space is tight.
    pub branch: Cell,
    /// Aggregate status of the group.
    pub status: Cell,
    /// Loaded children, in display order.
    pub children: Vec<Child>,
    total: Option<usize>,
}

impl Group {
    /// A group with no status and no children.
    pub fn new(name: impl Into<String>, branch: impl Into<Cell>) -> Self {
        Group {
            name: name.into(),
            branch: branch.into(),
            ..Group::default()
        }
    }

    /// Set the group status.
    pub fn status(mut self, status: impl Into<Cell>) -> Self {
        self.status = status.into();
        self
    }

    /// Append one child.
    pub fn child(mut self, child: Child) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    pub fn children(mut self, children: impl IntoIterator<Item = Child>) -> Self {
        self.children.extend(children);
        self
    }

    /// Declare how many children the group has in total, when only some of
    /// them were loaded. Only the `(N)` badge uses it; the `+N more` row
    /// counts loaded children past the cap.
    pub fn total_children(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    /// Total child count: the declared total, never less than the children held.
    pub fn child_count(&self) -> usize {
        self.total
            .map_or(self.children.len(), |t| t.max(self.children.len()))
    }

    fn label(&self) -> Cell {
        let count = self.child_count();
        if count == 0 {
            return Cell::plain(self.name.clone());
        }
        let suffix = format!("({})", count);
        let dimmed = Style::new().dim().apply_to(&suffix).force_styling(true);
        Cell::raw(
            format!("{} {}", self.name, suffix),
            format!("{} {}", self.name, dimmed),
        )
    }
}

/// Row kinds of a laid-out tree, before formatting.
enum TreeRow<'a> {
    Group {
        group: &'a Group,
        label: Cell,
    },
    Child {
        child: &'a Child,
        connector: &'static str,
        progress: Cell,
    },
    More(usize),
}

/// Renders groups and their children as an aligned tree.
#[derive(Clone, Debug)]
pub struct TreeView {
    spec: TableSpec,
    show_header: bool,
    header_style: Option<Style>,
}

impl Default for TreeView {
    fn default() -> Self {
        TreeView {
            spec: TableSpec::new(vec![
                Column::new("Workspace", 10).variable(1),
                Column::new("Branch", 12).variable(0).path(),
                Column::new("Status", 10),
                Column::new("Progress", 8),
            ]),
            show_header: true,
            header_style: None,
        }
    }
}

impl TreeView {
    /// A tree with the standard four columns and a header row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show or hide the header row.
    pub fn header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    /// Style applied to header labels when color is enabled.
    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = Some(style);
        self
    }

    /// The tree's column layout.
    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    /// Rendered lines, without terminators. No groups means no lines.
    pub fn lines(&self, groups: &[Group], config: &RenderConfig) -> Vec<String> {
        if groups.is_empty() {
            return Vec::new();
        }

        let rows = layout_rows(groups, config.max_children_per_group);
        let widths = self.resolve(&rows, config);
        let formatter = LineFormatter::new(&self.spec, &widths, config.color);

        let separator = self.spec.separator.as_str();
        let label_span = widths.get(WORKSPACE).unwrap_or(0)
            + visible_width(separator)
            + widths.get(BRANCH_COL).unwrap_or(0);

        let mut lines = Vec::with_capacity(rows.len() + 1);
        if self.show_header {
            lines.push(formatter.line(&self.header_cells()));
        }

        for row in &rows {
            let line = match row {
                TreeRow::Group { group, label } => formatter.line(&[
                    label.clone(),
                    group.branch.clone(),
                    group.status.clone(),
                    Cell::plain(EM_DASH),
                ]),
                TreeRow::Child {
                    child,
                    connector,
                    progress,
                } => {
                    let label = child_label(connector, &child.id)
                        .fit(label_span, Truncation::End)
                        .render(config.color);
                    [
                        pad_right(&label, label_span),
                        formatter.cell(STATUS, &child.status),
                        formatter.cell(PROGRESS, progress),
                    ]
                    .join(separator)
                }
                TreeRow::More(hidden) => {
                    Cell::styled(
                        format!("{}{} +{} more", INDENT, LAST_BRANCH, hidden),
                        Style::new().dim(),
                    )
                    .fit(label_span, Truncation::End)
                    .render(config.color)
                }
            };
            lines.push(line);
        }
        lines
    }

    /// Render to a string, one terminated line per row.
    pub fn render(&self, groups: &[Group], config: &RenderConfig) -> String {
        self.lines(groups, config)
            .into_iter()
            .map(|line| line + "\n")
            .collect()
    }

    /// Write the tree to `out`.
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        groups: &[Group],
        config: &RenderConfig,
    ) -> Result<(), RenderError> {
        for line in self.lines(groups, config) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Child labels span the first two columns and never widen them.
    fn resolve(&self, rows: &[TreeRow<'_>], config: &RenderConfig) -> ResolvedWidths {
        let data: Vec<Vec<usize>> = rows
            .iter()
            .filter_map(|row| match row {
                TreeRow::Group { group, label } => Some(vec![
                    label.width(),
                    group.branch.width(),
                    group.status.width(),
                    EM_DASH.chars().count(),
                ]),
                TreeRow::Child {
                    child, progress, ..
                } => Some(vec![0, 0, child.status.width(), progress.width()]),
                TreeRow::More(_) => None,
            })
            .collect();
        self.spec
            .resolve_widths(&data, config.width_budget, config.wide_threshold)
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

/// Render `groups` as a plain-text tree within `budget`, showing up to three
/// children per group.
pub fn render_hierarchy(groups: &[Group], budget: impl Into<WidthBudget>) -> String {
    let config = RenderConfig::default().width_budget(budget);
    TreeView::new().render(groups, &config)
}

fn layout_rows(groups: &[Group], max_children: usize) -> Vec<TreeRow<'_>> {
    let mut rows = Vec::new();
    for group in groups {
        rows.push(TreeRow::Group {
            group,
            label: group.label(),
        });

        let shown = group.children.len().min(max_children);
        let hidden = group.children.len() - shown;
        for (i, child) in group.children[..shown].iter().enumerate() {
            let last = i + 1 == shown && hidden == 0;
            rows.push(TreeRow::Child {
                child,
                connector: if last { LAST_BRANCH } else { BRANCH },
                progress: child.progress_cell(),
            });
        }
        if hidden > 0 {
            rows.push(TreeRow::More(hidden));
        }
    }
    rows
}

fn child_label(connector: &str, id: &str) -> Cell {
    let dimmed = Style::new().dim().apply_to(connector).force_styling(true);
    Cell::raw(
        format!("{}{} {}", INDENT, connector, id),
        format!("{}{} {}", INDENT, dimmed, id),
    )
}

fn progress_bar(current: u64, total: u64) -> Cell {
    let filled = if total == 0 {
        0
    } else {
        (u128::from(current.min(total)) * BAR_WIDTH as u128 / u128::from(total)) as usize
    };
    let done: String = std::iter::repeat(BAR_FILLED).take(filled).collect();
    let rest: String = std::iter::repeat(BAR_EMPTY).take(BAR_WIDTH - filled).collect();
    Cell::raw(
        format!("{}{}", done, rest),
        format!(
            "{}{}",
            Style::new().green().apply_to(&done).force_styling(true),
            Style::new().dim().apply_to(&rest).force_styling(true)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::strip_escapes;

    fn api_group() -> Group {
        Group::new("api", "task/api-20260103")
            .status("running")
            .children([
                Child::new("api-1", "completed").progress(3, 3),
                Child::new("api-2", "running").progress(1, 4),
                Child::new("api-3", "pending").progress(0, 4),
                Child::new("api-4", "pending").progress(0, 4),
                Child::new("api-5", "pending").progress(0, 4),
            ])
    }

    #[test]
    fn phase_from_status() {
        assert_eq!(Phase::from_status("completed"), Phase::Succeeded);
        assert_eq!(Phase::from_status("done"), Phase::Succeeded);
        assert_eq!(Phase::from_status("Running"), Phase::Running);
        assert_eq!(Phase::from_status("validating"), Phase::Running);
        assert_eq!(Phase::from_status("active"), Phase::Running);
        assert_eq!(Phase::from_status("pending"), Phase::Other);
        assert_eq!(Phase::from_status(""), Phase::Other);
    }

    #[test]
    fn child_phase_follows_status_unless_overridden() {
        assert_eq!(Child::new("a", "merged").phase, Phase::Succeeded);
        assert_eq!(
            Child::new("a", "queued").phase(Phase::Running).phase,
            Phase::Running
        );
    }

    #[test]
    fn progress_indicators() {
        let cell = |c: Child| c.progress_cell().text().to_string();
        assert_eq!(cell(Child::new("a", "done").progress(1, 9)), "100%");
        assert_eq!(cell(Child::new("a", "running").progress(1, 4)), "██░░░░░░");
        assert_eq!(cell(Child::new("a", "running").progress(9, 4)), "████████");
        assert_eq!(cell(Child::new("a", "running").progress(3, 0)), "░░░░░░░░");
        assert_eq!(cell(Child::new("a", "failed").progress(2, 3)), "66%");
        assert_eq!(cell(Child::new("a", "failed").progress(5, 4)), "125%");
        assert_eq!(cell(Child::new("a", "failed").progress(2, 0)), "0%");
    }

    #[test]
    fn progress_handles_full_range_counts() {
        let cell = |c: Child| c.progress_cell().text().to_string();
        assert_eq!(cell(Child::new("a", "failed").progress(u64::MAX, u64::MAX)), "100%");
        assert_eq!(
            cell(Child::new("a", "failed").progress(u64::MAX, 1)),
            format!("{}%", u128::from(u64::MAX) * 100)
        );
        assert_eq!(
            cell(Child::new("a", "running").progress(u64::MAX / 2, u64::MAX)),
            "███░░░░░"
        );
        assert_eq!(
            cell(Child::new("a", "running").progress(u64::MAX, u64::MAX)),
            "████████"
        );
    }

    #[test]
    fn progress_bar_styled_form_keeps_width() {
        let bar = progress_bar(3, 8);
        assert!(bar.is_styled());
        assert_eq!(visible_width(&bar.render(true)), BAR_WIDTH);
    }

    #[test]
    fn child_count_never_below_loaded_children() {
        let group = api_group();
        assert_eq!(group.child_count(), 5);
        assert_eq!(group.clone().total_children(12).child_count(), 12);
        assert_eq!(group.total_children(2).child_count(), 5);
    }

    #[test]
    fn group_label_shows_count_only_with_children() {
        assert_eq!(api_group().label().text(), "api (5)");
        assert_eq!(Group::new("web", "main").label().text(), "web");
    }

    #[test]
    fn renders_capped_tree() {
        let out = TreeView::new().render(&[api_group()], &RenderConfig::default());
        let expected = [
            "Workspace   Branch             Status      Progress",
            "api (5)     task/api-20260103  running     —",
            "  ├─ api-1                     completed   100%",
            "  ├─ api-2                     running     ██░░░░░░",
            "  ├─ api-3                     pending     0%",
            "  └─ +2 more",
        ];
        assert_eq!(out, expected.join("\n") + "\n");
    }

    #[test]
    fn last_shown_child_closes_branch_when_nothing_hidden() {
        let group = Group::new("web", "main")
            .status("running")
            .children([Child::new("w-1", "done"), Child::new("w-2", "running")]);
        let lines = TreeView::new()
            .header(false)
            .lines(&[group], &RenderConfig::default());
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("  ├─ w-1"));
        assert!(lines[2].starts_with("  └─ w-2"));
    }

    #[test]
    fn declared_total_only_changes_badge() {
        let group = Group::new("web", "main")
            .child(Child::new("w-1", "pending"))
            .total_children(4);
        let lines = TreeView::new()
            .header(false)
            .lines(&[group], &RenderConfig::default());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("web (4)"));
        assert!(lines[1].starts_with("  └─ w-1"));
    }

    #[test]
    fn more_row_counts_loaded_children_past_cap() {
        let group = api_group().total_children(9);
        let lines = TreeView::new()
            .header(false)
            .lines(&[group], &RenderConfig::default());
        assert!(lines[0].starts_with("api (9)"));
        assert_eq!(lines[4], "  └─ +2 more");
    }

    #[test]
    fn single_loaded_child_of_larger_group_closes_branch() {
        let group = Group::new("web", "main")
            .child(Child::new("w-1", "pending"))
            .total_children(4);
        let out = render_hierarchy(&[group], 0usize);
        assert!(out.contains("└─ w-1"));
        assert!(!out.contains("├─"));
        assert!(!out.contains("more"));
    }

    #[test]
    fn zero_cap_collapses_all_children() {
        let config = RenderConfig::default().max_children_per_group(0);
        let lines = TreeView::new().header(false).lines(&[api_group()], &config);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "  └─ +5 more");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render_hierarchy(&[], 80usize), "");
    }

    #[test]
    fn narrow_budget_shrinks_branch_first() {
        let config = RenderConfig::default().width_budget(40usize);
        let lines = TreeView::new().lines(&[api_group()], &config);
        assert!(lines[1].contains("task/api-..."));
        // Workspace is already at its minimum, so the rest overflows softly.
        assert_eq!(visible_width(&lines[0]), 10 + 2 + 12 + 2 + 10 + 2 + 8);
    }

    #[test]
    fn child_columns_line_up_with_group_columns() {
        let config = RenderConfig::default().color(true);
        let lines = TreeView::new().lines(&[api_group()], &config);
        let status_at = |l: &str, word: &str| {
            let plain = strip_escapes(l);
            plain[..plain.find(word).unwrap()].chars().count()
        };
        let group_status = status_at(&lines[1], "running");
        assert_eq!(status_at(&lines[2], "completed"), group_status);
        assert_eq!(status_at(&lines[4], "pending"), group_status);
    }

    #[test]
    fn color_dims_connectors_and_count() {
        let config = RenderConfig::default().color(true);
        let lines = TreeView::new()
            .header(false)
            .lines(&[api_group()], &config);
        assert!(lines[0].starts_with("api \x1b[2m(5)\x1b[0m"));
        assert!(lines[1].starts_with("  \x1b[2m├─\x1b[0m api-1"));
        assert_eq!(lines[4], "\x1b[2m  └─ +2 more\x1b[0m");
    }
}
