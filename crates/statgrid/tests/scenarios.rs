use console::Style;
use insta::assert_snapshot;
use statgrid::{
    render_flat_table, render_hierarchy, visible_width, Cell, Child, Column, FlatTable, Group,
    RenderConfig, Row, TreeView,
};

fn status_columns() -> Vec<Column> {
    vec![
        Column::new("Workspace", 10).variable(1),
        Column::new("Branch", 12).variable(0).path(),
        Column::new("Status", 18),
        Column::new("Step", 6).right(),
        Column::new("Action", 10).variable(2),
    ]
}

fn status_rows() -> Vec<Row> {
    [
        [
            "task-workspace",
            "task/task-workspace-20260103-165907",
            "completed",
            "3/3",
            "merge",
        ],
        ["docs", "task/docs-20260104-091500", "running", "1/4", "wait"],
    ]
    .iter()
    .map(|row| row.iter().map(|c| Cell::plain(*c)).collect())
    .collect()
}

fn workspace_group(name: &str, children: usize) -> Group {
    Group::new(name, format!("task/{}-20260103", name))
        .status("running")
        .children((1..=children).map(|i| {
            Child::new(format!("{}-{}", name, i), "pending").progress(0, 4)
        }))
}

#[test]
fn flat_table_fits_80_columns() {
    let out = render_flat_table(&status_columns(), &status_rows(), 80usize);

    let header = out.lines().next().unwrap();
    for name in ["Workspace", "Branch", "Status", "Step", "Action"] {
        assert!(header.contains(name), "missing header {name}");
    }
    assert!(out.lines().all(|l| visible_width(l) <= 80));

    assert_snapshot!(out, @r"
    Workspace       Branch                    Status                Step  Action
    task-workspace  task/task-workspace-2...  completed              3/3  merge
    docs            .../docs-20260104-091500  running                1/4  wait
    ");
}

#[test]
fn flat_table_narrow_terminal_overflows_softly() {
    let out = render_flat_table(&status_columns(), &status_rows(), 50usize);

    assert_snapshot!(out, @r"
    Workspace   Branch        Status                Step  Action
    task-wo...  task/task...  completed              3/3  merge
    docs        task/docs...  running                1/4  wait
    ");
}

#[test]
fn flat_table_wide_terminal_expands_variable_columns() {
    let config = RenderConfig::new().width_budget(200usize);
    let table = FlatTable::new(status_columns());

    assert_eq!(
        table.resolve(&status_rows(), &config).widths,
        vec![21, 52, 18, 6, 15]
    );
    assert!(table
        .lines(&status_rows(), &config)
        .iter()
        .all(|l| visible_width(l) <= 200));
}

#[test]
fn flat_table_unconstrained_uses_natural_widths() {
    let config = RenderConfig::new();
    let widths = FlatTable::new(status_columns())
        .resolve(&status_rows(), &config)
        .widths;
    assert_eq!(widths, vec![14, 35, 18, 6, 10]);
}

#[test]
fn styled_first_column_keeps_alignment() {
    let rows: Vec<Row> = vec![
        vec![
            Cell::styled("active", Style::new().blue()),
            Cell::plain("main"),
        ],
        vec![Cell::plain("idle"), Cell::plain("dev")],
    ];
    let table = FlatTable::new(vec![Column::new("Name", 4), Column::new("Branch", 6)]);
    let lines = table.lines(&rows, &RenderConfig::new().color(true));

    assert_eq!(lines[1], "\x1b[34mactive\x1b[0m  main");
    assert_eq!(lines[2], "idle    dev");
}

#[test]
fn visible_width_ignores_color_codes() {
    assert_eq!(visible_width("\x1b[34mactive\x1b[0m"), 6);
}

#[test]
fn tree_caps_children_with_more_row() {
    let out = render_hierarchy(&[workspace_group("api", 5)], 0usize);

    assert!(out.contains("api-3"));
    assert!(!out.contains("api-4"));
    assert!(!out.contains("api-5"));
    assert_eq!(out.lines().filter(|l| l.contains("├─")).count(), 3);

    assert_snapshot!(out, @r"
    Workspace   Branch             Status      Progress
    api (5)     task/api-20260103  running     —
      ├─ api-1                     pending     0%
      ├─ api-2                     pending     0%
      ├─ api-3                     pending     0%
      └─ +2 more
    ");
}

#[test]
fn tree_single_child_uses_last_connector() {
    let out = render_hierarchy(&[workspace_group("web", 1)], 0usize);

    assert!(out.contains("└─ web-1"));
    assert!(!out.contains("├─"));
}

#[test]
fn tree_groups_render_in_order() {
    let groups = [
        workspace_group("api", 2),
        Group::new("docs", "task/docs").status("completed"),
        workspace_group("web", 1),
    ];
    let lines = TreeView::new()
        .header(false)
        .lines(&groups, &RenderConfig::new());

    let starts: Vec<&str> = lines
        .iter()
        .map(|l| l.split_whitespace().next().unwrap_or(""))
        .collect();
    assert_eq!(starts, ["api", "├─", "└─", "docs", "web", "└─"]);
}

#[test]
fn tree_write_to_matches_render() {
    let groups = [workspace_group("api", 4)];
    let config = RenderConfig::new().width_budget(60usize);
    let view = TreeView::new();

    let mut buf = Vec::new();
    view.write_to(&mut buf, &groups, &config).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), view.render(&groups, &config));
}
