//! Renders a sample set of task workspaces as a flat table or a tree.
//!
//! ```text
//! statgrid table --width 80
//! statgrid tree --max-children 2 --color always
//! RUST_LOG=statgrid=debug statgrid -v table --width 40
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::Style;
use statgrid::{Cell, Child, Column, FlatTable, Group, RenderConfig, Row, TreeView};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "statgrid", about = "Render workspace status tables")]
struct Cli {
    /// Terminal width to lay out for (0 = unconstrained; default: detect)
    #[arg(long, global = true)]
    width: Option<i64>,

    /// When to emit colors
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,

    /// Children shown per workspace in tree view
    #[arg(long, global = true)]
    max_children: Option<usize>,

    /// YAML file with render settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log layout decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One row per workspace
    Table,
    /// Workspaces with their tasks nested below
    Tree,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        init_logging();
    }

    let config = build_config(&cli)?;
    debug!(?config, "resolved render config");

    let mut out = io::stdout().lock();
    match cli.command {
        Command::Table => FlatTable::new(table_columns())
            .header_style(Style::new().bold())
            .write_to(&mut out, &sample_rows(), &config)?,
        Command::Tree => TreeView::new()
            .header_style(Style::new().bold())
            .write_to(&mut out, &sample_groups(), &config)?,
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Detected terminal settings, then the config file, then flags.
fn build_config(cli: &Cli) -> Result<RenderConfig> {
    let mut config = RenderConfig::detect();
    if let Some(path) = &cli.config {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        config = config
            .merge_yaml(&yaml)
            .with_context(|| format!("invalid config in {}", path.display()))?;
    }

    if let Some(width) = cli.width {
        config.width_budget = statgrid::WidthBudget::new(width);
    }
    if let Some(max) = cli.max_children {
        config.max_children_per_group = max;
    }
    match cli.color {
        ColorChoice::Auto => {}
        ColorChoice::Always => config.color = true,
        ColorChoice::Never => config.color = false,
    }
    Ok(config)
}

fn status_cell(status: &str) -> Cell {
    let style = match status {
        "completed" | "merged" => Style::new().green(),
        "running" | "validating" => Style::new().yellow(),
        "failed" => Style::new().red().bold(),
        _ => Style::new().dim(),
    };
    Cell::styled(status, style)
}

fn table_columns() -> Vec<Column> {
    vec![
        Column::new("Workspace", 10).variable(1),
        Column::new("Branch", 12).variable(0).path(),
        Column::new("Status", 18),
        Column::new("Step", 6).right(),
        Column::new("Action", 10).variable(2),
    ]
}

const WORKSPACES: &[(&str, &str, &str, &str, &str)] = &[
    (
        "task-workspace",
        "task/task-workspace-20260103-165907",
        "completed",
        "3/3",
        "merge",
    ),
    ("docs", "task/docs-20260104-091500", "running", "1/4", "wait"),
    ("api-gateway", "fix/api-gateway-timeouts", "failed", "2/5", "inspect logs"),
    ("web", "main", "pending", "0/2", "start"),
];

fn sample_rows() -> Vec<Row> {
    WORKSPACES
        .iter()
        .map(|&(name, branch, status, step, action)| {
            vec![
                Cell::plain(name),
                Cell::plain(branch),
                status_cell(status),
                Cell::plain(step),
                Cell::plain(action),
            ]
        })
        .collect()
}

fn sample_groups() -> Vec<Group> {
    let tasks = |prefix: &str, states: &[(&str, u64, u64)]| -> Vec<Child> {
        states
            .iter()
            .enumerate()
            .map(|(i, &(status, current, total))| {
                Child::new(format!("{}-{}", prefix, i + 1), status_cell(status))
                    .progress(current, total)
            })
            .collect()
    };

    vec![
        Group::new("task-workspace", "task/task-workspace-20260103-165907")
            .status(status_cell("completed"))
            .children(tasks("tw", &[("completed", 3, 3), ("merged", 2, 2)])),
        Group::new("docs", "task/docs-20260104-091500")
            .status(status_cell("running"))
            .children(tasks(
                "docs",
                &[
                    ("completed", 4, 4),
                    ("running", 1, 4),
                    ("validating", 3, 4),
                    ("pending", 0, 2),
                    ("pending", 0, 3),
                ],
            )),
        Group::new("api-gateway", "fix/api-gateway-timeouts")
            .status(status_cell("failed"))
            .children(tasks("api", &[("failed", 2, 5)]))
            .total_children(6),
        Group::new("web", "main").status(status_cell("pending")),
    ]
}
