//! `studyplan order`: print a prerequisite-first ordering of all chapters.

use std::io::Write;
use std::path::Path;

use clap::Args;
use serde::Serialize;
use studyplan_core::config::ProjectConfig;
use studyplan_core::error::ErrorCode;
use studyplan_solver::{build_adjacency, detect_cycle, topological_sort};

use super::input::{InputArgs, load_chapters};
use crate::output::{CliError, OutputMode, pretty_section, render_error, render_mode};

/// Arguments for `studyplan order`.
#[derive(Args, Debug, Default)]
pub struct OrderArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
struct OrderOutput {
    /// Every id in the graph, dangling prerequisites included.
    order: Vec<String>,
}

/// Execute `studyplan order`.
pub fn run_order(
    args: &OrderArgs,
    output: OutputMode,
    project_root: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let chapters = load_chapters(&args.input, config, project_root, output)?;
    let adj = build_adjacency(&chapters);

    let check = detect_cycle(&adj);
    if check.has_cycle {
        render_error(
            output,
            &CliError::with_code(
                ErrorCode::CycleDetected,
                format!("no topological order exists: {}", check.cycle.join(" -> ")),
            ),
        )?;
        anyhow::bail!("prerequisite cycle detected");
    }

    let payload = OrderOutput {
        order: topological_sort(&adj),
    };
    render_mode(output, &payload, render_order_text, render_order_pretty)
}

fn render_order_text(payload: &OrderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for id in &payload.order {
        writeln!(w, "{id}")?;
    }
    Ok(())
}

fn render_order_pretty(payload: &OrderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Study order")?;
    for (pos, id) in payload.order.iter().enumerate() {
        writeln!(w, "{:>3}. {id}", pos + 1)?;
    }
    Ok(())
}
