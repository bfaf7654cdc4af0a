//! `studyplan check`: validate that the prerequisite graph is acyclic.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use clap::Args;
use serde::Serialize;
use studyplan_core::config::ProjectConfig;
use studyplan_core::error::ErrorCode;
use studyplan_solver::{build_adjacency, detect_cycle};

use super::input::{InputArgs, load_chapters};
use crate::output::{CliError, OutputMode, render, render_error};

/// Arguments for `studyplan check`.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    chapters: usize,
    edges: usize,
    /// Prerequisite ids that are not chapters in the file.
    dangling: Vec<String>,
    has_cycle: bool,
    cycle: Vec<String>,
}

/// Execute `studyplan check`.
pub fn run_check(
    args: &CheckArgs,
    output: OutputMode,
    project_root: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let chapters = load_chapters(&args.input, config, project_root, output)?;
    let adj = build_adjacency(&chapters);
    let check = detect_cycle(&adj);

    let known: HashSet<&str> = chapters.iter().map(|c| c.id.as_str()).collect();
    let payload = CheckOutput {
        chapters: chapters.len(),
        edges: adj.edge_count(),
        dangling: adj
            .ids()
            .iter()
            .filter(|id| !known.contains(id.as_str()))
            .cloned()
            .collect(),
        has_cycle: check.has_cycle,
        cycle: check.cycle,
    };

    render(output, &payload, render_check_human)?;

    if payload.has_cycle {
        render_error(
            output,
            &CliError::with_code(
                ErrorCode::CycleDetected,
                format!("prerequisite cycle: {}", payload.cycle.join(" -> ")),
            ),
        )?;
        anyhow::bail!("prerequisite cycle detected");
    }
    Ok(())
}

fn render_check_human(payload: &CheckOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.has_cycle {
        writeln!(w, "Prerequisite cycle found:")?;
        writeln!(w, "  {}", payload.cycle.join(" -> "))?;
    } else {
        writeln!(
            w,
            "No prerequisite cycles found ({} chapters, {} prerequisite links).",
            payload.chapters, payload.edges
        )?;
    }

    if !payload.dangling.is_empty() {
        writeln!(
            w,
            "Missing prerequisites (chapters needing them cannot be planned): {}",
            payload.dangling.join(", ")
        )?;
    }
    Ok(())
}
