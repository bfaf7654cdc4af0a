//! `studyplan closure`: list every chapter's transitive prerequisites.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use clap::Args;
use serde::Serialize;
use studyplan_core::config::ProjectConfig;
use studyplan_solver::{build_adjacency, detect_cycle, transitive_prereqs};
use tracing::warn;

use super::input::{InputArgs, load_chapters};
use crate::output::{OutputMode, render};

/// Arguments for `studyplan closure`.
#[derive(Args, Debug, Default)]
pub struct ClosureArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
struct ClosureEntry {
    id: String,
    /// All transitive prerequisites, sorted.
    requires: Vec<String>,
    /// The subset of `requires` that is not a chapter in the file.
    missing: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ClosureOutput {
    chapters: Vec<ClosureEntry>,
}

/// Execute `studyplan closure`.
///
/// Entries follow input order. A cycle is reported as a warning only, since
/// ancestor sets are well defined on cyclic graphs.
pub fn run_closure(
    args: &ClosureArgs,
    output: OutputMode,
    project_root: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let chapters = load_chapters(&args.input, config, project_root, output)?;
    let adj = build_adjacency(&chapters);

    let check = detect_cycle(&adj);
    if check.has_cycle {
        warn!(cycle = %check.cycle.join(" -> "), "prerequisite graph is cyclic");
    }

    let known: HashSet<&str> = chapters.iter().map(|c| c.id.as_str()).collect();
    let mut ancestors = transitive_prereqs(&adj);
    let payload = ClosureOutput {
        chapters: chapters
            .iter()
            .map(|ch| {
                let requires: Vec<String> = ancestors
                    .remove(&ch.id)
                    .unwrap_or_default()
                    .into_iter()
                    .collect();
                let missing = requires
                    .iter()
                    .filter(|id| !known.contains(id.as_str()))
                    .cloned()
                    .collect();
                ClosureEntry {
                    id: ch.id.clone(),
                    requires,
                    missing,
                }
            })
            .collect(),
    };

    render(output, &payload, render_closure_human)
}

fn render_closure_human(payload: &ClosureOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for entry in &payload.chapters {
        if entry.requires.is_empty() {
            writeln!(w, "{}: (none)", entry.id)?;
        } else {
            writeln!(w, "{}: {}", entry.id, entry.requires.join(", "))?;
        }
        if !entry.missing.is_empty() {
            writeln!(w, "  missing: {}", entry.missing.join(", "))?;
        }
    }
    Ok(())
}
