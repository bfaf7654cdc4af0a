//! `studyplan plan`: pick the highest-value chapter set that fits the budget.

use std::io::Write;
use std::path::Path;

use clap::Args;
use serde::Serialize;
use studyplan_core::Chapter;
use studyplan_core::config::{PlanConfig, ProjectConfig, SearchStrategy};
use studyplan_core::error::ErrorCode;
use studyplan_solver::{
    SearchOptions, TracingObserver, build_adjacency, detect_cycle, exact_subset_search_with,
    topological_sort,
};
use tracing::debug;

use super::input::{InputArgs, load_chapters};
use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `studyplan plan`.
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Available study time in minutes (overrides `[plan] time_budget`).
    #[arg(long, value_name = "MINUTES")]
    pub budget: Option<u64>,

    /// Split the search across all cores.
    #[arg(long)]
    pub parallel: bool,

    /// Refuse inputs with more chapters than this (overrides `[plan] max_chapters`).
    #[arg(long, value_name = "N")]
    pub max_chapters: Option<usize>,
}

/// Settings after applying flag overrides to the project config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlanSettings {
    time_budget: u64,
    max_chapters: usize,
    strategy: SearchStrategy,
}

impl PlanSettings {
    fn resolve(args: &PlanArgs, config: &PlanConfig) -> Self {
        Self {
            time_budget: args.budget.unwrap_or(config.time_budget),
            max_chapters: args.max_chapters.unwrap_or(config.max_chapters),
            strategy: if args.parallel {
                SearchStrategy::Parallel
            } else {
                config.strategy
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct PlannedChapter {
    id: String,
    title: String,
    time_minutes: u32,
    score_value: f64,
}

impl From<&Chapter> for PlannedChapter {
    fn from(ch: &Chapter) -> Self {
        Self {
            id: ch.id.clone(),
            title: ch.title.clone(),
            time_minutes: ch.time_minutes,
            score_value: ch.score_value,
        }
    }
}

#[derive(Debug, Serialize)]
struct PlanOutput {
    time_budget: u64,
    topological_order: Vec<String>,
    best_value: f64,
    best_time: u64,
    chosen: Vec<PlannedChapter>,
}

/// Execute `studyplan plan`: load, cycle check, order, optimize, print.
pub fn run_plan(
    args: &PlanArgs,
    output: OutputMode,
    project_root: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let settings = PlanSettings::resolve(args, &config.plan);
    let chapters = load_chapters(&args.input, config, project_root, output)?;
    let adj = build_adjacency(&chapters);

    let check = detect_cycle(&adj);
    if check.has_cycle {
        render_error(
            output,
            &CliError::with_code(
                ErrorCode::CycleDetected,
                format!("prerequisite cycle: {}", check.cycle.join(" -> ")),
            ),
        )?;
        anyhow::bail!("prerequisite cycle detected");
    }

    let topological_order = topological_sort(&adj);
    debug!(order = ?topological_order, "topological order");

    if chapters.len() > settings.max_chapters {
        render_error(
            output,
            &CliError::with_code(
                ErrorCode::TooManyChapters,
                format!(
                    "{} chapters exceeds the limit of {}",
                    chapters.len(),
                    settings.max_chapters
                ),
            ),
        )?;
        anyhow::bail!("too many chapters for exact search");
    }

    let plan = exact_subset_search_with(
        &chapters,
        settings.time_budget,
        &adj,
        &SearchOptions {
            strategy: settings.strategy,
        },
        &TracingObserver,
    );

    let payload = PlanOutput {
        time_budget: settings.time_budget,
        topological_order,
        best_value: plan.best_value,
        best_time: plan.best_time,
        chosen: plan.chosen.iter().map(PlannedChapter::from).collect(),
    };
    render_mode(output, &payload, render_plan_text, render_plan_pretty)
}

fn chapter_line(ch: &PlannedChapter) -> String {
    if ch.title.is_empty() {
        format!("{} ({} minutes)", ch.id, ch.time_minutes)
    } else {
        format!("{} ({}) {} minutes", ch.id, ch.title, ch.time_minutes)
    }
}

fn render_plan_text(payload: &PlanOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "order\t{}", payload.topological_order.join(" "))?;
    writeln!(w, "budget\t{}", payload.time_budget)?;
    writeln!(w, "value\t{}", payload.best_value)?;
    writeln!(w, "time\t{}", payload.best_time)?;
    for ch in &payload.chosen {
        writeln!(w, "chosen\t{}\t{}\t{}", ch.id, ch.time_minutes, ch.score_value)?;
    }
    Ok(())
}

fn render_plan_pretty(payload: &PlanOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_kv(w, "Order", payload.topological_order.join(" -> "))?;
    pretty_section(w, "Optimal study plan")?;
    pretty_kv(w, "Budget", format!("{} minutes", payload.time_budget))?;
    pretty_kv(w, "Best value", payload.best_value.to_string())?;
    pretty_kv(w, "Best time", format!("{} minutes", payload.best_time))?;
    if payload.chosen.is_empty() {
        writeln!(w, "No chapter fits the budget.")?;
    } else {
        writeln!(w, "Chosen chapters:")?;
        for ch in &payload.chosen {
            writeln!(w, "  - {}", chapter_line(ch))?;
        }
    }
    Ok(())
}
