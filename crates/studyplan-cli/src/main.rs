#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use studyplan_core::config::resolve_config;
use studyplan_core::error::ErrorCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "studyplan: prerequisite-aware study planning",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Project config file (default: ./studyplan.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Graph",
        about = "Check the prerequisite graph for cycles",
        long_about = "Load the chapter file, report prerequisite links that point at unknown chapters, \
                      and fail with the cycle path if the graph is not acyclic.",
        after_help = "EXAMPLES:\n    # Check the configured chapter file\n    studyplan check\n\n    # Check a specific file\n    studyplan check chapters.json\n\n    # Emit machine-readable output\n    studyplan check --format json"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Print a prerequisite-first study order",
        long_about = "Print every chapter (and every referenced prerequisite) so that each one \
                      comes after all of its prerequisites.",
        after_help = "EXAMPLES:\n    # Print the order for the configured chapter file\n    studyplan order\n\n    # Emit machine-readable output\n    studyplan order chapters.json --json"
    )]
    Order(cmd::order::OrderArgs),

    #[command(
        next_help_heading = "Graph",
        about = "List each chapter's transitive prerequisites",
        long_about = "For every chapter, list everything that must be studied before it, \
                      directly or indirectly, and flag prerequisites missing from the file.",
        after_help = "EXAMPLES:\n    # Show transitive prerequisites\n    studyplan closure chapters.json"
    )]
    Closure(cmd::closure::ClosureArgs),

    #[command(
        next_help_heading = "Planning",
        about = "Choose the best set of chapters for a time budget",
        long_about = "Exhaustively search every subset of chapters and print the one with the \
                      highest total score that fits the time budget and includes all \
                      prerequisites of every chosen chapter.",
        after_help = "EXAMPLES:\n    # Plan with the configured budget\n    studyplan plan\n\n    # Plan for five hours using all cores\n    studyplan plan chapters.json --budget 300 --parallel\n\n    # Emit machine-readable output\n    studyplan plan --format json"
    )]
    Plan(cmd::plan::PlanArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("STUDYPLAN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "studyplan=debug,info"
        } else {
            "studyplan=info,warn"
        })
    });

    let format = env::var("STUDYPLAN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let config = match resolve_config(&project_root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let output = resolve_output_mode(cli.format, cli.json, None);
            render_error(
                output,
                &CliError::with_code(ErrorCode::ConfigParseError, format!("{err:#}")),
            )?;
            return Err(err);
        }
    };
    let output = resolve_output_mode(cli.format, cli.json, config.user.output.as_deref());

    match cli.command {
        Commands::Check(ref args) => {
            cmd::check::run_check(args, output, &project_root, &config.project)
        }
        Commands::Order(ref args) => {
            cmd::order::run_order(args, output, &project_root, &config.project)
        }
        Commands::Closure(ref args) => {
            cmd::closure::run_closure(args, output, &project_root, &config.project)
        }
        Commands::Plan(ref args) => cmd::plan::run_plan(args, output, &project_root, &config.project),
    }
}
