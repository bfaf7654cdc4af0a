//! Chapter file resolution shared by every subcommand.

use std::path::{Path, PathBuf};

use clap::Args;
use studyplan_core::Chapter;
use studyplan_core::config::ProjectConfig;
use studyplan_core::ingest::read_chapters_json;

use crate::output::{CliError, OutputMode, render_error};

/// Positional chapter file argument.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Chapter JSON file (defaults to `[input] path` from studyplan.toml).
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    /// The file to read: the explicit argument, else the configured path
    /// relative to `project_root`.
    pub fn resolve(&self, config: &ProjectConfig, project_root: &Path) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| project_root.join(&config.input.path))
    }
}

/// Read and validate the chapter file, rendering ingestion errors.
pub fn load_chapters(
    args: &InputArgs,
    config: &ProjectConfig,
    project_root: &Path,
    output: OutputMode,
) -> anyhow::Result<Vec<Chapter>> {
    let path = args.resolve(config, project_root);
    match read_chapters_json(&path) {
        Ok(chapters) => Ok(chapters),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(anyhow::Error::new(err).context("failed to load chapters"))
        }
    }
}
