//! Project and user configuration.
//!
//! Project settings live in `studyplan.toml` next to the chapter data; user
//! preferences live in `<config_dir>/studyplan/config.toml`. Every field has a
//! default, so a missing file (or a missing table) is never an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the project config, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "studyplan.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub plan: PlanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Available study time in minutes.
    #[serde(default = "default_time_budget")]
    pub time_budget: u64,
    /// Largest chapter list `plan` will hand to the exhaustive search.
    #[serde(default = "default_max_chapters")]
    pub max_chapters: usize,
    #[serde(default)]
    pub strategy: SearchStrategy,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            time_budget: default_time_budget(),
            max_chapters: default_max_chapters(),
            strategy: SearchStrategy::default(),
        }
    }
}

/// How the subset search walks the mask space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// One pass from mask 0 upward.
    #[default]
    Sequential,
    /// Mask ranges split across the rayon pool, reduced to the same winner.
    Parallel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
}

/// Load `studyplan.toml` from `project_root`, or defaults when absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    load_project_config_file(&path)
}

/// Load a project config from an explicit path. The file must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_project_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the per-user config, or defaults when there is none.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("studyplan/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Combine project and user config.
///
/// `explicit` (a `--config` flag) replaces the lookup in `project_root`.
///
/// # Errors
///
/// Returns an error if either config file is present but invalid, or if
/// `explicit` names a file that cannot be read.
pub fn resolve_config(project_root: &Path, explicit: Option<&Path>) -> Result<EffectiveConfig> {
    let project = match explicit {
        Some(path) => load_project_config_file(path)?,
        None => load_project_config(project_root)?,
    };
    let user = load_user_config()?;
    tracing::debug!(?project, "resolved project config");

    Ok(EffectiveConfig { project, user })
}

fn default_input_path() -> PathBuf {
    PathBuf::from("chapters.json")
}

const fn default_time_budget() -> u64 {
    550
}

const fn default_max_chapters() -> usize {
    24
}
