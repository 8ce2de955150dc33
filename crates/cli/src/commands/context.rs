//! Shared setup for commands that resolve a project and run steering.

use rudder_config::{AppConfig, ConfigError, InstructionsConfig};
use rudder_core::{InstructionBlocks, InstructionPaths};
use rudder_steering::{ScopeRoots, SteeringOutcome};
use std::path::{Path, PathBuf};

/// Per-invocation overrides taken from global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cwd: Option<PathBuf>,
    pub no_steering: bool,
    pub max_bytes: Option<usize>,
}

impl Overrides {
    /// Apply the overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) -> Result<(), ConfigError> {
        if self.no_steering {
            config.steering.enabled = false;
        }
        if let Some(max_bytes) = self.max_bytes {
            config.steering.max_bytes = max_bytes;
        }
        config.validate()
    }
}

/// Everything a command needs to run the steering pipeline for one project.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: AppConfig,
    pub home: PathBuf,
    pub repo_root: PathBuf,
    pub roots: ScopeRoots,
    pub instruction_paths: InstructionPaths,
}

impl RunContext {
    /// Load configuration from the rudder home and resolve the project.
    pub fn load(overrides: &Overrides) -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::load().map_err(|e| rudder_core::Error::Config {
            message: e.to_string(),
        })?;
        let cwd = match &overrides.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(Self::from_parts(config, AppConfig::config_dir(), &cwd, overrides)?)
    }

    /// Build a context from an already-loaded configuration.
    pub fn from_parts(
        mut config: AppConfig,
        home: PathBuf,
        cwd: &Path,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        overrides.apply(&mut config)?;
        let repo_root = rudder_core::resolve_project_root(cwd);
        let roots = ScopeRoots::from_locations(&home, &repo_root);
        let instruction_paths = instruction_paths(&home, &repo_root, &config.instructions);
        Ok(Self {
            config,
            home,
            repo_root,
            roots,
            instruction_paths,
        })
    }

    pub fn steering(&self) -> SteeringOutcome {
        rudder_steering::load_steering(&self.config.steering, &self.roots)
    }

    pub fn instruction_blocks(&self) -> InstructionBlocks {
        InstructionBlocks::load(&self.instruction_paths)
    }
}

/// Standard instruction file locations, minus any block the config opts out of.
pub fn instruction_paths(
    home: &Path,
    repo_root: &Path,
    config: &InstructionsConfig,
) -> InstructionPaths {
    let standard = InstructionPaths::standard(home, repo_root);
    InstructionPaths {
        global_file: standard.global_file.filter(|_| config.load_global),
        project_file: standard.project_file.filter(|_| config.load_project),
    }
}
