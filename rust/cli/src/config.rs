//! Configuration resolution: defaults, then a TOML file named by
//! `DOUKIT_CONFIG`, then `DOUKIT_*` environment variables, with the
//! source of each value tracked for the `cfg` command.

use doukit_core::config::SolverConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub solver: ValueSource,
    pub input: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            solver: ValueSource::Default,
            input: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: SolverConfig,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub fn load() -> Result<SolverConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = SolverConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("DOUKIT_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.solver {
            cfg.executable = v;
            sources.solver = ValueSource::File;
        }
        if let Some(v) = f.input {
            cfg.startup_file = v;
            sources.input = ValueSource::File;
        }
    }

    if let Ok(solver) = std::env::var("DOUKIT_SOLVER")
        && !solver.is_empty()
    {
        cfg.executable = PathBuf::from(solver);
        sources.solver = ValueSource::Env;
    }
    if let Ok(input) = std::env::var("DOUKIT_INPUT")
        && !input.is_empty()
    {
        cfg.startup_file = PathBuf::from(input);
        sources.input = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    solver: Option<PathBuf>,
    #[serde(default)]
    input: Option<PathBuf>,
}

fn validate(cfg: &SolverConfig) -> Result<(), ConfigError> {
    if cfg.executable.as_os_str().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: solver path must not be empty".into(),
        ));
    }
    if cfg.startup_file.as_os_str().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: input path must not be empty".into(),
        ));
    }
    Ok(())
}
