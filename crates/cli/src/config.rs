//! Configuration file loading and merging
//!
//! Precedence: command line flag > config file > built-in default.

use crate::args::Cli;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tw_core::{EmitterConfig, PartialLinePolicy, DEFAULT_MAX_LINE_BYTES};

/// On-disk TOML configuration. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub dir: Option<PathBuf>,
    pub debug: Option<bool>,
    pub create_dir: Option<bool>,
    pub partial_lines: Option<PartialLinePolicy>,
    pub max_line_bytes: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dir: PathBuf,
    pub debug: bool,
    pub create_dir: bool,
    pub emitter: EmitterConfig,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load the config file named on the command line (if any) and merge
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(cli, file)
    }

    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let dir = cli
            .dir
            .clone()
            .or(file.dir)
            .filter(|dir| !dir.as_os_str().is_empty())
            .context("Please provide a directory to watch using the -dir flag")?;

        let max_line_bytes = file.max_line_bytes.unwrap_or(DEFAULT_MAX_LINE_BYTES);
        if max_line_bytes == 0 {
            anyhow::bail!("Invalid max_line_bytes: must be greater than 0");
        }

        let dir = std::path::absolute(&dir)
            .with_context(|| format!("Invalid directory: {}", dir.display()))?;

        Ok(Self {
            dir: tw_core::path::clean(&dir),
            debug: cli.debug || file.debug.unwrap_or(false),
            create_dir: file.create_dir.unwrap_or(true),
            emitter: EmitterConfig {
                partial_lines: file.partial_lines.unwrap_or_default(),
                max_line_bytes,
            },
            log_file: cli.log_file.clone().or(file.log_file),
        })
    }
}
