//! Config layer sources
//!
//! Where each layer of `ForklineConfig` comes from, in precedence order:
//! global, then project, then an explicit file given on the command line.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};

use super::forkline::FORKLINE_CONFIG_FILE;

/// One config file that may contribute a layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `<config_dir>/forkline/config.toml`
    Global(PathBuf),
    /// `<root>/.forkline/config.toml`
    Project(PathBuf),
    /// `--config <path>`; must exist
    Explicit(PathBuf),
}

impl ConfigSource {
    /// Global layer, if the platform has a config directory
    pub fn global() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::Global(dir.join("forkline").join(FORKLINE_CONFIG_FILE)))
    }

    pub fn project(root: impl AsRef<Path>) -> Self {
        Self::Project(root.as_ref().join(".forkline").join(FORKLINE_CONFIG_FILE))
    }

    /// Project layer for the current directory
    pub fn current_project() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::Config(format!("Cannot get current directory: {}", e)))?;
        Ok(Self::project(cwd))
    }

    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self::Explicit(path.into())
    }

    /// Global and project layers, lowest precedence first
    pub fn defaults() -> Result<Vec<Self>> {
        let mut sources: Vec<Self> = Self::global().into_iter().collect();
        sources.push(Self::current_project()?);
        Ok(sources)
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Global(path) | Self::Project(path) | Self::Explicit(path) => path,
        }
    }

    /// Parse the layer; a missing optional file yields `None`
    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if !matches!(self, Self::Explicit(_)) && !self.path().exists() {
            return Ok(None);
        }
        load_file(self.path()).map(Some)
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Global(_) => "global",
            Self::Project(_) => "project",
            Self::Explicit(_) => "explicit",
        };
        write!(f, "{} ({})", kind, self.path().display())
    }
}

/// Load and parse a single TOML file by path
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}
