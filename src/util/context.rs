//! Global context for amalgam operations.
//!
//! Provides centralized access to the project root, configuration paths,
//! and the merged configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::util::config::{load_config, Config, CONFIG_FILE_NAME};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Directory containing `Amalgam.toml`, or `cwd` when there is none
    project_root: PathBuf,

    /// Home directory for global amalgam data (~/.amalgam/)
    home: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a GlobalContext rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let project_root = find_project_root(&cwd).unwrap_or_else(|| cwd.clone());
        let home = BaseDirs::new().map(|b| b.home_dir().join(".amalgam"));

        GlobalContext {
            cwd,
            project_root,
            home,
        }
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|h| h.join("config.toml"))
    }

    /// Get the project configuration file path (which may not exist).
    pub fn project_config_path(&self) -> PathBuf {
        self.project_root.join(CONFIG_FILE_NAME)
    }

    /// Load the merged global + project configuration.
    pub fn load_config(&self) -> Result<Config> {
        load_config(self.config_path().as_deref(), &self.project_config_path())
    }

    /// Resolve a configured path against the project root.
    pub fn project_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

/// Walk up from `start` looking for `Amalgam.toml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE_NAME).is_file())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_project_root_found_in_parent() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "").unwrap();
        let nested = tmp.path().join("includes/concepts");
        fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested.clone());
        assert_eq!(ctx.project_root(), tmp.path());
        assert_eq!(ctx.cwd(), nested.as_path());
    }

    #[test]
    fn test_project_root_defaults_to_cwd() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        assert_eq!(ctx.project_root(), tmp.path());
        assert_eq!(
            ctx.project_path(Path::new("includes")),
            tmp.path().join("includes")
        );
    }
}
