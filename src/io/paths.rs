use crate::{CooeeError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Name of the log file written while the TUI owns the terminal
pub const LOG_FILE_NAME: &str = "cooee.log";

/// Path management for Cooee configuration and log files
#[derive(Debug, Clone)]
pub struct CooeePaths {
    /// Configuration directory (holds config.yaml)
    pub config_dir: PathBuf,
    /// Data directory (holds the log file)
    pub data_dir: PathBuf,
}

impl CooeePaths {
    /// Create new paths instance using standard directories
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "cooee").ok_or_else(|| {
            CooeeError::Path("Failed to determine project directories".to_string())
        })?;

        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Keep everything under `<root>/.cooee`
    pub fn for_project(project_root: &Path) -> Self {
        let base = project_root.join(".cooee");
        Self {
            config_dir: base.clone(),
            data_dir: base,
        }
    }

    /// Default config file inside the config directory
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.yaml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }

}

impl Default for CooeePaths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if platform directories fail
            let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Self::for_project(&current_dir)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_paths() {
        let project_root = Path::new("/tmp/test-project");
        let paths = CooeePaths::for_project(project_root);

        assert_eq!(paths.config_dir, project_root.join(".cooee"));
        assert_eq!(paths.config_file(), project_root.join(".cooee/config.yaml"));
        assert_eq!(paths.log_file(), project_root.join(".cooee/cooee.log"));
    }
}
