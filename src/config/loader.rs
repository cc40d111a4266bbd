use super::types::CooeeConfig;
use crate::io::paths::CooeePaths;
use crate::{CooeeError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "cooee.yaml";

/// Configuration loader
///
/// Sources, first match wins: explicit path, `./cooee.yaml`,
/// `<platform config dir>/config.yaml`, built-in defaults.
pub struct ConfigLoader {
    explicit: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Loader with the standard search locations
    pub fn new() -> Self {
        Self {
            explicit: None,
            search_paths: Vec::new(),
        }
        .with_search_dirs(Path::new("."), CooeePaths::new().ok().as_ref())
    }

    /// Use this file instead of searching; it must exist
    pub fn with_explicit_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    /// Look for `<local_dir>/cooee.yaml`, then the platform `config.yaml`
    pub fn with_search_dirs(mut self, local_dir: &Path, platform: Option<&CooeePaths>) -> Self {
        self.search_paths = vec![local_dir.join(LOCAL_CONFIG_FILE)];
        if let Some(paths) = platform {
            self.search_paths.push(paths.config_file());
        }
        self
    }

    pub fn load(&self) -> Result<CooeeConfig> {
        if let Some(path) = &self.explicit {
            return load_file(path);
        }

        if let Some(found) = self.search_paths.iter().find(|p| p.is_file()) {
            return load_file(found);
        }

        debug!("No configuration file found, using defaults");
        Ok(CooeeConfig::default())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and validate a single YAML file
pub fn load_file(path: &Path) -> Result<CooeeConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CooeeError::Config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse(&contents)
        .map_err(|e| CooeeError::Config(format!("{}: {}", path.display(), e)))?;

    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Parse YAML text. An empty document yields the defaults.
pub fn parse(contents: &str) -> Result<CooeeConfig> {
    if contents.trim().is_empty() {
        return Ok(CooeeConfig::default());
    }
    let config: CooeeConfig = serde_yaml_ng::from_str(contents)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &CooeeConfig) -> Result<()> {
    let rate = config.providers.failure_rate;
    if !(0.0..=1.0).contains(&rate) {
        return Err(CooeeError::Config(format!(
            "providers.failure_rate must be between 0.0 and 1.0, got {}",
            rate
        )));
    }
    if config.ui.tick_rate_ms == 0 {
        return Err(CooeeError::Config(
            "ui.tick_rate_ms must be greater than zero".to_string(),
        ));
    }
    if config.logging.level.trim().is_empty() {
        return Err(CooeeError::Config(
            "logging.level must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(parse("").unwrap(), CooeeConfig::default());
        assert_eq!(parse("   \n").unwrap(), CooeeConfig::default());
    }

    #[test]
    fn rejects_out_of_range_failure_rate() {
        let err = parse("providers:\n  failure_rate: 1.5\n").unwrap_err();
        assert!(matches!(err, CooeeError::Config(_)));
    }

    #[test]
    fn rejects_zero_tick_rate() {
        assert!(parse("ui:\n  tick_rate_ms: 0\n").is_err());
    }
}
