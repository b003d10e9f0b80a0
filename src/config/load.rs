use std::{
    fs,
    path::Path,
};

use crate::error::ConfigError;
use crate::log_info;

use super::{ConfigSet, ConfigValidator};

impl ConfigSet {
    /// Read and validate the cover config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml(&content)?;
        log_info!("Loaded {} covers from {}", config.len(), path.display());

        Ok(config)
    }

    pub fn from_yaml(config_yaml: &str) -> Result<Self, ConfigError> {
        ConfigValidator::validate(config_yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "office:\n  open: \"3_11\"\n  close: \"3_12\"").unwrap();

        let config = ConfigSet::load(file.path()).unwrap();

        assert_eq!(config.len(), 1);
        assert_eq!(config.get("office").unwrap().open_relay.as_str(), "3_11");
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let result = ConfigSet::load(&temp_dir.path().join("covers.yml"));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
