use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::errors::LedgerError;
use crate::utils::{app_data_dir, ensure_dir};

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the store file; the config's own directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_store_file")]
    pub store_file: String,
    /// Number of rows the `list` view shows when no count is given.
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
    /// Seed the default categories when the store has none.
    #[serde(default)]
    pub seed_defaults: bool,
}

impl Config {
    fn default_store_file() -> String {
        "ledger.json".into()
    }

    fn default_recent_limit() -> usize {
        5
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            store_file: Self::default_store_file(),
            recent_limit: Self::default_recent_limit(),
            seed_defaults: false,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base).map_err(|err| LedgerError::Config(err.to_string()))?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path).map_err(config_error)?;
        serde_json::from_str(&data).map_err(config_error)
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config).map_err(config_error)?;
        let tmp = self.path.with_extension(TMP_SUFFIX);
        let mut file = File::create(&tmp).map_err(config_error)?;
        file.write_all(json.as_bytes()).map_err(config_error)?;
        file.flush().map_err(config_error)?;
        fs::rename(&tmp, &self.path).map_err(config_error)?;
        Ok(())
    }

    /// Resolves the store file location for `config`.
    pub fn store_path(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| self.base.clone())
            .join(&config.store_file)
    }
}

fn config_error(err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Config(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(manager.store_path(&config), dir.path().join("ledger.json"));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            data_dir: Some(dir.path().join("data")),
            store_file: "books.json".into(),
            recent_limit: 12,
            seed_defaults: true,
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(
            manager.store_path(&config),
            dir.path().join("data").join("books.json")
        );
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"seed_defaults": true}"#).unwrap();
        let config = manager.load().unwrap();
        assert!(config.seed_defaults);
        assert_eq!(config.recent_limit, 5);
    }
}
