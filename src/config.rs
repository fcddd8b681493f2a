use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{env, fs, path};

use crate::helper;

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "redis_addr_default")]
    pub redis_addr: String,
    #[serde(default = "log_level_default")]
    pub log_level: String,
    /// Drop every key in the database when the cache is built. Off unless asked for.
    #[serde(default)]
    pub flush_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_addr: redis_addr_default(),
            log_level: log_level_default(),
            flush_on_start: false,
        }
    }
}

impl Config {
    fn get_config_dir() -> anyhow::Result<path::PathBuf> {
        let config_dir = if let Ok(xdg_path) = env::var("XDG_CONFIG_HOME") {
            path::PathBuf::from(&xdg_path)
        } else {
            let home = env::var("HOME").with_context(|| "neither XDG_CONFIG_HOME nor HOME is set")?;
            path::Path::new(&home).join(".config")
        };

        Ok(config_dir.join("counted_cache"))
    }

    fn file_path() -> anyhow::Result<path::PathBuf> {
        if let Ok(cfg_path) = env::var("CACHE_CFG_PATH") {
            return Ok(path::PathBuf::from(cfg_path));
        }

        Ok(Self::get_config_dir()
            .with_context(|| "fail to locate config directory")?
            .join("config.toml"))
    }

    /// Read the toml file at `file_path`. A missing file gives the defaults.
    pub fn from_file(file_path: &path::Path) -> anyhow::Result<Self> {
        if !file_path.exists() {
            tracing::debug!("no config file in {file_path:?}, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(file_path).with_context(|| "fail to read config file")?;

        toml::from_str(&content).with_context(|| "fail to parse config from toml")
    }

    /// Load the config file and let environment variables override it.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::from_file(&Self::file_path()?)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from `REDIS_ADDR`, `CACHE_LOG_LEVEL` and `CACHE_FLUSH_ON_START`.
    pub fn apply_env(&mut self) -> anyhow::Result<()> {
        if let Some(addr) = helper::env_var_opt("REDIS_ADDR") {
            self.redis_addr = addr;
        }
        if let Some(level) = helper::env_var_opt("CACHE_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(flush) = helper::parse_from_env_opt::<bool>("CACHE_FLUSH_ON_START")? {
            self.flush_on_start = flush;
        }
        Ok(())
    }
}

fn redis_addr_default() -> String {
    "redis://localhost:6379".to_string()
}

fn log_level_default() -> String {
    "INFO".to_string()
}

#[test]
fn validate_file_correctness() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let config = r#"
        redis_addr = "redis://cache.internal:6380/2"
        log_level = "DEBUG"
        flush_on_start = true
    "#;
    fs::write(&path, config).unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.redis_addr, "redis://cache.internal:6380/2");
    assert_eq!(config.log_level, "DEBUG");
    assert!(config.flush_on_start);
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "log_level = \"WARN\"").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.redis_addr, "redis://localhost:6379");
    assert_eq!(config.log_level, "WARN");
    assert!(!config.flush_on_start);
}

#[test]
fn missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::from_file(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "flush_on_start = \"sometimes\"").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("parse config"));
}
