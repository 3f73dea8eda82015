//! Server configuration.
//!
//! Values come from built-in defaults, an optional YAML file named by
//! `SSTT_CONFIG`, and finally individual environment overrides.

use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to, e.g. "127.0.0.1:8080"
    pub listen_addr: String,
    /// Idle seconds before a persistent connection gets a 408 and is closed
    pub keep_alive_timeout: u64,
    /// Value of the `Server` response header
    pub server_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory request paths are resolved against
    pub webroot: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            keep_alive_timeout: 20,
            server_name: "sstt".to_string(),
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            webroot: PathBuf::from("."),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` in place of the environment.
    ///
    /// `SSTT_CONFIG` names a YAML file to start from; `LISTEN`, `WEBROOT`,
    /// `KEEP_ALIVE_TIMEOUT` and `LOG_LEVEL` override single values.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("SSTT_CONFIG") {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path))?;
                Self::from_yaml_str(&text)
                    .with_context(|| format!("parsing config file {}", path))?
            }
            None => Self::default(),
        };

        if let Some(addr) = lookup("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        if let Some(root) = lookup("WEBROOT") {
            cfg.static_files.webroot = PathBuf::from(root);
        }
        if let Some(secs) = lookup("KEEP_ALIVE_TIMEOUT") {
            cfg.server.keep_alive_timeout = secs
                .parse()
                .with_context(|| format!("invalid KEEP_ALIVE_TIMEOUT: {}", secs))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            cfg.logging.level = level;
        }

        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let cfg = serde_yaml::from_str(text)?;
        Ok(cfg)
    }

    pub fn keep_alive_timeout(&self) -> Duration {
        Duration::from_secs(self.server.keep_alive_timeout)
    }

    /// Parsed log level; unknown names fall back to INFO.
    pub fn log_level(&self) -> tracing::Level {
        self.logging.level.parse().unwrap_or(tracing::Level::INFO)
    }
}
