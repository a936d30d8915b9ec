//! Bootstrap configuration for employee-report
//!
//! Settings sources, highest priority first:
//! 1. Command-line arguments (with environment variable fallbacks)
//! 2. TOML configuration file (`--config`, else the user config directory)
//! 3. Built-in defaults
//!
//! A missing TOML file is not an error; defaults are used. An explicitly
//! requested file that is missing or invalid is. Loading does not log:
//! it runs before the subscriber exists, so the caller logs the returned
//! [`ConfigSource`] once tracing is up.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use crate::error::ReportError;

/// Command-line arguments for employee-report
#[derive(Parser, Debug, Default)]
#[command(name = "employee-report")]
#[command(about = "Employee events dashboard with recruitment risk scores")]
#[command(version)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "EMPLOYEE_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database with the employee events tables
    #[arg(short, long, env = "EMPLOYEE_EVENTS_DB")]
    pub database: Option<PathBuf>,

    /// Pre-trained classifier (JSON)
    #[arg(short, long, env = "EMPLOYEE_REPORT_MODEL")]
    pub model: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "EMPLOYEE_REPORT_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "EMPLOYEE_REPORT_PORT")]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Where the TOML layer of the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Path to the employee events SQLite file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Path to the classifier file
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("employee_events.db")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("assets/model.json")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            model_path: default_model_path(),
            host: default_host(),
            port: default_port(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ReportError> {
        toml::from_str(content).map_err(|e| ReportError::Config(e.to_string()))
    }

    /// Load from `path`, or from the user config file when `path` is `None`
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource), ReportError> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    ReportError::Config(format!("Cannot read {}: {}", path.display(), e))
                })?;
                let config = Self::from_toml_str(&content)?;
                Ok((config, ConfigSource::File(path.to_path_buf())))
            }
            None => match default_config_file().filter(|p| p.exists()) {
                Some(path) => Self::load(Some(&path)),
                None => Ok((Self::default(), ConfigSource::Defaults)),
            },
        }
    }

    /// Apply command-line / environment overrides
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(database) = &args.database {
            self.database_path = database.clone();
        }
        if let Some(model) = &args.model {
            self.model_path = model.clone();
        }
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }
        self
    }

    /// Resolve the full configuration for a parsed command line
    pub fn resolve(args: &Args) -> Result<(Self, ConfigSource), ReportError> {
        let (config, source) = Self::load(args.config.as_deref())?;
        Ok((config.with_args(args), source))
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ReportError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ReportError::Config(format!("Invalid listen address: {}", e)))
    }
}

/// `<config dir>/employee-report/config.toml` for the current platform
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("employee-report").join("config.toml"))
}
