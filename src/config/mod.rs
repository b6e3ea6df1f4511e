//! Viewer configuration.
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `~/.structlog/config.json`
//! 3. `STRUCTLOG_LOGS_TYPE` / `STRUCTLOG_WS_URL` environment variables
//! 4. `--mode` / `--url` command-line flags
//!
//! The file is watched while the viewer runs; see [`watcher`].

pub mod watcher;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::feed::RecordType;
use crate::render::{DEFAULT_SERVERS, DEFAULT_WINDOW};

pub use watcher::spawn_config_watcher;

/// The config directory name under the home directory.
pub const CONFIG_DIR: &str = ".structlog";

/// The config file name.
pub const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:8765";

/// Bounds on the visible chart window.
pub const MIN_METRIC_WINDOW: Duration = Duration::from_secs(1);
pub const MAX_METRIC_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

pub const ENV_LOGS_TYPE: &str = "STRUCTLOG_LOGS_TYPE";
pub const ENV_WS_URL: &str = "STRUCTLOG_WS_URL";

/// Which category of record a session displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    Cpu,
    Access,
    #[default]
    User,
}

impl DisplayMode {
    /// Interpret a setting value. Anything unrecognised selects `User`.
    pub fn from_setting(value: &str) -> Self {
        match value {
            "cpu" => DisplayMode::Cpu,
            "access" => DisplayMode::Access,
            _ => DisplayMode::User,
        }
    }

    pub fn as_setting(&self) -> &'static str {
        match self {
            DisplayMode::Cpu => "cpu",
            DisplayMode::Access => "access",
            DisplayMode::User => "user",
        }
    }

    /// The record type this mode displays.
    pub fn record_type(&self) -> RecordType {
        match self {
            DisplayMode::Cpu => RecordType::Cpu,
            DisplayMode::Access => RecordType::Access,
            DisplayMode::User => RecordType::User,
        }
    }

    /// Next mode in the `user -> access -> cpu` cycle.
    pub fn next(&self) -> Self {
        match self {
            DisplayMode::User => DisplayMode::Access,
            DisplayMode::Access => DisplayMode::Cpu,
            DisplayMode::Cpu => DisplayMode::User,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_setting())
    }
}

/// On-disk shape of `config.json`. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub logs_type: Option<String>,
    pub log_websocket_url: Option<String>,
    pub cpu_servers: Option<Vec<String>>,
    pub metric_window_secs: Option<u64>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub mode: Option<String>,
    pub url: Option<String>,
}

/// Effective settings for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub mode: DisplayMode,
    pub endpoint: String,
    pub cpu_servers: Vec<String>,
    pub metric_window: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cpu_servers: DEFAULT_SERVERS.iter().map(|s| s.to_string()).collect(),
            metric_window: DEFAULT_WINDOW,
        }
    }
}

impl ViewerConfig {
    /// Check that the endpoint is a WebSocket URL and the window is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        let has_host = endpoint
            .strip_prefix("ws://")
            .or_else(|| endpoint.strip_prefix("wss://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.metric_window < MIN_METRIC_WINDOW || self.metric_window > MAX_METRIC_WINDOW {
            return Err(ConfigError::InvalidWindow);
        }
        Ok(())
    }
}

/// Where settings come from, kept so they can be reloaded on change.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub overrides: ConfigOverrides,
}

impl ConfigSource {
    pub fn new(path: PathBuf, overrides: ConfigOverrides) -> Self {
        Self { path, overrides }
    }

    /// Source rooted at `~/.structlog/config.json`.
    pub fn default_location(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Ok(Self::new(default_config_path()?, overrides))
    }

    /// Load settings, reading the process environment.
    pub fn load(&self) -> Result<ViewerConfig, ConfigError> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Load settings with an injectable environment lookup.
    pub fn load_with_env<F>(&self, env: F) -> Result<ViewerConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = read_config_file(&self.path)?;
        let config = resolve(file, &env, &self.overrides);
        config.validate()?;
        Ok(config)
    }
}

/// Get the default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Read the config file. A missing file is an empty config.
pub fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if contents.trim().is_empty() {
        warn!("Config file {} is empty, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn resolve<F>(file: ConfigFile, env: &F, overrides: &ConfigOverrides) -> ViewerConfig
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ViewerConfig::default();

    let mode = non_empty(overrides.mode.clone())
        .or_else(|| non_empty(env(ENV_LOGS_TYPE)))
        .or(file.logs_type)
        .map(|m| DisplayMode::from_setting(m.trim()))
        .unwrap_or(defaults.mode);

    let endpoint = non_empty(overrides.url.clone())
        .or_else(|| non_empty(env(ENV_WS_URL)))
        .or(file.log_websocket_url)
        .map(|url| url.trim().to_string())
        .unwrap_or(defaults.endpoint);

    let cpu_servers = file
        .cpu_servers
        .filter(|servers| !servers.is_empty())
        .unwrap_or(defaults.cpu_servers);

    let metric_window = file
        .metric_window_secs
        .map(Duration::from_secs)
        .unwrap_or(defaults.metric_window);

    ViewerConfig {
        mode,
        endpoint,
        cpu_servers,
        metric_window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_display_mode_from_setting() {
        assert_eq!(DisplayMode::from_setting("cpu"), DisplayMode::Cpu);
        assert_eq!(DisplayMode::from_setting("access"), DisplayMode::Access);
        assert_eq!(DisplayMode::from_setting("user"), DisplayMode::User);
        assert_eq!(DisplayMode::from_setting("anything"), DisplayMode::User);
        assert_eq!(DisplayMode::from_setting(""), DisplayMode::User);
        assert_eq!(DisplayMode::from_setting("CPU"), DisplayMode::User);
    }

    #[test]
    fn test_display_mode_cycle() {
        let mode = DisplayMode::User;
        assert_eq!(mode.next(), DisplayMode::Access);
        assert_eq!(mode.next().next(), DisplayMode::Cpu);
        assert_eq!(mode.next().next().next(), DisplayMode::User);
    }

    #[test]
    fn test_defaults() {
        let config = resolve(ConfigFile::default(), &no_env, &ConfigOverrides::default());
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.endpoint, "ws://127.0.0.1:8765");
        assert_eq!(config.cpu_servers, vec!["Camano", "Rosario", "Monaco"]);
    }

    #[test]
    fn test_precedence_file_env_overrides() {
        let file = ConfigFile {
            logs_type: Some("cpu".to_string()),
            log_websocket_url: Some("ws://file:1".to_string()),
            ..ConfigFile::default()
        };

        let from_file = resolve(file.clone(), &no_env, &ConfigOverrides::default());
        assert_eq!(from_file.mode, DisplayMode::Cpu);
        assert_eq!(from_file.endpoint, "ws://file:1");

        let env = |key: &str| match key {
            ENV_LOGS_TYPE => Some("access".to_string()),
            ENV_WS_URL => Some("ws://env:2".to_string()),
            _ => None,
        };
        let from_env = resolve(file.clone(), &env, &ConfigOverrides::default());
        assert_eq!(from_env.mode, DisplayMode::Access);
        assert_eq!(from_env.endpoint, "ws://env:2");

        let overrides = ConfigOverrides {
            mode: Some("user".to_string()),
            url: Some("ws://cli:3".to_string()),
        };
        let from_cli = resolve(file, &env, &overrides);
        assert_eq!(from_cli.mode, DisplayMode::User);
        assert_eq!(from_cli.endpoint, "ws://cli:3");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let file = ConfigFile {
            logs_type: Some("cpu".to_string()),
            ..ConfigFile::default()
        };
        let env = |_: &str| Some("  ".to_string());
        assert_eq!(resolve(file, &env, &ConfigOverrides::default()).mode, DisplayMode::Cpu);
    }

    #[test]
    fn test_validate_endpoint() {
        let mut config = ViewerConfig::default();
        assert!(config.validate().is_ok());

        config.endpoint = "wss://logs.example.com/feed".to_string();
        assert!(config.validate().is_ok());

        for bad in ["http://localhost:8765", "localhost:8765", "ws://", ""] {
            config.endpoint = bad.to_string();
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidEndpoint(_))),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_validate_window() {
        let config = ViewerConfig {
            metric_window: Duration::from_millis(10),
            ..ViewerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWindow)));

        let config = ViewerConfig {
            metric_window: MAX_METRIC_WINDOW + Duration::from_secs(1),
            ..ViewerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWindow)));

        let config = ViewerConfig {
            metric_window: MAX_METRIC_WINDOW,
            ..ViewerConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_servers_and_window() {
        let file = ConfigFile {
            cpu_servers: Some(vec!["alpha".to_string(), "beta".to_string()]),
            metric_window_secs: Some(30),
            ..ConfigFile::default()
        };
        let config = resolve(file, &no_env, &ConfigOverrides::default());
        assert_eq!(config.cpu_servers, vec!["alpha", "beta"]);
        assert_eq!(config.metric_window, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_server_list_falls_back_to_defaults() {
        let file = ConfigFile {
            cpu_servers: Some(Vec::new()),
            ..ConfigFile::default()
        };
        let config = resolve(file, &no_env, &ConfigOverrides::default());
        assert_eq!(config.cpu_servers.len(), 3);
    }
}
