use std::time::Duration;
use std::{env, fmt, fs, io, path};

use apiwatch::monitoring::validation::validate_settings;
use apiwatch::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS, MonitorError, MonitorSettings,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Overrides;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed { path: path::PathBuf, source: io::Error },
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed { path: path::PathBuf, source: io::Error },
    #[error("Failed to parse {}: {source}", path.display())]
    ParseFailed { path: path::PathBuf, source: toml::de::Error },
    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
    #[error("No config directory available, set XDG_CONFIG_HOME or HOME")]
    ConfigPathUnavailable,
    #[error(transparent)]
    Invalid(#[from] MonitorError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub monitor: Monitor,
    pub endpoints: Vec<SeedEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Monitor {
    pub interval_secs: u64,
    pub timeout_secs: u64,
    pub history_capacity: usize,
    pub autostart: bool,
}

/// Endpoint registered at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEndpoint {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SeedEndpoint {
    fn new(url: &str, name: &str) -> Self {
        Self { url: url.into(), name: Some(name.into()) }
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/apiwatch/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, Error> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(Error::ConfigPathUnavailable);
    };

    Ok(path.join("apiwatch/config.toml"))
}

impl Default for Server {
    fn default() -> Self {
        Self { bind: "0.0.0.0".into(), port: 8080 }
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            autostart: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: Server::default(),
            monitor: Monitor::default(),
            endpoints: vec![
                SeedEndpoint::new("https://httpbin.org/status/200", "HTTPBin OK"),
                SeedEndpoint::new("https://httpbin.org/status/404", "HTTPBin 404"),
                SeedEndpoint::new("https://jsonplaceholder.typicode.com/posts/1", "JSONPlaceholder"),
            ],
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);
        let write_2 = write_indented(2);

        writeln!(f, "Current Internal Configuration State:")?;
        write_title_1(f, "Server")?;
        write_1(f, "Bind Address", &self.server.bind)?;
        write_1(f, "Port", &self.server.port)?;
        write_title_1(f, "Monitor")?;
        write_1(f, "Interval (s)", &self.monitor.interval_secs)?;
        write_1(f, "Timeout (s)", &self.monitor.timeout_secs)?;
        write_1(f, "History Capacity", &self.monitor.history_capacity)?;
        write_1(f, "Autostart", &self.monitor.autostart)?;
        write_title_1(f, "Endpoints")?;
        for endpoint in &self.endpoints {
            write_2(f, endpoint.name.as_deref().unwrap_or("-"), &endpoint.url)?;
        }

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/apiwatch/config.toml
    ///  or the specified path, with the name config.toml if one does not exist
    ///
    /// ```rust,ignore
    /// let cfg = config::Config::from_config(None::<&path::Path>)?;
    /// println!("{}", cfg);
    /// ```
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|source| Error::ReadFailed { path: config_path.clone(), source })?;
            toml::from_str(raw_string.as_str())
                .map_err(|source| Error::ParseFailed { path: config_path, source })
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            Ok(config)
        }
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), Error> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| Error::WriteFailed { path: path.to_path_buf(), source })?;
        }

        fs::write(path, config_str).map_err(|source| Error::WriteFailed { path: path.to_path_buf(), source })
    }

    /// Apply command line overrides on top of the file values
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(bind) = &overrides.bind {
            self.server.bind.clone_from(bind);
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(interval) = overrides.interval {
            self.monitor.interval_secs = interval;
        }
        if let Some(timeout) = overrides.timeout {
            self.monitor.timeout_secs = timeout;
        }
        if let Some(history) = overrides.history {
            self.monitor.history_capacity = history;
        }
        if overrides.start {
            self.monitor.autostart = true;
        }
    }

    /// Validated settings for the monitor
    pub fn monitor_settings(&self) -> Result<MonitorSettings, Error> {
        let monitor = &self.monitor;
        validate_settings(monitor.interval_secs, monitor.timeout_secs, monitor.history_capacity)?;

        Ok(MonitorSettings::builder()
            .interval(Duration::from_secs(monitor.interval_secs))
            .probe_timeout(Duration::from_secs(monitor.timeout_secs))
            .history_capacity(monitor.history_capacity)
            .build())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}
