// ABOUTME: Configuration discovery and loading for netkeys.
// ABOUTME: Finds the identity directory config file and turns it into a gRPC channel config.

use netkeys_grpc::{ChannelConfig, DEFAULT_PORT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Config file name looked up in each search directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no config file found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no identity server configured (set core.server or NETAUTH_SERVER)")]
    MissingServer,

    #[error("failed to read CA certificate {path}: {source}")]
    Certificate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,
    #[serde(default)]
    pub tls: TlsConfig,
}

/// Identity directory endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Directory host name or address.
    #[serde(default)]
    pub server: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connect and request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            port: default_port(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    /// PEM CA certificate to trust instead of the system roots.
    #[serde(default)]
    pub certificate: Option<PathBuf>,
    /// Talk plaintext HTTP/2 to the directory.
    #[serde(default)]
    pub insecure: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> u64 {
    10
}

/// Directories searched for `config.toml`, in order.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".netauth").join(CONFIG_FILE));
    }
    paths.push(PathBuf::from("/etc/netauth").join(CONFIG_FILE));
    paths
}

impl Config {
    /// Load `explicit` if given, otherwise the first existing file from
    /// [`search_paths`].
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => Self::load_first(&search_paths()),
        }
    }

    /// Load the first of `candidates` that exists.
    pub fn load_first(candidates: &[PathBuf]) -> Result<Self, ConfigError> {
        let path = candidates
            .iter()
            .find(|p| p.is_file())
            .ok_or_else(|| ConfigError::NotFound {
                searched: candidates.to_vec(),
            })?;
        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Replace the configured server (flag or environment override).
    pub fn with_server(mut self, server: Option<String>) -> Self {
        if let Some(server) = server.filter(|s| !s.trim().is_empty()) {
            self.core.server = server;
        }
        self
    }

    /// Channel settings for the configured directory.
    pub fn channel_config(&self) -> Result<ChannelConfig, ConfigError> {
        if self.core.server.trim().is_empty() {
            return Err(ConfigError::MissingServer);
        }

        let timeout = Duration::from_secs(self.core.timeout);
        let use_tls = !self.tls.insecure;
        let mut channel = ChannelConfig::for_server(&self.core.server, self.core.port, use_tls)
            .with_connect_timeout(timeout)
            .with_request_timeout(timeout);

        if let Some(path) = &self.tls.certificate {
            let pem = std::fs::read(path).map_err(|e| ConfigError::Certificate {
                path: path.clone(),
                source: e,
            })?;
            channel = channel.with_ca_certificate(pem);
        }

        Ok(channel)
    }
}
