//! Client configuration.
//!
//! The server URL is resolved from, in order: the `--server` flag, the
//! `CODESCOPE_SERVER_URL` environment variable, the config file, the default.

use codescope_core::{CodeScopeError, CodeScopeResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default analysis server address.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the server URL.
pub const SERVER_URL_ENV: &str = "CODESCOPE_SERVER_URL";

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub server_url: String,
    pub timeout_secs: u64,
}

/// On-disk layout of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// `<config_dir>/codescope/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("codescope").join("config.toml"))
    }

    /// Load settings from every source.
    ///
    /// An explicit `config_path` must exist; the default path is skipped when
    /// absent.
    pub fn load(config_path: Option<&Path>, server_flag: Option<&str>) -> CodeScopeResult<Self> {
        let file = match config_path {
            Some(path) => Some(read_file(path)?),
            None => match Self::default_path() {
                Some(path) if path.exists() => Some(read_file(&path)?),
                _ => None,
            },
        };
        let env = std::env::var(SERVER_URL_ENV).ok();

        let config = Self::resolve(server_flag, env.as_deref(), file.as_deref())?;
        debug!(server_url = %config.server_url, timeout_secs = config.timeout_secs, "Client configuration resolved");
        Ok(config)
    }

    /// Merge the sources. `file` is raw TOML.
    pub fn resolve(
        server_flag: Option<&str>,
        env: Option<&str>,
        file: Option<&str>,
    ) -> CodeScopeResult<Self> {
        let file: FileConfig = match file {
            Some(raw) => toml::from_str(raw)
                .map_err(|e| CodeScopeError::config(format!("invalid config file: {}", e)))?,
            None => FileConfig::default(),
        };

        let server_url = [server_flag, env, file.server_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_SERVER_URL);

        let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CodeScopeError::config("timeout_secs must be greater than zero"));
        }

        Ok(Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn read_file(path: &Path) -> CodeScopeResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        CodeScopeError::config(format!("cannot read {}: {}", path.display(), e))
    })
}
