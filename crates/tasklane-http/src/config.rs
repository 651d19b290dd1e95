use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid {key} value: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Client configuration, layered the usual way: built-in defaults, then the
/// config file, then `TASKLANE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    token: Option<String>,
    timeout_secs: Option<u64>,
}

impl HttpConfig {
    /// Load from the default location (`<config dir>/tasklane/config.toml`)
    /// if present, then apply environment overrides. A missing file is not
    /// an error.
    pub fn load(path_override: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = match path_override {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };
        match path {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "loading client config");
                config.merge_file(&path)?;
            }
            Some(path) => {
                debug!(path = %path.display(), "no config file; using defaults");
            }
            None => {
                warn!("could not resolve a config directory; using defaults");
            }
        }

        config.apply_env();
        Ok(config)
    }

    /// Fold a config file into the current values. Only keys present in the
    /// file override anything.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if file.token.is_some() {
            self.token = file.token;
        }
        if let Some(timeout_secs) = file.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        Ok(())
    }

    /// `TASKLANE_BASE_URL`, `TASKLANE_TOKEN` and `TASKLANE_TIMEOUT_SECS`
    /// take precedence over everything else.
    pub fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var("TASKLANE_BASE_URL")
            && !base_url.is_empty()
        {
            self.base_url = base_url;
        }
        if let Ok(token) = std::env::var("TASKLANE_TOKEN")
            && !token.is_empty()
        {
            self.token = Some(token);
        }
        if let Ok(raw) = std::env::var("TASKLANE_TIMEOUT_SECS")
            && !raw.is_empty()
        {
            match raw.parse() {
                Ok(timeout_secs) => self.timeout_secs = timeout_secs,
                Err(_) => {
                    warn!(value = %raw, "ignoring invalid TASKLANE_TIMEOUT_SECS");
                }
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tasklane").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = HttpConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.token.is_none());
    }

    #[test]
    fn file_overrides_only_present_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).expect("create config");
        writeln!(file, "base_url = \"https://tasks.example.com/api\"").expect("write");
        writeln!(file, "token = \"secret\"").expect("write");

        let mut config = HttpConfig::default();
        config.merge_file(&path).expect("merge");
        assert_eq!(config.base_url, "https://tasks.example.com/api");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 30, "absent key keeps the default");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [not toml").expect("write");

        let mut config = HttpConfig::default();
        assert!(matches!(
            config.merge_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
