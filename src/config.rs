use std::env;
use std::fmt;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::adapters::UpstreamConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    pub service_path: String,
    pub access_token: Option<String>,
    pub fetch_timeout_ms: u64,
    pub window_size: usize,
    pub log_level: String,
}

/// Optional overrides read from a TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    port: Option<u16>,
    upstream_url: Option<String>,
    service_path: Option<String>,
    access_token: Option<String>,
    fetch_timeout_ms: Option<u64>,
    window_size: Option<usize>,
    log_level: Option<String>,
}

impl Config {
    /// Defaults, then the file named by `NUMWIN_CONFIG`, then environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = env::var("NUMWIN_CONFIG") {
            config.apply_file(Path::new(&path))?;
        }

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.apply_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_toml(&mut self, content: &str) -> Result<(), toml::de::Error> {
        let file: FileConfig = toml::from_str(content)?;

        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(url) = file.upstream_url {
            self.upstream_url = url;
        }
        if let Some(path) = file.service_path {
            self.service_path = path;
        }
        if let Some(token) = file.access_token {
            self.access_token = non_blank(token);
        }
        if let Some(timeout) = file.fetch_timeout_ms {
            self.fetch_timeout_ms = timeout;
        }
        if let Some(size) = file.window_size {
            self.window_size = size;
        }
        if let Some(level) = file.log_level {
            self.log_level = level;
        }
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Some(port) = env::var("NUMWIN_PORT").ok().and_then(|s| s.parse().ok()) {
            self.port = port;
        }
        if let Ok(url) = env::var("NUMWIN_UPSTREAM_URL") {
            self.upstream_url = url;
        }
        if let Ok(path) = env::var("NUMWIN_SERVICE_PATH") {
            self.service_path = path;
        }
        if let Ok(token) = env::var("NUMWIN_ACCESS_TOKEN") {
            self.access_token = non_blank(token);
        }
        if let Some(timeout) = env::var("NUMWIN_FETCH_TIMEOUT_MS").ok().and_then(|s| s.parse().ok()) {
            self.fetch_timeout_ms = timeout;
        }
        if let Some(size) = env::var("NUMWIN_WINDOW_SIZE").ok().and_then(|s| s.parse().ok()) {
            self.window_size = size;
        }
        if let Ok(level) = env::var("NUMWIN_LOG_LEVEL") {
            self.log_level = level;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::Invalid("window_size must be at least 1".to_string()));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::Invalid("fetch_timeout_ms must be at least 1".to_string()));
        }
        if self.upstream_url.trim().is_empty() {
            return Err(ConfigError::Invalid("upstream_url must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn window_capacity(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.window_size)
            .ok_or_else(|| ConfigError::Invalid("window_size must be at least 1".to_string()))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig::new(&self.upstream_url, &self.service_path, self.fetch_timeout())
            .with_access_token(self.access_token.clone())
    }
}

/// Blank tokens count as no token at all
fn non_blank(token: String) -> Option<String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 9876,
            upstream_url: "http://20.244.56.144".to_string(),
            service_path: "numbers".to_string(),
            access_token: None,
            fetch_timeout_ms: 500,
            window_size: 10,
            log_level: "info".to_string(),
        }
    }
}

// Hand-written so the access token never reaches the logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("upstream_url", &self.upstream_url)
            .field("service_path", &self.service_path)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("fetch_timeout_ms", &self.fetch_timeout_ms)
            .field("window_size", &self.window_size)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 9876);
        assert_eq!(config.window_size, 10);
        assert_eq!(config.fetch_timeout(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_overrides_only_given_keys() {
        let mut config = Config::default();
        config
            .apply_toml(
                r#"
                port = 8080
                window_size = 25
                access_token = "abc"
                "#,
            )
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.window_size, 25);
        assert_eq!(config.access_token.as_deref(), Some("abc"));
        assert_eq!(config.service_path, "numbers");
        assert_eq!(config.fetch_timeout_ms, 500);
    }

    #[test]
    fn test_example_file_parses() {
        let mut config = Config::default();
        config.apply_toml(include_str!("../config.example.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.access_token, None);
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let mut config = Config::default();
        assert!(config.apply_toml("windw_size = 3").is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.window_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(config.window_capacity().is_err());

        let mut config = Config::default();
        config.fetch_timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upstream_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let mut config = Config::default();
        let err = config.apply_file(Path::new("/nonexistent/numwin.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_blank_file_token_is_none() {
        let mut config = Config::default();
        config.apply_toml(r#"access_token = "   ""#).unwrap();
        assert_eq!(config.access_token, None);
        assert!(format!("{:?}", config).contains("access_token: None"));

        config.apply_toml(r#"access_token = " tok ""#).unwrap();
        assert_eq!(config.access_token.as_deref(), Some("tok"));
    }

    // Every test touching NUMWIN_* variables lives here so they never race
    #[test]
    fn test_load_layers_env_over_file_over_defaults() {
        const VARS: [&str; 8] = [
            "NUMWIN_CONFIG",
            "NUMWIN_PORT",
            "NUMWIN_UPSTREAM_URL",
            "NUMWIN_SERVICE_PATH",
            "NUMWIN_ACCESS_TOKEN",
            "NUMWIN_FETCH_TIMEOUT_MS",
            "NUMWIN_WINDOW_SIZE",
            "NUMWIN_LOG_LEVEL",
        ];
        for var in VARS {
            env::remove_var(var);
        }

        let path = env::temp_dir().join(format!("numwin-config-{}.toml", std::process::id()));
        fs::write(
            &path,
            "port = 8080\nwindow_size = 25\nfetch_timeout_ms = 300\naccess_token = \"from-file\"\n",
        )
        .unwrap();

        // Defaults only
        let config = Config::load().unwrap();
        assert_eq!(config.port, 9876);
        assert_eq!(config.access_token, None);

        // File over defaults
        env::set_var("NUMWIN_CONFIG", &path);
        let config = Config::load().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.window_size, 25);
        assert_eq!(config.access_token.as_deref(), Some("from-file"));
        assert_eq!(config.service_path, "numbers");

        // Env over file; unparsable values fall back to the file
        env::set_var("NUMWIN_PORT", "9000");
        env::set_var("NUMWIN_WINDOW_SIZE", "abc");
        env::set_var("NUMWIN_FETCH_TIMEOUT_MS", "-5");
        env::set_var("NUMWIN_ACCESS_TOKEN", "from-env");
        let config = Config::load().unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.window_size, 25);
        assert_eq!(config.fetch_timeout_ms, 300);
        assert_eq!(config.access_token.as_deref(), Some("from-env"));

        // Blank env token means no token, everywhere downstream
        env::set_var("NUMWIN_ACCESS_TOKEN", "");
        let config = Config::load().unwrap();
        assert!(config.access_token.is_none());
        assert!(format!("{:?}", config).contains("access_token: None"));
        assert!(config.upstream().access_token.is_none());

        // Unparsable value with no file falls back to the default
        env::remove_var("NUMWIN_CONFIG");
        let config = Config::load().unwrap();
        assert_eq!(config.window_size, 10);
        assert_eq!(config.port, 9000);

        // Env can still produce an invalid config
        env::set_var("NUMWIN_WINDOW_SIZE", "0");
        assert!(matches!(Config::load(), Err(ConfigError::Invalid(_))));

        for var in VARS {
            env::remove_var(var);
        }
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut config = Config::default();
        config.access_token = Some("super-secret".to_string());
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
