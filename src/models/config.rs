//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend origin selection
    #[serde(default)]
    pub backend: BackendConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub client: ClientConfig,

    /// Gate screen settings
    #[serde(default)]
    pub gate: GateConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let code = &self.gate.college_code;
        if code.trim().is_empty() {
            return Err(AppError::validation("gate.college_code is empty"));
        }
        if *code != code.to_uppercase() {
            return Err(AppError::validation(
                "gate.college_code must be uppercase",
            ));
        }
        if self.gate.report_page.trim().is_empty() {
            return Err(AppError::validation("gate.report_page is empty"));
        }
        if self.client.user_agent.trim().is_empty() {
            return Err(AppError::validation("client.user_agent is empty"));
        }
        if self.client.timeout_secs == Some(0) {
            return Err(AppError::validation("client.timeout_secs must be > 0"));
        }
        if !self.backend.reports_path.starts_with('/') {
            return Err(AppError::validation(
                "backend.reports_path must start with '/'",
            ));
        }
        self.backend.resolve_origin(None)?;
        Ok(())
    }
}

/// Hosting environment the reporter runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    #[default]
    Deployed,
}

impl Environment {
    /// Hostnames treated as local development.
    pub const LOCAL_HOSTNAMES: [&'static str; 2] = ["127.0.0.1", "localhost"];

    /// Decide the environment from a hostname.
    pub fn from_hostname(hostname: &str) -> Self {
        if Self::LOCAL_HOSTNAMES.contains(&hostname) {
            Environment::Local
        } else {
            Environment::Deployed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Deployed => "deployed",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "deployed" => Ok(Environment::Deployed),
            other => Err(AppError::config(format!("unknown environment '{other}'"))),
        }
    }
}

/// Backend origin settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Which of the two known origins to use
    #[serde(default)]
    pub environment: Environment,

    /// Explicit origin, wins over `environment`
    #[serde(default)]
    pub origin: Option<String>,

    /// Origin used in local development
    #[serde(default = "defaults::local_origin")]
    pub local_origin: String,

    /// Origin used when deployed
    #[serde(default = "defaults::deployed_origin")]
    pub deployed_origin: String,

    /// Path of the report collection on the backend
    #[serde(default = "defaults::reports_path")]
    pub reports_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            origin: None,
            local_origin: defaults::local_origin(),
            deployed_origin: defaults::deployed_origin(),
            reports_path: defaults::reports_path(),
        }
    }
}

impl BackendConfig {
    /// Resolve the backend origin once.
    ///
    /// Priority: `override_origin`, then `origin`, then the origin of
    /// `environment`.
    pub fn resolve_origin(&self, override_origin: Option<&str>) -> Result<Url> {
        let raw = override_origin
            .or(self.origin.as_deref())
            .unwrap_or(match self.environment {
                Environment::Local => self.local_origin.as_str(),
                Environment::Deployed => self.deployed_origin.as_str(),
            });

        let url = Url::parse(raw)?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(AppError::config(format!(
                "backend origin must be an http(s) URL with a host: {raw}"
            )));
        }
        Ok(url)
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; unset means wait for the transport
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Keep and send cookies across requests
    #[serde(default = "defaults::send_cookies")]
    pub send_cookies: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
            send_cookies: defaults::send_cookies(),
        }
    }
}

/// Gate screen settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Code a user must enter; also submitted as `collegeCode`
    #[serde(default = "defaults::college_code")]
    pub college_code: String,

    /// Page navigated to after a matching code
    #[serde(default = "defaults::report_page")]
    pub report_page: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            college_code: defaults::college_code(),
            report_page: defaults::report_page(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Backend defaults
    pub fn local_origin() -> String {
        "http://localhost:3000".into()
    }
    pub fn deployed_origin() -> String {
        "https://aarmahaveerincidentreporting.vercel.app".into()
    }
    pub fn reports_path() -> String {
        "/reports".into()
    }

    // Client defaults
    pub fn user_agent() -> String {
        concat!("incident-reporter/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn send_cookies() -> bool {
        true
    }

    // Gate defaults
    pub fn college_code() -> String {
        "8P".into()
    }
    pub fn report_page() -> String {
        "report.html".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_lowercase_code() {
        let mut config = Config::default();
        config.gate.college_code = "8p".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.client.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_origin() {
        let mut config = Config::default();
        config.backend.origin = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn environment_picks_origin() {
        let mut backend = BackendConfig::default();
        assert_eq!(
            backend.resolve_origin(None).unwrap().as_str(),
            "https://aarmahaveerincidentreporting.vercel.app/"
        );
        backend.environment = Environment::Local;
        assert_eq!(
            backend.resolve_origin(None).unwrap().as_str(),
            "http://localhost:3000/"
        );
    }

    #[test]
    fn explicit_origin_wins() {
        let backend = BackendConfig {
            environment: Environment::Local,
            origin: Some("https://reports.example.edu".to_string()),
            ..BackendConfig::default()
        };
        assert_eq!(
            backend.resolve_origin(None).unwrap().host_str(),
            Some("reports.example.edu")
        );
        assert_eq!(
            backend
                .resolve_origin(Some("http://127.0.0.1:9000"))
                .unwrap()
                .port(),
            Some(9000)
        );
    }

    #[test]
    fn hostname_detection() {
        assert_eq!(Environment::from_hostname("localhost"), Environment::Local);
        assert_eq!(Environment::from_hostname("127.0.0.1"), Environment::Local);
        assert_eq!(
            Environment::from_hostname("reports.example.edu"),
            Environment::Deployed
        );
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            environment = "local"

            [client]
            timeout_secs = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.environment, Environment::Local);
        assert_eq!(config.backend.reports_path, "/reports");
        assert_eq!(config.client.timeout_secs, Some(15));
        assert_eq!(config.gate.college_code, "8P");
        assert!(config.client.send_cookies);
    }

    #[test]
    fn load_or_default_falls_back() {
        let config = Config::load_or_default("/nonexistent/reporter.toml");
        assert_eq!(config.gate.report_page, "report.html");
    }

    #[test]
    fn shipped_config_is_valid() {
        let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/reporter.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.environment, Environment::Deployed);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reporter.toml");
        fs::write(&path, "[gate]\ncollege_code = \"XY\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.gate.college_code, "XY");
    }
}
