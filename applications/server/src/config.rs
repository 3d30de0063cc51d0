/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Plain environment variable holding the database connection string
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Plain environment variable holding the ratings service API key
pub const RATINGS_KEY_VAR: &str = "GOODREADS_KEY";

/// Longest accepted session inactivity window (30 days)
pub const MAX_SESSION_TIMEOUT_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,

    #[serde(default)]
    pub ratings: RatingsSettings,

    #[serde(default = "default_import")]
    pub import: ImportSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Required; there is no default database
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Inactivity window after which a session stops denoting a login
    #[serde(default = "default_session_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RatingsSettings {
    pub api_key: Option<String>,

    #[serde(default = "default_ratings_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportSettings {
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

impl ServerConfig {
    /// Load configuration from `config.toml` and the process environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = config_path.unwrap_or_else(|| Path::new("config.toml"));
        Self::load_from(path, std::env::vars().collect())
    }

    /// Load configuration from a file (if present) and an explicit environment
    ///
    /// Precedence, lowest first: file, `SHELF_*` variables (nested keys joined
    /// with `__`, e.g. `SHELF_SESSION__TIMEOUT_SECS`), then the plain
    /// `DATABASE_URL` and `GOODREADS_KEY` variables.
    pub fn load_from(config_path: &Path, env: HashMap<String, String>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        settings = settings
            .add_source(
                config::Environment::with_prefix("SHELF")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            )
            .set_override_option(
                "storage.database_url",
                env.get(DATABASE_URL_VAR).cloned(),
            )?
            .set_override_option("ratings.api_key", env.get(RATINGS_KEY_VAR).cloned())?;

        let config = settings.build()?;
        config.try_deserialize().map_err(ServerError::from)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database_url().is_none() {
            return Err(ServerError::Config(format!(
                "{} is not set",
                DATABASE_URL_VAR
            )));
        }

        if !(1..=MAX_SESSION_TIMEOUT_SECS).contains(&self.session.timeout_secs) {
            return Err(ServerError::Config(format!(
                "session.timeout_secs must be between 1 and {}, got {}",
                MAX_SESSION_TIMEOUT_SECS, self.session.timeout_secs
            )));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ServerError::Config(format!(
                "auth.bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            )));
        }

        Ok(())
    }

    /// Database URL, ignoring blank values
    pub fn database_url(&self) -> Option<&str> {
        self.storage
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Session inactivity window; fails for values no duration can hold
    pub fn session_timeout(&self) -> Result<chrono::Duration> {
        i64::try_from(self.session.timeout_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| {
                ServerError::Config(format!(
                    "session.timeout_secs is out of range: {}",
                    self.session.timeout_secs
                ))
            })
    }

    pub fn ratings_config(&self) -> shelf_ratings::RatingsConfig {
        shelf_ratings::RatingsConfig::new(
            self.ratings.endpoint.clone(),
            self.ratings.api_key.clone(),
        )
    }

    pub fn import_config(&self) -> shelf_importer::ImportConfig {
        shelf_importer::ImportConfig {
            progress_interval: self.import.progress_interval,
            ..shelf_importer::ImportConfig::default()
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        bcrypt_cost: default_bcrypt_cost(),
    }
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_session() -> SessionSettings {
    SessionSettings {
        timeout_secs: default_session_timeout_secs(),
    }
}

fn default_session_timeout_secs() -> u64 {
    600
}

fn default_ratings_endpoint() -> String {
    shelf_ratings::DEFAULT_ENDPOINT.to_string()
}

fn default_import() -> ImportSettings {
    ImportSettings {
        progress_interval: default_progress_interval(),
    }
}

fn default_progress_interval() -> usize {
    100
}

impl Default for RatingsSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_ratings_endpoint(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: StorageSettings::default(),
            auth: default_auth(),
            session: default_session(),
            ratings: RatingsSettings::default(),
            import: default_import(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn missing_file() -> &'static Path {
        Path::new("/nonexistent/shelf/config.toml")
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = ServerConfig::load_from(missing_file(), HashMap::new()).unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.session.timeout_secs, 600);
        assert_eq!(
            config.session_timeout().unwrap(),
            chrono::Duration::seconds(600)
        );
        assert!(config.ratings.api_key.is_none());
        assert_eq!(config.ratings.endpoint, shelf_ratings::DEFAULT_ENDPOINT);
        assert!(config.database_url().is_none());
    }

    #[test]
    fn test_missing_database_url_is_fatal() {
        let config = ServerConfig::load_from(missing_file(), HashMap::new()).unwrap();
        match config.validate() {
            Err(ServerError::Config(msg)) => assert!(msg.contains("DATABASE_URL")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_environment_variables() {
        let config = ServerConfig::load_from(
            missing_file(),
            env(&[
                ("DATABASE_URL", "sqlite://books.db"),
                ("GOODREADS_KEY", "abc123"),
            ]),
        )
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.database_url(), Some("sqlite://books.db"));
        assert_eq!(config.ratings.api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_prefixed_environment_overrides_nested_keys() {
        let config = ServerConfig::load_from(
            missing_file(),
            env(&[
                ("DATABASE_URL", "sqlite://books.db"),
                ("SHELF_SESSION__TIMEOUT_SECS", "30"),
                ("SHELF_SERVER__PORT", "8081"),
            ]),
        )
        .unwrap();

        assert_eq!(config.session.timeout_secs, 30);
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_file_values_overridden_by_environment() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[storage]\ndatabase_url = \"sqlite://from-file.db\"\n\n[session]\ntimeout_secs = 120"
        )
        .unwrap();

        let from_file = ServerConfig::load_from(file.path(), HashMap::new()).unwrap();
        assert_eq!(from_file.database_url(), Some("sqlite://from-file.db"));
        assert_eq!(from_file.session.timeout_secs, 120);

        let overridden = ServerConfig::load_from(
            file.path(),
            env(&[("DATABASE_URL", "sqlite://from-env.db")]),
        )
        .unwrap();
        assert_eq!(overridden.database_url(), Some("sqlite://from-env.db"));
    }

    #[test]
    fn test_blank_database_url_rejected() {
        let config =
            ServerConfig::load_from(missing_file(), env(&[("DATABASE_URL", "  ")])).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ServerConfig::default();
        config.storage.database_url = Some("sqlite://books.db".to_string());
        config.session.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_timeout_rejected_without_panicking() {
        let config = ServerConfig::load_from(
            missing_file(),
            env(&[
                ("DATABASE_URL", "sqlite://books.db"),
                ("SHELF_SESSION__TIMEOUT_SECS", "10000000000000000"),
            ]),
        )
        .unwrap();

        assert_eq!(config.session.timeout_secs, 10_000_000_000_000_000);
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
        assert!(matches!(
            config.session_timeout(),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn test_longest_timeout_accepted() {
        let mut config = ServerConfig::default();
        config.storage.database_url = Some("sqlite://books.db".to_string());
        config.session.timeout_secs = MAX_SESSION_TIMEOUT_SECS;

        config.validate().unwrap();
        assert_eq!(
            config.session_timeout().unwrap(),
            chrono::Duration::days(30)
        );

        config.session.timeout_secs += 1;
        assert!(config.validate().is_err());
    }
}
