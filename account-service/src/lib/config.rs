use std::env;

use auth::JwtError;
use auth::TokenSettings;
use chrono::Duration;
use chrono::Utc;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "DeviceHub API".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
    #[serde(default = "default_refresh_token_expire_days")]
    pub refresh_token_expire_days: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .field("refresh_token_expire_days", &self.refresh_token_expire_days)
            .finish()
    }
}

impl JwtConfig {
    /// Token settings for the authenticator.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - `algorithm` is not a known JWT algorithm
    /// * `InvalidLifetime` - A lifetime is not positive or is too large to
    ///   produce a valid expiry
    pub fn token_settings(&self) -> Result<TokenSettings, JwtError> {
        Ok(TokenSettings {
            algorithm: auth::parse_algorithm(&self.algorithm)?,
            access_token_ttl: lifetime(
                "access_token_expire_minutes",
                self.access_token_expire_minutes,
                Duration::try_minutes,
            )?,
            refresh_token_ttl: lifetime(
                "refresh_token_expire_days",
                self.refresh_token_expire_days,
                Duration::try_days,
            )?,
        })
    }
}

fn lifetime(
    key: &str,
    value: i64,
    to_duration: fn(i64) -> Option<Duration>,
) -> Result<Duration, JwtError> {
    to_duration(value)
        .filter(|ttl| *ttl > Duration::zero())
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| JwtError::InvalidLifetime(format!("{} = {}", key, value)))
}

fn default_max_connections() -> u32 {
    5
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_expire_minutes() -> i64 {
    30
}

fn default_refresh_token_expire_days() -> i64 {
    7
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::load_with(&run_mode, environment())
    }

    fn load_with(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        configuration.try_deserialize()
    }
}

/// Unprefixed environment source with `__` as the nesting separator.
///
/// Example: `DATABASE__URL=postgres://...` overrides `database.url`.
fn environment() -> Environment {
    Environment::default().separator("__").try_parsing(true)
}
