use std::env;
use std::fmt;

use auth::AuthSettings;
use auth::HashingCost;
use config::builder::DefaultState;
use config::Config as ConfigBuilder;
use config::ConfigBuilder as Builder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Ten years
const MAX_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    /// Absent means the in-memory repository is used
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub product_key: ProductKeyConfig,
    pub hashing: HashingCost,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

#[derive(Deserialize, Clone)]
pub struct ProductKeyConfig {
    pub secret: String,
    pub require_admin: bool,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Connection strings usually embed a password
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl fmt::Debug for ProductKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductKeyConfig")
            .field("secret", &"<redacted>")
            .field("require_admin", &self.require_admin)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (REALTY_JWT__SECRET, REALTY_SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults for everything except the secrets
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = Self::with_defaults(ConfigBuilder::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: REALTY_DATABASE__URL=postgres://... overrides database.url
            .add_source(
                Environment::with_prefix("REALTY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let hours = self.jwt.expiration_hours;
        if !(1..=MAX_EXPIRATION_HOURS).contains(&hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                MAX_EXPIRATION_HOURS, hours
            )));
        }

        Ok(())
    }

    fn with_defaults(
        builder: Builder<DefaultState>,
    ) -> Result<Builder<DefaultState>, ConfigError> {
        let hashing = HashingCost::default();

        builder
            .set_default("server.http_port", 3000_i64)?
            .set_default("jwt.expiration_hours", 24_i64)?
            .set_default("product_key.require_admin", true)?
            .set_default("hashing.memory_kib", i64::from(hashing.memory_kib))?
            .set_default("hashing.iterations", i64::from(hashing.iterations))?
            .set_default("hashing.parallelism", i64::from(hashing.parallelism))
    }

    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            jwt_secret: self.jwt.secret.clone(),
            product_key_secret: self.product_key.secret.clone(),
            token_lifetime: chrono::Duration::hours(self.jwt.expiration_hours),
            hashing: self.hashing,
        }
    }
}
