use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    pub log_headers: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(Environment::default())
    }

    pub(crate) fn load(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            // DATABASE_URL, PORT, MAX_CONNECTIONS, LOG_HEADERS
            .add_source(environment)
            .set_default("database_url", "sqlite://yoga_sync.db")?
            .set_default("port", 3000)?
            .set_default("max_connections", 5)?
            .set_default("log_headers", false)?
            .build()?;

        config.try_deserialize()
    }
}
