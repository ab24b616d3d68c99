use std::time::Duration;

const DEFAULT_APPLICATION_PORT: i64 = 9999;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct StaticConfiguration {
    pub database: DatabaseConfiguration,
    #[serde(default)]
    pub pool: PoolConfiguration,
    pub application_port: u16,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct DatabaseConfiguration {
    pub username: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub database_name: String,
}

impl DatabaseConfiguration {
    pub fn connection_string(&self) -> String {
        format!("{}/{}", self.without_database(), self.database_name)
    }

    /// Server-level URL, used to create or drop whole databases.
    pub fn without_database(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port
        )
    }
}

/// Connection pool sizing. `min_connections` is the idle floor the pool keeps warm.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct PoolConfiguration {
    pub min_connections: u32,
    pub max_connections: u32,
    pub max_lifetime_seconds: u64,
    pub acquire_timeout_seconds: u64,
}

impl Default for PoolConfiguration {
    fn default() -> Self {
        Self {
            min_connections: 10,
            max_connections: 100,
            max_lifetime_seconds: 3600,
            acquire_timeout_seconds: 5,
        }
    }
}

impl PoolConfiguration {
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_seconds)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }
}

/// Loads `configuration.yaml`; `PORT`, when set, replaces `application_port`.
pub fn get_static_configuration() -> Result<StaticConfiguration, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("application_port", DEFAULT_APPLICATION_PORT)?
        .add_source(config::File::new(
            "configuration.yaml",
            config::FileFormat::Yaml,
        ))
        .set_override_option("application_port", std::env::var("PORT").ok())?
        .build()?;

    settings.try_deserialize::<StaticConfiguration>()
}
