use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_identifier, validate_non_empty_string, validate_range, Validate};
use url::Url;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_DATABASE: &str = "postgres";
pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_PASSWORD: &str = "postgres";
pub const DEFAULT_SCHEMA: &str = "public";

/// Connection parameters, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub schema: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
        }
    }
}

impl DbConfig {
    /// Reads `POSTGRES_HOST`, `POSTGRES_PORT`, `POSTGRES_DB`, `POSTGRES_USER`,
    /// `POSTGRES_PASSWORD` and `POSTGRES_SCHEMA`, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str, fallback: String| lookup(key).unwrap_or(fallback);

        let port = match lookup("POSTGRES_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| EtlError::ConfigError {
                message: format!("POSTGRES_PORT '{}' is not a valid port: {}", raw, e),
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host: get("POSTGRES_HOST", defaults.host),
            port,
            database: get("POSTGRES_DB", defaults.database),
            user: get("POSTGRES_USER", defaults.user),
            password: get("POSTGRES_PASSWORD", defaults.password),
            schema: get("POSTGRES_SCHEMA", defaults.schema),
        })
    }

    /// `postgres://<user>:<password>@<host>:<port>/<database>` with credentials percent-encoded.
    pub fn connection_url(&self) -> Result<Url> {
        let invalid = |reason: String| EtlError::ConfigError { message: reason };

        let mut url = Url::parse(&format!("postgres://{}:{}", self.host, self.port))
            .map_err(|e| invalid(format!("invalid host '{}': {}", self.host, e)))?;
        url.set_username(&self.user)
            .map_err(|_| invalid("cannot set user on connection URL".to_string()))?;
        url.set_password(Some(&self.password))
            .map_err(|_| invalid("cannot set password on connection URL".to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("connection URL cannot carry a database".to_string()))?
            .push(&self.database);
        Ok(url)
    }
}

impl Validate for DbConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("POSTGRES_HOST", &self.host)?;
        validate_range("POSTGRES_PORT", self.port, 1, u16::MAX)?;
        validate_identifier("POSTGRES_DB", &self.database)?;
        validate_non_empty_string("POSTGRES_USER", &self.user)?;
        validate_identifier("POSTGRES_SCHEMA", &self.schema)?;
        Ok(())
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("schema", &self.schema)
            .finish()
    }
}
