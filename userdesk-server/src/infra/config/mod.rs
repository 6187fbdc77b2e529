pub mod cli;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

pub use cli::ServeArgs;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be provided for PostgreSQL connections")]
    MissingDatabaseUrl,

    #[error("invalid PostgreSQL URL: {source}")]
    InvalidDatabaseUrl {
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid database URL: must start with postgres:// or postgresql:// (got {scheme}://)")]
    UnsupportedDatabaseScheme { scheme: String },

    #[error("invalid listen host `{host}`")]
    InvalidHost { host: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| ConfigError::InvalidHost {
            host: self.host.clone(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// The configured URL, validated as a PostgreSQL connection string.
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        let raw = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let parsed =
            Url::parse(raw).map_err(|source| ConfigError::InvalidDatabaseUrl { source })?;
        if !matches!(parsed.scheme(), "postgres" | "postgresql") {
            return Err(ConfigError::UnsupportedDatabaseScheme {
                scheme: parsed.scheme().to_string(),
            });
        }
        Ok(raw)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn is_wildcard_included(&self) -> bool {
        self.allowed_origins.is_empty()
            || self
                .allowed_origins
                .iter()
                .any(|origin| origin.trim() == "*")
    }
}

impl Config {
    pub fn from_args(args: &ServeArgs) -> Self {
        Self {
            server: ServerConfig {
                host: args
                    .host
                    .clone()
                    .unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: args.port.unwrap_or(DEFAULT_PORT),
            },
            database: DatabaseConfig {
                url: args.database_url.clone(),
                max_connections: args
                    .db_max_connections
                    .filter(|max| *max > 0)
                    .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            },
            cors: CorsConfig {
                allowed_origins: args
                    .cors_allowed_origins
                    .iter()
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect(),
            },
            static_dir: args.static_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_flags_are_absent() {
        let config = Config::from_args(&ServeArgs::default());

        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.database.max_connections, DEFAULT_DB_MAX_CONNECTIONS);
        assert!(config.cors.is_wildcard_included());
        assert_eq!(
            config.server.socket_addr().expect("default addr"),
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
        );
    }

    #[test]
    fn missing_database_url_is_reported() {
        let config = Config::from_args(&ServeArgs {
            database_url: Some("   ".into()),
            ..Default::default()
        });

        assert!(matches!(
            config.database.require_url(),
            Err(ConfigError::MissingDatabaseUrl)
        ));
    }

    #[test]
    fn only_postgres_urls_are_accepted() {
        let mut database = DatabaseConfig {
            url: Some("mysql://localhost/app".into()),
            max_connections: 1,
        };
        assert!(matches!(
            database.require_url(),
            Err(ConfigError::UnsupportedDatabaseScheme { .. })
        ));

        database.url = Some("postgresql://app@localhost:5432/app".into());
        assert_eq!(
            database.require_url().expect("postgres url"),
            "postgresql://app@localhost:5432/app"
        );
    }

    #[test]
    fn explicit_origins_disable_wildcard() {
        let config = Config::from_args(&ServeArgs {
            cors_allowed_origins: vec![" https://admin.example ".into(), String::new()],
            ..Default::default()
        });

        assert_eq!(config.cors.allowed_origins, vec!["https://admin.example"]);
        assert!(!config.cors.is_wildcard_included());
    }
}
