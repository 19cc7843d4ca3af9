use std::path::PathBuf;
use std::str::FromStr;

/// Configuration that could not be parsed at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Relational mode when true, flat-file mode otherwise.
    pub use_database: bool,
    /// Enable the read-through listing cache.
    pub use_cache: bool,
    /// Cache entry lifetime in seconds.
    pub cache_ttl_secs: u64,
    /// Secret expected in the `X-API-Key` header of admin requests.
    pub admin_api_key: String,
    /// Connection string, only consulted when `use_database` is set.
    pub database_url: String,
    /// Directory holding the flat-file JSON documents.
    pub data_dir: PathBuf,
    /// Static site root served for non-API paths.
    pub site_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `USE_DATABASE`         | `true` (anything but `false`)    |
    /// | `USE_CACHE`            | `false`                          |
    /// | `CACHE_TTL_SECS`       | `300`                            |
    /// | `ADMIN_API_KEY`        | `dev-key-change-in-production`   |
    /// | `DATABASE_URL`         | built from `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_PORT`, `DB_NAME` |
    /// | `DATA_DIR`             | `data`                           |
    /// | `SITE_DIR`             | `.`                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse_var(&lookup, "PORT", 3000u16, "u16")?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30u64, "u64")?;
        let cache_ttl_secs = parse_var(&lookup, "CACHE_TTL_SECS", 300u64, "u64")?;

        let use_database = lookup("USE_DATABASE").map_or(true, |v| v.trim() != "false");
        let use_cache = lookup("USE_CACHE").is_some_and(|v| v.trim() == "true");

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                var("DB_USER", "postgres"),
                var("DB_PASSWORD", ""),
                var("DB_HOST", "localhost"),
                var("DB_PORT", "5432"),
                var("DB_NAME", "railway"),
            )
        });

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            use_database,
            use_cache,
            cache_ttl_secs,
            admin_api_key: var("ADMIN_API_KEY", "dev-key-change-in-production"),
            database_url,
            data_dir: PathBuf::from(var("DATA_DIR", "data")),
            site_dir: PathBuf::from(var("SITE_DIR", ".")),
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.use_database);
        assert!(!config.use_cache);
        assert_eq!(config.admin_api_key, "dev-key-change-in-production");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.database_url, "postgres://postgres:@localhost:5432/railway");
    }

    #[test]
    fn use_database_only_disabled_by_literal_false() {
        assert!(!load(&[("USE_DATABASE", "false")]).unwrap().use_database);
        assert!(load(&[("USE_DATABASE", "no")]).unwrap().use_database);
    }

    #[test]
    fn database_url_wins_over_components() {
        let config = load(&[
            ("DATABASE_URL", "postgres://u:p@db:5432/heritage"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "postgres://u:p@db:5432/heritage");
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[("CORS_ORIGINS", "http://a.test, http://b.test,")]).unwrap();
        assert_eq!(config.cors_origins, ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn invalid_port_is_reported() {
        assert_matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        );
    }
}
