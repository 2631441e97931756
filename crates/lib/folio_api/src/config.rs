//! API server configuration.

use thiserror::Error;
use url::Url;

use folio_core::auth::AuthError;
use folio_core::auth::jwt::resolve_jwt_secret;

/// Startup configuration errors. Any of these stops the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT secret unavailable: {0}")]
    MissingSecret(String),

    #[error("Invalid allowed origin '{0}'")]
    InvalidOrigin(String),

    #[error("Invalid login path '{0}': must start with '/'")]
    InvalidLoginPath(String),
}

impl From<AuthError> for ConfigError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingSecret(msg) => ConfigError::MissingSecret(msg),
            other => ConfigError::MissingSecret(other.to_string()),
        }
    }
}

/// Deployment environment, read from `APP_ENV`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// `production` (any case) is production; everything else is not.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// Session token signing secret.
    pub jwt_secret: String,
    pub environment: Environment,
    /// Extra cross-origin origins, normalized to `scheme://host[:port]`.
    pub allowed_origins: Vec<String>,
    /// Where unauthenticated dashboard requests are sent.
    pub login_path: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable               | Default                             |
    /// |------------------------|-------------------------------------|
    /// | `BIND_ADDR`            | `127.0.0.1:3100`                    |
    /// | `DATABASE_URL`         | `postgres://localhost:5432/folio`   |
    /// | `APP_ENV`              | non-production                      |
    /// | `JWT_SECRET`           | required in production; otherwise generated & persisted |
    /// | `CORS_ALLOWED_ORIGINS` | none                                |
    /// | `LOGIN_PATH`           | `/login`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = Environment::parse(lookup("APP_ENV").as_deref());
        let jwt_secret = resolve_jwt_secret(
            lookup("JWT_SECRET"),
            environment == Environment::Production,
        )?;

        let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => Vec::new(),
        };

        let login_path = lookup("LOGIN_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "/login".into());
        if !login_path.starts_with('/') || login_path.starts_with("//") {
            return Err(ConfigError::InvalidLoginPath(login_path));
        }

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:3100".into()),
            pg_connection_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "postgres://localhost:5432/folio".into()),
            jwt_secret,
            environment,
            allowed_origins,
            login_path,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Parse a comma-separated origin list into `scheme://host[:port]` form.
pub fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(normalize_origin)
        .collect()
}

fn normalize_origin(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|_| ConfigError::InvalidOrigin(raw.to_string()))?;
    let bare_path = url.path().is_empty() || url.path() == "/";
    if !matches!(url.scheme(), "http" | "https")
        || url.host_str().is_none()
        || !bare_path
        || url.query().is_some()
    {
        return Err(ConfigError::InvalidOrigin(raw.to_string()));
    }
    Ok(url.origin().ascii_serialization())
}
