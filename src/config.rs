//! Application configuration loaded from environment variables.

use std::env;

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    /// Seven days.
    pub const SESSION_TTL_SECS: u64 = 604_800;
    pub const STORE_TIMEOUT_MS: u64 = 2_000;
    pub const SWEEP_INTERVAL_SECS: u64 = 3_600;
    pub const DEV_SWEEP_INTERVAL_SECS: u64 = 60;
    pub const DB_MAX_CONNECTIONS: u32 = 10;
    /// Shortest admin secret accepted in production.
    pub const MIN_PRODUCTION_SECRET_LEN: usize = 16;
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Session store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    /// Process-local map. Nothing in the server writes sessions into it, so
    /// only header authentication can succeed unless sessions are issued
    /// in-process through `services::issue_session`.
    Memory,
    /// Shared table, written by `manage-sessions` or a login service.
    Postgres,
}

impl SessionBackend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "postgres" | "postgresql" => Some(Self::Postgres),
            _ => None,
        }
    }

    /// Whether sessions written by other processes are visible to the server.
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Postgres)
    }
}

impl std::fmt::Display for SessionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Application configuration.
///
/// `Debug` is implemented by hand so the admin secret is never printed.
#[derive(Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Session lifetime in seconds, shared by every session issued under this config
    pub session_ttl_secs: u64,
    /// Header carrying the admin credential (empty/absent disables header auth)
    pub admin_auth_header: Option<String>,
    /// Secret the admin header is compared against (empty/absent disables header auth)
    pub admin_auth_secret: Option<String>,
    /// Which session store to use
    pub session_backend: SessionBackend,
    /// PostgreSQL connection string (required for the postgres backend)
    pub database_url: Option<String>,
    /// Timeout for a single session lookup, in milliseconds
    pub store_timeout_ms: u64,
    /// Interval between expired-session sweeps, in seconds
    pub sweep_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `GATE_HOST`: Server host (default: 127.0.0.1)
    /// - `GATE_PORT`: Server port (default: 8080)
    /// - `SESSION_EXPIRY`: Session TTL in seconds (default: 604800)
    /// - `ADMIN_AUTH_HEADER`: Admin credential header name (optional)
    /// - `ADMIN_AUTH_SECRET`: Admin credential secret (optional)
    /// - `SESSION_STORE`: `memory` or `postgres` (default: memory)
    /// - `DATABASE_URL`: PostgreSQL URL (required for postgres)
    /// - `SESSION_STORE_TIMEOUT_MS`: Store lookup timeout (default: 2000)
    /// - `SESSION_SWEEP_INTERVAL_SECS`: Expired-session sweep interval
    ///   (default: 3600, 60 in development)
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let host = env::var("GATE_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("GATE_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("GATE_PORT must be a valid port number"))?;

        let session_ttl_secs = parse_session_ttl(env::var("SESSION_EXPIRY").ok().as_deref())?;

        let admin_auth_header = non_empty_var("ADMIN_AUTH_HEADER");
        let admin_auth_secret = non_empty_var("ADMIN_AUTH_SECRET");

        let session_backend = match env::var("SESSION_STORE") {
            Ok(s) => SessionBackend::parse(&s).ok_or(ConfigError::InvalidValue(
                "SESSION_STORE must be 'memory' or 'postgres'",
            ))?,
            Err(_) => SessionBackend::Memory,
        };

        let database_url = non_empty_var("DATABASE_URL");
        if session_backend == SessionBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("DATABASE_URL"));
        }

        let store_timeout_ms = env::var("SESSION_STORE_TIMEOUT_MS")
            .unwrap_or_else(|_| defaults::STORE_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or(ConfigError::InvalidValue(
                "SESSION_STORE_TIMEOUT_MS must be a positive number",
            ))?;

        let default_sweep = if environment.is_development() {
            defaults::DEV_SWEEP_INTERVAL_SECS
        } else {
            defaults::SWEEP_INTERVAL_SECS
        };
        let sweep_interval_secs = match env::var("SESSION_SWEEP_INTERVAL_SECS") {
            Ok(s) => s.parse::<u64>().ok().filter(|s| *s > 0).ok_or(
                ConfigError::InvalidValue("SESSION_SWEEP_INTERVAL_SECS must be a positive number"),
            )?,
            Err(_) => default_sweep,
        };

        let config = Config {
            environment,
            host,
            port,
            session_ttl_secs,
            admin_auth_header,
            admin_auth_secret,
            session_backend,
            database_url,
            store_timeout_ms,
            sweep_interval_secs,
        };

        config.validate()?;
        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Checks that apply in every environment.
    fn validate(&self) -> Result<(), ConfigError> {
        crate::auth::parse_header_name(self.admin_auth_header.as_deref())?;
        Ok(())
    }

    /// Validate that production configuration is fit for production.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.session_backend == SessionBackend::Memory {
            errors.push(
                "SESSION_STORE is 'memory'. Sessions would be lost on restart; use 'postgres'."
                    .to_string(),
            );
        }

        if self.header_auth_enabled()
            && let Some(ref secret) = self.admin_auth_secret
            && secret.len() < defaults::MIN_PRODUCTION_SECRET_LEN
        {
            errors.push(format!(
                "ADMIN_AUTH_SECRET must be at least {} bytes in production.",
                defaults::MIN_PRODUCTION_SECRET_LEN
            ));
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Header auth is active only when both the header name and secret are set.
    pub fn header_auth_enabled(&self) -> bool {
        self.admin_auth_header.is_some() && self.admin_auth_secret.is_some()
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("admin_auth_header", &self.admin_auth_header)
            .field(
                "admin_auth_secret",
                &self.admin_auth_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("session_backend", &self.session_backend)
            .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
            .field("store_timeout_ms", &self.store_timeout_ms)
            .field("sweep_interval_secs", &self.sweep_interval_secs)
            .finish()
    }
}

/// Read an env var, treating empty as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `SESSION_EXPIRY`: a positive number of seconds.
fn parse_session_ttl(raw: Option<&str>) -> Result<u64, ConfigError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(defaults::SESSION_TTL_SECS),
        Some(s) => s
            .parse::<u64>()
            .ok()
            .filter(|ttl| *ttl > 0)
            .ok_or(ConfigError::InvalidValue(
                "SESSION_EXPIRY must be a positive number of seconds",
            )),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", bullet_list(&.0))]
    ProductionValidation(Vec<String>),
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}
