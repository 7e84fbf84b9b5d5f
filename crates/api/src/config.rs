use std::time::Duration;

use crate::auth::jwt::JwtConfig;

/// Deployment environment, selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse an `APP_ENV` value. Anything other than `production` is
    /// treated as development.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    /// Production emits JSON log lines.
    pub fn json_logs(self) -> bool {
        self == Self::Production
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the JWT
/// secret.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on waiting for background tasks at shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub environment: Environment,
    /// Interval between expired-session sweeps (default: `3600`).
    pub session_cleanup_interval_secs: u64,
    /// Token signing and lifespan settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `HOST`                          | `0.0.0.0`               |
    /// | `PORT`                          | `3000`                  |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`         | `30`                    |
    /// | `APP_ENV`                       | `development`           |
    /// | `SESSION_CLEANUP_INTERVAL_SECS` | `3600`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let environment = Environment::from_name(
            &std::env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
        );

        let session_cleanup_interval_secs: u64 = std::env::var("SESSION_CLEANUP_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("SESSION_CLEANUP_INTERVAL_SECS must be a valid u64");
        assert!(
            session_cleanup_interval_secs > 0,
            "SESSION_CLEANUP_INTERVAL_SECS must be positive"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            environment,
            session_cleanup_interval_secs,
            jwt,
        }
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    pub fn session_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.session_cleanup_interval_secs)
    }

    /// Whether CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn environment_defaults_to_development() {
        assert_eq!(Environment::from_name("production"), Environment::Production);
        assert_eq!(Environment::from_name(" PROD "), Environment::Production);
        assert_eq!(Environment::from_name("staging"), Environment::Development);
        assert!(!Environment::Development.json_logs());
    }
}
