use crate::auth::jwt::JwtConfig;

/// Server configuration, read once at startup.
///
/// Everything defaults to values that work for local development; only the
/// JWT secret must be provided. Misconfigured values panic during boot
/// rather than surfacing later as odd runtime behaviour.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address, `HOST` (default `0.0.0.0`).
    pub host: String,
    /// Bind port, `PORT` (default `3000`).
    pub port: u16,
    /// Allowed CORS origins, `CORS_ORIGINS` as a comma-separated list
    /// (default `http://localhost:5173`, the dev frontend).
    pub cors_origins: Vec<String>,
    /// Per-request timeout, `REQUEST_TIMEOUT_SECS` (default `30`).
    pub request_timeout_secs: u64,
    /// Token signing configuration, see [`JwtConfig::from_env`].
    pub jwt: JwtConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_or("PORT", "3000")
                .parse()
                .expect("PORT must be a valid u16"),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a valid u64"),
            jwt: JwtConfig::from_env(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
