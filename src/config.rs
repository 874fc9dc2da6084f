use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub cors_allowed_origin: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));

        let database_url = required("DATABASE_URL")?;
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {v}"))?,
            None => 10,
        };

        let secret = required("JWT_SECRET")?;
        anyhow::ensure!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let raw_expiration = required("JWT_EXPIRATION_SECONDS")?;
        let expiration_seconds = raw_expiration
            .parse::<u64>()
            .with_context(|| format!("JWT_EXPIRATION_SECONDS is not a number: {raw_expiration}"))?;
        anyhow::ensure!(expiration_seconds > 0, "JWT_EXPIRATION_SECONDS must be positive");

        let jwt = JwtConfig {
            secret,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "userauth".into()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "userauth-clients".into()),
            expiration_seconds,
        };

        let port = match lookup("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("APP_PORT is not a port number: {v}"))?,
            None => 8080,
        };

        Ok(Self {
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            database_url,
            max_connections,
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| "http://localhost:5173".into()),
            jwt,
        })
    }
}
