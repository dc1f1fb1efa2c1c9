// src/config.rs
use std::net::IpAddr;
use thiserror::Error;

/// Secret used only when `APP_ENV=development` and no `JWT_SECRET` is set.
const DEV_JWT_SECRET: &str = "dev-secret-key";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set outside development (APP_ENV={0})")]
    MissingSecret(String),
    #[error("JWT_SECRET must not be empty")]
    EmptySecret,
    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Custom `Debug` redacts `jwt_secret`.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub bcrypt_cost: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = lookup("APP_ENV").unwrap_or_else(|| "production".to_string());

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(s) if s.is_empty() => return Err(ConfigError::EmptySecret),
            Some(s) => s,
            None if app_env == "development" => {
                tracing::warn!("JWT_SECRET not set; using insecure development secret");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::MissingSecret(app_env)),
        };

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "sqlite:catalog.db".to_string());

        let host = match lookup("HOST") {
            Some(h) => h.parse::<IpAddr>().map_err(|_| ConfigError::Invalid { name: "HOST", value: h })?,
            None => IpAddr::from([127, 0, 0, 1]),
        };

        let port = match lookup("PORT") {
            Some(p) => p.parse::<u16>().map_err(|_| ConfigError::Invalid { name: "PORT", value: p })?,
            None => 5000,
        };

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(c) => c
                .parse::<u32>()
                .ok()
                .filter(|cost| (4..=31).contains(cost))
                .ok_or(ConfigError::Invalid { name: "BCRYPT_COST", value: c })?,
            None => bcrypt::DEFAULT_COST,
        };

        Ok(Self { database_url, jwt_secret, host, port, bcrypt_cost })
    }
}
