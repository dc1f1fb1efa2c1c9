// src/state.rs
use bcrypt::{hash, BcryptError};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub jwt_secret: String,
    /// Hash verified against when the username is unknown, so both failed
    /// login paths pay the same bcrypt cost.
    pub dummy_password_hash: String,
}

impl AppState {
    pub fn new(
        db_pool: SqlitePool,
        jwt_secret: impl Into<String>,
        bcrypt_cost: u32,
    ) -> Result<Self, BcryptError> {
        let dummy_password_hash = hash("catalog-api-unknown-user", bcrypt_cost)?;
        Ok(Self { db_pool, jwt_secret: jwt_secret.into(), dummy_password_hash })
    }
}
