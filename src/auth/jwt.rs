use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Fixed lifetime of every access token.
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

pub fn sign_token(username: &str, secret: &str, issued_at: DateTime<Utc>) -> Result<String, AppError> {
    let exp = issued_at + Duration::seconds(TOKEN_TTL_SECONDS);
    let claims = Claims {
        sub: username.to_string(),
        iat: issued_at.timestamp(),
        exp: exp.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
}

/// Checks signature and expiry against `now`. A token is still valid at its
/// `exp` second and rejected from the next one on.
pub fn verify_token(token: &str, secret: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against the caller's clock.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|d| d.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected token");
            AppError::Unauthenticated
        })?;

    if now.timestamp() > claims.exp {
        tracing::debug!(sub = %claims.sub, exp = claims.exp, "Rejected expired token");
        return Err(AppError::Unauthenticated);
    }

    Ok(claims)
}
