use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use bcrypt::{verify, BcryptError};
use chrono::Utc;
use tracing::{instrument, warn};

use crate::auth::jwt::sign_token;
use crate::dtos::user::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// Runs bcrypt whether or not the user exists; an unknown user is checked
/// against `dummy_hash` and never matches.
fn password_matches(
    password: &str,
    stored_hash: Option<&str>,
    dummy_hash: &str,
) -> Result<bool, BcryptError> {
    let ok = verify(password, stored_hash.unwrap_or(dummy_hash))?;
    Ok(ok && stored_hash.is_some())
}

// POST /login - Exchange credentials for an access token
#[instrument(skip_all)]
pub async fn login_user(
    State(AppState { db_pool, jwt_secret, dummy_password_hash }): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        warn!(error = %e, "Rejected login body");
        AppError::malformed("Missing JSON in request")
    })?;

    let (username, password) = match (payload.username, payload.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => return Err(AppError::malformed("Missing username or password")),
    };

    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash FROM users WHERE username = ?",
    )
    .bind(&username)
    .fetch_optional(&db_pool)
    .await?;

    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let ok = tokio::task::spawn_blocking(move || {
        password_matches(&password, stored_hash.as_deref(), &dummy_password_hash)
    })
    .await
    .map_err(|e| AppError::internal(format!("Password verify task failed: {e}")))?
    .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

    let user = match user {
        Some(user) if ok => user,
        _ => {
            // The submitted username stays out of the logs.
            warn!("Login failed");
            return Err(AppError::InvalidCredentials);
        }
    };

    let access_token = sign_token(&user.username, &jwt_secret, Utc::now())?;
    tracing::info!(user_id = user.id, username = %user.username, "Issued access token");

    Ok(Json(LoginResponse { access_token }))
}
