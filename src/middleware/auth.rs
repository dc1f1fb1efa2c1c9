use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::state::AppState;

/// Identity of the caller, inserted into request extensions by [`require_auth`].
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub username: String,
}

/// Rejects the request with 401 unless it carries a valid `Bearer` token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = match req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
    {
        Some(t) if !t.is_empty() => t,
        _ => return AppError::Unauthenticated.into_response(),
    };

    let claims = match verify_token(token, &state.jwt_secret, Utc::now()) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    req.extensions_mut().insert(AuthContext { username: claims.sub });

    next.run(req).await
}
