use axum::{routing::post, Router};
use crate::handlers::user::login_user;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login_user))
}
