pub mod categories;
pub mod products;
pub mod users;

use axum::{middleware, Router};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router<AppState> {
    let open = users::routes();

    let protected = Router::new()
        .merge(products::routes())
        .merge(categories::routes())
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    open.merge(protected)
}
