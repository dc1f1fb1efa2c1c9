use axum::{extract::State, Json};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

// GET /categories - Distinct categories in order of first appearance
#[instrument(skip(state))]
pub async fn get_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let categories = sqlx::query_scalar::<_, String>(
        "SELECT data_category FROM products GROUP BY data_category ORDER BY MIN(id)",
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(categories))
}
