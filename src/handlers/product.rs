// src/handlers/product.rs
use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    Extension, Json,
};
use sqlx::{QueryBuilder, Sqlite};
use tracing::{debug, error, instrument};

use crate::dtos::product::{ProductQueryParams, ProductResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::product::Product;
use crate::state::AppState;

// GET /products - List products, optionally filtered by search term and category
#[instrument(skip(state, auth), fields(user = %auth.username))]
pub async fn get_products(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ProductQueryParams>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT id, data_category, record_count, fields FROM products WHERE 1=1",
    );

    // instr() keeps the term literal; LIKE would treat % and _ as wildcards.
    if let Some(term) = params.search_term() {
        query
            .push(" AND instr(lower(data_category), lower(")
            .push_bind(term.to_string())
            .push(")) > 0");
    }

    if let Some(category) = params.category() {
        query.push(" AND data_category = ").push_bind(category.to_string());
    }

    query.push(" ORDER BY id");

    match query.build_query_as::<Product>().fetch_all(&state.db_pool).await {
        Ok(products) => {
            debug!(count = products.len(), "Listed products");
            let response = products.into_iter().map(ProductResponse::from).collect();
            Ok(Json(response))
        }
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e.into())
        }
    }
}

// GET /products/{id} - Get single product
#[instrument(skip(state))]
pub async fn get_product(
    id: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    // A non-numeric id cannot name a product.
    let Path(id) = id.map_err(|_| AppError::not_found("Product not found"))?;

    let product = sqlx::query_as::<_, Product>(
        "SELECT id, data_category, record_count, fields FROM products WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}
