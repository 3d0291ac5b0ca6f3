//! Product catalog handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use tracing::instrument;

use merchify_core::ProductId;

use super::SearchQuery;
use crate::error::AppError;
use crate::models::{NewProduct, Product, ProductPatch};
use crate::state::AppState;
use crate::store::ProductStats;
use crate::views::ProductRow;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        .route("/api/products/stats", get(stats))
        .route(
            "/api/products/{id}",
            get(show).patch(update).delete(delete),
        )
}

/// Response for a delete request.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// `false` when the product was already gone.
    pub removed: bool,
}

/// Product rows whose name or category matches the search term.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<ProductRow>> {
    let store = state.store().read().await;
    Json(
        store
            .list_products(&query.search)
            .into_iter()
            .map(ProductRow::from)
            .collect(),
    )
}

/// Statistics over the whole catalog.
#[instrument(skip(state))]
pub async fn stats(State(state): State<AppState>) -> Json<ProductStats> {
    Json(state.store().read().await.product_stats())
}

/// One product with every field.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let store = state.store().read().await;
    Ok(Json(store.get_product(&id)?.clone()))
}

/// Create a product.
///
/// # Errors
///
/// Returns 422 if a field is rejected.
#[instrument(skip_all, fields(name = %body.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.store().write().await.create_product(body)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Overlay the provided fields onto a product.
///
/// # Errors
///
/// Returns 422 if a provided field is rejected and 404 if the product does
/// not exist.
#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, AppError> {
    let product = state.store().write().await.update_product(&id, patch)?;
    Ok(Json(product))
}

/// Delete a product. Deleting an absent product succeeds.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Json<DeleteResponse> {
    let removed = state.store().write().await.delete_product(&id);
    Json(DeleteResponse { removed })
}
