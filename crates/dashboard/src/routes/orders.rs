//! Order list handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::Local;
use serde::Deserialize;
use tracing::instrument;

use merchify_core::OrderId;

use crate::error::AppError;
use crate::models::Order;
use crate::state::AppState;
use crate::store::{OrderStats, StatusFilter};
use crate::views::OrderRow;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list))
        .route("/api/orders/stats", get(stats))
        .route("/api/orders/{id}", get(show))
}

/// Order list query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: StatusFilter,
}

/// Order rows matching the search term and status filter.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Json<Vec<OrderRow>> {
    let now = Local::now();
    let store = state.store().read().await;
    let rows = store
        .list_orders(&query.search, query.status)
        .into_iter()
        .map(|o| OrderRow::project(o, &now))
        .collect();
    Json(rows)
}

/// Statistics over every order; "today" is the server's local day.
#[instrument(skip(state))]
pub async fn stats(State(state): State<AppState>) -> Json<OrderStats> {
    let store = state.store().read().await;
    Json(store.order_stats(&Local::now()))
}

/// One order with its line items.
///
/// # Errors
///
/// Returns 404 if the order does not exist.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>, AppError> {
    let store = state.store().read().await;
    Ok(Json(store.get_order(&id)?.clone()))
}
