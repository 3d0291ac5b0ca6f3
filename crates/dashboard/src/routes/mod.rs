//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                            - Health check
//!
//! # Chats
//! GET    /api/conversations?search=         - Inbox rows
//! GET    /api/conversations/{id}            - Conversation with messages
//! POST   /api/conversations/{id}/messages   - Append a message
//!
//! # Orders
//! GET    /api/orders?search=&status=        - Order rows
//! GET    /api/orders/stats                  - Order statistics
//! GET    /api/orders/{id}                   - Order with line items
//!
//! # Products
//! GET    /api/products?search=              - Product rows
//! GET    /api/products/stats                - Catalog statistics
//! POST   /api/products                      - Create product
//! GET    /api/products/{id}                 - Product detail
//! PATCH  /api/products/{id}                 - Partial update
//! DELETE /api/products/{id}                 - Delete (idempotent)
//!
//! # Settings
//! GET    /api/settings                      - Store settings
//! PUT    /api/settings                      - Replace store settings
//!
//! # Auth (local profile only, no credential check)
//! POST   /api/auth/login                    - Sign in
//! POST   /api/auth/register                 - Register and sign in
//! POST   /api/auth/logout                   - Sign out
//! GET    /api/auth/me                       - Current user and onboarding flag
//!
//! # Onboarding
//! GET    /api/onboarding                    - Progress and current question
//! PUT    /api/onboarding/answers            - Record one answer
//! POST   /api/onboarding/next               - Advance or complete
//! POST   /api/onboarding/previous           - Go back one step
//! ```

pub mod auth;
pub mod chats;
pub mod onboarding;
pub mod orders;
pub mod products;
pub mod settings;

use axum::{Json, Router, routing::get};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::state::AppState;

/// Build the complete router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(chats::router())
        .merge(orders::router())
        .merge(products::router())
        .merge(settings::router())
        .merge(auth::router())
        .merge(onboarding::router())
}

/// Free-text search query shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

/// Liveness health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
