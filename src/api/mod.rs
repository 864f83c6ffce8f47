//! API layer
//!
//! HTTP handlers for:
//! - Account registration and login
//! - Message CRUD
//! - Health and Prometheus metrics

mod accounts;
mod messages;

use axum::{
    Router,
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Serialize;

use crate::AppState;

/// Create the account and message router
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route(
            "/messages",
            post(messages::post_message).get(messages::get_all_messages),
        )
        .route(
            "/messages/:id",
            get(messages::get_message)
                .delete(messages::delete_message)
                .patch(messages::patch_message),
        )
        .route(
            "/accounts/:account_id/messages",
            get(messages::get_account_messages),
        )
}

/// 200 with the JSON value, or 200 with an empty body when absent
fn json_or_empty<T: Serialize>(value: Option<T>) -> Response {
    match value {
        Some(value) => Json(value).into_response(),
        None => (StatusCode::OK, Body::empty()).into_response(),
    }
}

/// Create the operational router: `/health` and `/metrics`
pub fn ops_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics_handler() -> Response {
    match crate::metrics::render() {
        Ok((content_type, text)) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], text).into_response()
        }
        Err(error) => {
            tracing::error!(%error, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics").into_response()
        }
    }
}
