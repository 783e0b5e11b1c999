// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP server for the purchase API.
//!
//! Thin axum layer over [`crate::handlers`]: extract the request, call the
//! handler, map the error taxonomy onto HTTP status codes.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::Error;
use crate::handlers::{
    self, ListEntitlementsRequest, PurchaseHandlerState, VerifyPurchaseRequest,
};

/// Shared handler state as used by the router.
pub type SharedState = Arc<PurchaseHandlerState>;

/// Error wrapper that maps the service taxonomy onto HTTP statuses.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::ItemNotFound(_) => StatusCode::NOT_FOUND,
            Error::PaymentNotCaptured(_)
            | Error::AmountMismatch { .. }
            | Error::AlreadyGranted
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            Error::Database(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("request failed: {}", self.0);
        }

        let body = Json(json!({
            "success": false,
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Extract the bearer token from the Authorization header, if present.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

/// Build the purchase API router.
pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/api/purchases/verify", post(verify_purchase))
        .route("/api/entitlements", get(list_entitlements))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// JSON body of a purchase verification request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyPurchaseBody {
    payment_id: String,
    item_id: Uuid,
}

async fn verify_purchase(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<VerifyPurchaseBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let receipt = handlers::handle_verify_purchase(
        &state,
        VerifyPurchaseRequest {
            payment_id: body.payment_id,
            item_id: body.item_id,
            bearer_token: bearer_token(&headers),
        },
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "purchase": receipt,
    })))
}

async fn list_entitlements(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entitlements = handlers::handle_list_entitlements(
        &state,
        ListEntitlementsRequest {
            bearer_token: bearer_token(&headers),
        },
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "entitlements": entitlements,
    })))
}

async fn health(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, ApiError> {
    let health = handlers::handle_health_check(&state).await?;
    Ok(Json(serde_json::to_value(health).unwrap_or_default()))
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run_server(addr: SocketAddr, state: SharedState) -> std::io::Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
