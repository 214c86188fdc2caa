//! HTTP handlers for account-verification-service.

pub mod verify;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

use crate::models::PAYSTACK_SECRET_KEY;
use crate::services::get_metrics;
use crate::startup::AppState;

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": state.config.service_name,
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Ready only once the Paystack key is configured; without it every
/// verification would answer 500.
pub async fn readiness_check(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    if state.variables.get(PAYSTACK_SECRET_KEY).is_none() {
        return Err(AppError::ServiceUnavailable(format!(
            "{} is not configured",
            PAYSTACK_SECRET_KEY
        )));
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "bank_codes": state.verifier.bank_codes().len()
        })),
    ))
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
