//! API route handlers.
//!
//! Three endpoints under `/api/weather`: `current` proxies the latest
//! reading untouched, `stats` serves the daily observations with a plain
//! min/max block, and `all` joins both upstream calls into the unified
//! payload the dashboard renders from.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::DashboardError;
use crate::pws::PwsClient;
use crate::stats;

pub struct AppState {
    pub client: PwsClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather/current", get(current))
        .route("/weather/stats", get(daily_stats))
        .route("/weather/all", get(unified))
        .with_state(Arc::new(state))
}

type ErrorBody = (StatusCode, Json<Value>);

fn upstream_failure(context: &str, err: &DashboardError) -> ErrorBody {
    tracing::error!(error = %err, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": context,
            "details": err.user_message(),
        })),
    )
}

/// Daily observation list from an upstream history payload. A missing
/// or non-array `observations` field reads as an empty day.
fn observation_list(payload: &Value) -> &[Value] {
    payload
        .get("observations")
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// First observation of a current-conditions payload.
fn current_observation(payload: &Value) -> Option<&Value> {
    observation_list(payload).first()
}

#[instrument(skip(state))]
async fn current(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ErrorBody> {
    let payload = state
        .client
        .fetch_current()
        .await
        .map_err(|err| upstream_failure("Failed to fetch current weather", &err))?;
    Ok(Json(payload))
}

#[instrument(skip(state))]
async fn daily_stats(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ErrorBody> {
    let payload = state
        .client
        .fetch_daily()
        .await
        .map_err(|err| upstream_failure("Failed to fetch daily stats", &err))?;

    let observations = observation_list(&payload);
    if observations.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No data available for today" })),
        ));
    }

    Ok(Json(json!({
        "last": observations.last(),
        "minmax": stats::plain_minmax(observations),
    })))
}

#[instrument(skip(state))]
async fn unified(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ErrorBody> {
    let (current_payload, daily_payload) =
        tokio::try_join!(state.client.fetch_current(), state.client.fetch_daily())
            .map_err(|err| upstream_failure("Failed to fetch unified weather data", &err))?;

    let observations = observation_list(&daily_payload);
    let stats = stats::compute_stats(observations, current_observation(&current_payload));

    // The current-conditions payload goes out untouched; only the stats
    // block is computed server-side.
    Ok(Json(json!({
        "current": current_payload,
        "stats": stats,
    })))
}
