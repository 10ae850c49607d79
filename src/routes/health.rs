use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Liveness plus dataset readiness: reports how many profiles are loadable
/// so a misconfigured dataset path shows up here before any plan request.
async fn health(State(state): State<AppState>) -> Json<Value> {
    let profiles = state.records().map(|r| r.len()).ok();

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "dataset": {
            "ready": profiles.is_some(),
            "profiles": profiles,
        }
    }))
}
