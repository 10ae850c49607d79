use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::dataset;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::Store;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/user-stats", get(user_stats))
}

/// Training-dataset statistics merged with live submission statistics from
/// the store. A missing or unreachable store degrades to dataset-only
/// output.
async fn user_stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let records = state.records()?;
    let snapshot = dataset::compute_statistics(&records);

    let store_stats = match Store::from_config(state.config(), state.http()) {
        Some(store) => match store.user_stats().await {
            Ok(stats) => Some(stats),
            Err(err) => {
                tracing::warn!("Failed to read user stats from store: {}", err);
                None
            }
        },
        None => None,
    };

    let total_users = store_stats.as_ref().map(|s| s.total_users).unwrap_or(0);

    Ok(Json(json!({
        "success": true,
        "training_dataset": {
            "source": "Indian Fitness Dataset (CSV)",
            "total_profiles": snapshot.total_records,
            "demographics": snapshot.demographics,
            "goals": snapshot.goals,
            "diet_types": snapshot.diet_types,
            "exercise_types": snapshot.exercise.types.iter().take(5).collect::<Vec<_>>(),
        },
        "user_database": {
            "source": "Supabase (PostgreSQL)",
            "total_users": total_users,
            "last_activity": store_stats.as_ref().and_then(|s| s.last_user),
            "stats": store_stats.as_ref().and_then(|s| s.stats.clone()),
            "recent_users": store_stats.as_ref().map(|s| s.recent_users.clone()).unwrap_or_default(),
        },
        "combined": {
            "total_data_points": snapshot.total_records as u64 + total_users,
            "description": "training profiles + live user submissions",
        },
    })))
}
