use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, StoreError};
use crate::state::AppState;
use crate::store::{NewFeedback, Store};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/feedback", post(submit_feedback))
}

#[derive(Debug, Deserialize)]
struct FeedbackRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    age_group: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    occupation: String,
    #[serde(default)]
    current_fitness_level: String,
    #[serde(default)]
    fitness_goals: Vec<String>,
    #[serde(default)]
    diet_type: String,
    #[serde(default)]
    how_did_you_hear: String,
    #[serde(default)]
    rating: i64,
    #[serde(default)]
    liked_features: String,
    #[serde(default)]
    improvements: String,
    #[serde(default)]
    would_recommend: Option<bool>,
    #[serde(default)]
    consent_to_research: bool,
    #[serde(default)]
    consent_to_contact: bool,
}

async fn submit_feedback(
    State(state): State<AppState>,
    Json(form): Json<FeedbackRequest>,
) -> Result<Json<Value>, AppError> {
    let store =
        Store::from_config(state.config(), state.http()).ok_or(StoreError::NotConfigured)?;

    let row = NewFeedback {
        name: none_if_empty(form.name),
        email: none_if_empty(form.email),
        phone: none_if_empty(form.phone),
        age_group: none_if_empty(form.age_group),
        city: none_if_empty(form.city),
        occupation: none_if_empty(form.occupation),
        current_fitness_level: none_if_empty(form.current_fitness_level),
        fitness_goals: (!form.fitness_goals.is_empty()).then_some(form.fitness_goals),
        diet_type: none_if_empty(form.diet_type),
        how_did_you_hear: none_if_empty(form.how_did_you_hear),
        rating: (form.rating != 0).then_some(form.rating),
        liked_features: none_if_empty(form.liked_features),
        improvements: none_if_empty(form.improvements),
        would_recommend: form.would_recommend,
        consent_to_research: form.consent_to_research,
        consent_to_contact: form.consent_to_contact,
    };

    let feedback_id = store.insert_feedback(&row).await?;
    let total_feedback = store.feedback_count().await.unwrap_or(0);

    tracing::info!("Stored feedback {:?} (total: {})", feedback_id, total_feedback);

    Ok(Json(json!({
        "success": true,
        "feedback_id": feedback_id,
        "total_feedback": total_feedback,
        "message": "Thank you for your feedback!",
    })))
}

fn none_if_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
