use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::dataset;
use crate::error::AppError;
use crate::llm;
use crate::state::AppState;
use crate::store::{NewPlanUser, Store};
use crate::types::profile::QueryProfile;

const MATCHED_PROFILES: usize = 10;

const SYSTEM_PROMPT: &str = "You are an expert Indian nutritionist and fitness coach with access to a real dataset of 1000 Indian fitness profiles. Always respond with valid JSON only, no markdown formatting.";

/// Regional food options the model is constrained to pick meals from.
const FOOD_DATABASE: &str = r#"
BREAKFAST OPTIONS (Indian):
Vegetarian: Poha (180 cal), Upma (200 cal), Idli-Sambar (250 cal), Moong dal chilla (150 cal), Besan chilla (170 cal), Oats porridge (180 cal), Paratha with curd (300 cal), Dosa with chutney (200 cal), Daliya/Broken wheat (190 cal), Uttapam (220 cal)
Non-Veg: Egg bhurji with roti (280 cal), Omelette with toast (250 cal), Boiled eggs with bread (200 cal), Egg dosa (270 cal), Keema paratha (350 cal)

LUNCH OPTIONS (Indian):
Vegetarian: Dal-rice-sabzi (450 cal), Rajma-rice (400 cal), Chole-roti (380 cal), Kadhi-rice (350 cal), Paneer sabzi with roti (420 cal), Sambar-rice (380 cal), Mixed veg pulao (400 cal), Palak paneer with roti (450 cal)
Non-Veg: Chicken curry with rice (500 cal), Fish curry with rice (420 cal), Egg curry with roti (380 cal), Chicken biryani (550 cal), Mutton curry with roti (520 cal)

DINNER OPTIONS (Indian):
Vegetarian: Roti with dal and sabzi (350 cal), Khichdi (280 cal), Vegetable pulao (320 cal), Palak paneer with roti (400 cal), Moong dal with roti (320 cal), Mixed dal with rice (350 cal)
Non-Veg: Grilled chicken with roti (380 cal), Fish tikka with salad (300 cal), Tandoori chicken with roti (420 cal), Egg curry with rice (400 cal)

SNACKS (Indian):
Healthy: Roasted chana (120 cal), Makhana/Fox nuts (100 cal), Sprouts chaat (150 cal), Fruit chaat (100 cal), Coconut water (45 cal), Buttermilk/Chaas (40 cal), Green tea (0 cal), Roasted peanuts (170 cal)
Protein: Paneer tikka (200 cal), Boiled eggs (70 cal each), Soya chunks (150 cal), Greek yogurt/Hung curd (100 cal), Protein smoothie (180 cal)
"#;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/generate-plan", post(generate_plan))
}

/// Form fields arrive as strings from the web client; numbers are tolerated
/// too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numberish {
    Text(String),
    Number(f64),
}

impl Default for Numberish {
    fn default() -> Self {
        Numberish::Text(String::new())
    }
}

impl Numberish {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Numberish::Text(s) => s.trim().parse().ok(),
            Numberish::Number(n) => Some(*n),
        }
    }

    fn as_i64(&self) -> Option<i64> {
        self.as_f64().map(|f| f.trunc() as i64)
    }

    fn as_text(&self) -> String {
        match self {
            Numberish::Text(s) => s.clone(),
            Numberish::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlanRequest {
    name: String,
    #[serde(default)]
    age: Numberish,
    gender: String,
    #[serde(default)]
    weight: Numberish,
    #[serde(default)]
    height: Numberish,
    goal: String,
    #[serde(default)]
    activity_level: String,
    diet_preference: String,
    #[serde(default)]
    medical_conditions: String,
    #[serde(default)]
    equipment: String,
}

#[derive(Serialize)]
struct DatasetInfo {
    total_profiles: usize,
    source: &'static str,
    matched_profiles: usize,
}

async fn generate_plan(
    State(state): State<AppState>,
    Json(form): Json<PlanRequest>,
) -> Result<Json<Value>, AppError> {
    if form.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let records = state.records()?;

    let query = QueryProfile {
        age: form.age.as_i64().unwrap_or(25),
        gender: form.gender.clone(),
        goal: form.goal.clone(),
        diet_preference: form.diet_preference.clone(),
    };

    let context = dataset::generate_context(&records, &query, MATCHED_PROFILES);
    let prompt = build_prompt(&form, &context);

    tracing::info!(
        "Generating plan for {} (goal: {}, diet: {})",
        form.name,
        form.goal,
        form.diet_preference
    );

    let plan = llm::generate_plan(state.http(), state.config(), SYSTEM_PROMPT, &prompt).await?;

    let stats = dataset::compute_statistics(&records);

    let plan_calories = plan
        .pointer("/diet/calories")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let plan_workout_days = plan
        .pointer("/workout/daysPerWeek")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    // Persist the submission so future reporting can include it. Store
    // trouble never blocks the plan the user is waiting for.
    let database = match Store::from_config(state.config(), state.http()) {
        Some(store) => {
            let weight = form.weight.as_f64().unwrap_or(0.0);
            let height = form.height.as_f64().unwrap_or(0.0);
            let user = NewPlanUser {
                name: form.name.clone(),
                age: form.age.as_i64().unwrap_or(0),
                gender: form.gender.clone(),
                weight,
                height,
                bmi: compute_bmi(weight, height),
                goal: form.goal.clone(),
                activity_level: form.activity_level.clone(),
                diet_preference: form.diet_preference.clone(),
                medical_conditions: form.medical_conditions.clone(),
                equipment: form.equipment.clone(),
                plan_calories,
                plan_workout_days,
            };

            match store.insert_user(&user).await {
                Ok(user_id) => {
                    let total_users = store.user_count().await.unwrap_or(1);
                    json!({
                        "provider": "Supabase (PostgreSQL)",
                        "user_id": user_id,
                        "total_users_served": total_users,
                        "message": "Your data has been saved to improve future recommendations",
                    })
                }
                Err(err) => {
                    tracing::warn!("Failed to persist user submission: {}", err);
                    json!({ "available": false })
                }
            }
        }
        None => json!({ "available": false }),
    };

    let dataset_info = DatasetInfo {
        total_profiles: stats.total_records,
        source: "Indian Fitness Dataset (CSV)",
        matched_profiles: MATCHED_PROFILES,
    };

    Ok(Json(json!({
        "success": true,
        "plan": plan,
        "model": state.config().groq_model,
        "provider": "Groq",
        "dataset_info": dataset_info,
        "database": database,
    })))
}

fn build_prompt(form: &PlanRequest, context: &str) -> String {
    format!(
        r#"You are an expert Indian nutritionist and fitness coach. Generate a personalized diet and workout plan based on the user profile and insights from our Indian fitness dataset of 1000 real users.

{context}

{FOOD_DATABASE}

USER PROFILE:
- Name: {name}
- Age: {age} years
- Gender: {gender}
- Weight: {weight} kg
- Height: {height} cm
- Goal: {goal}
- Activity Level: {activity}
- Diet Preference: {diet}
- Medical Conditions: {medical}
- Equipment: {equipment}

Calculate BMI and daily calorie needs using Mifflin-St Jeor equation adjusted for the goal.
Use the similar user profiles above to calibrate workout duration, frequency, and calorie targets.

Generate a complete plan in this EXACT JSON format (no markdown, just JSON):
{{
  "diet": {{
    "calories": <number>,
    "protein": "<range>g",
    "carbs": "<range>g",
    "fats": "<range>g",
    "meals": [
      {{
        "time": "<time>",
        "name": "<meal name>",
        "items": ["<item1>", "<item2>", ...],
        "calories": <number>
      }}
    ]
  }},
  "workout": {{
    "daysPerWeek": <number>,
    "duration": "<duration>",
    "schedule": [
      {{
        "day": "<day>",
        "workout": "<workout type>",
        "exercises": [
          {{"name": "<exercise>", "sets": "<sets x reps>"}}
        ]
      }}
    ]
  }},
  "tips": ["<tip1>", "<tip2>", ...]
}}

IMPORTANT:
- Use ONLY Indian foods from the database above
- Include 5 meals: Breakfast, Mid-morning snack, Lunch, Evening snack, Dinner
- Create 7-day workout schedule (Mon-Sun)
- Provide 6 personalized tips based on dataset insights
- Consider any medical conditions mentioned
- Adjust portions and calories based on goal (deficit for weight loss, surplus for muscle gain)
- For vegetarian: NO eggs or meat. For eggetarian: eggs allowed but no meat.
- Use exercise types that are popular and effective according to our dataset

Return ONLY the JSON object, no other text."#,
        context = context,
        name = form.name,
        age = form.age.as_text(),
        gender = form.gender,
        weight = form.weight.as_text(),
        height = form.height.as_text(),
        goal = form.goal,
        activity = form.activity_level,
        diet = form.diet_preference,
        medical = or_fallback(&form.medical_conditions, "None"),
        equipment = or_fallback(&form.equipment, "Bodyweight"),
    )
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let meters = height_cm / 100.0;
    (weight_kg / (meters * meters) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_rounds_to_one_decimal() {
        assert_eq!(compute_bmi(62.0, 162.0), 23.6);
        assert_eq!(compute_bmi(70.0, 0.0), 0.0);
    }

    #[test]
    fn numberish_accepts_both_shapes() {
        let n: Numberish = serde_json::from_str("\"28\"").expect("string");
        assert_eq!(n.as_i64(), Some(28));
        let n: Numberish = serde_json::from_str("28.5").expect("number");
        assert_eq!(n.as_i64(), Some(28));
        let n: Numberish = serde_json::from_str("\"abc\"").expect("string");
        assert_eq!(n.as_i64(), None);
    }
}
