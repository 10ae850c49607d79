use serde::{Deserialize, Serialize};

/// One historical fitness profile, parsed from a dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: i64,
    pub name: String,
    pub age: i64,
    /// Single-letter code as it appears in the dataset ("M", "F", ...).
    pub gender: String,
    pub city: String,
    pub occupation: String,
    pub diet_type: String,
    pub gym_membership: bool,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub bmi: f64,
    pub body_fat_percentage: f64,
    pub exercise_type: String,
    pub duration_minutes: i64,
    pub calories_burned: i64,
    pub heart_rate_avg: i64,
    pub resting_heart_rate: i64,
    pub steps_daily: i64,
    pub sleep_hours: f64,
    pub water_intake_liters: f64,
    pub workout_frequency_weekly: i64,
    pub fitness_level: String,
    pub goal: String,
    pub stress_level: i64,
    pub weekly_cheat_meals: i64,
    pub health_score: i64,
}

/// Attributes of a new user, used only to score the ranker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryProfile {
    pub age: i64,
    pub gender: String,
    pub goal: String,
    pub diet_preference: String,
}
