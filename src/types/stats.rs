use serde::{Deserialize, Serialize};

/// Min/max/average of one numeric field. Empty input yields all zeroes
/// rather than non-finite sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub age_range: NumericRange,
    pub male_pct: i64,
    pub female_pct: i64,
    /// Most frequent cities, descending by count, at most 10.
    pub top_cities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    pub weight: NumericRange,
    pub height: NumericRange,
    pub bmi: NumericRange,
    pub body_fat_male_avg: f64,
    pub body_fat_female_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTypeStats {
    pub exercise_type: String,
    pub percentage: i64,
    pub avg_calories: f64,
    pub avg_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePatterns {
    /// Descending by share of records, at most 10 entries.
    pub types: Vec<ExerciseTypeStats>,
    pub avg_duration: f64,
    pub avg_calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lifestyle {
    pub sleep: NumericRange,
    pub water: NumericRange,
    pub avg_steps: i64,
    pub avg_stress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    pub percentage: i64,
}

/// Read-only aggregate over one record set. Percentages are rounded
/// independently per category and are not forced to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub total_records: usize,
    pub demographics: Demographics,
    pub body_metrics: BodyMetrics,
    pub exercise: ExercisePatterns,
    pub lifestyle: Lifestyle,
    /// Descending by share.
    pub goals: Vec<CategoryShare>,
    /// First-encountered order, unsorted.
    pub fitness_levels: Vec<CategoryShare>,
    /// Descending by share.
    pub diet_types: Vec<CategoryShare>,
}
