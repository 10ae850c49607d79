#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use fitplan_rs::{config::Config, state::AppState};

pub const SAMPLE_HEADER: &str = "id,name,age,gender,city,occupation,diet_type,gym_membership,weight_kg,height_cm,bmi,body_fat_percentage,exercise_type,duration_minutes,calories_burned,heart_rate_avg,resting_heart_rate,steps_daily,sleep_hours,water_intake_liters,workout_frequency_weekly,fitness_level,goal,stress_level,weekly_cheat_meals,health_score";

pub fn sample_csv() -> String {
    format!(
        "{SAMPLE_HEADER}\n\
         1,Asha,30,F,Pune,Engineer,Vegetarian,Yes,62,162,23.6,24.5,Yoga,45,220,110,68,8000,7.5,2.8,4,Intermediate,Fat Loss,4,2,78\n\
         2,Ravi,41,M,Delhi,Doctor,Non-Vegetarian,No,81,175,26.4,21.0,Gym,60,480,132,72,6500,6.5,3.2,5,Advanced,Muscle Gain,6,3,71\n\
         3,Meera,27,F,Delhi,Designer,Vegan,Yes,55,158,22.0,23.1,Running,40,380,140,66,10200,8.0,2.5,3,Beginner,General Fitness,3,1,82"
    )
}

/// Writes the sample dataset to a unique temp file and returns an AppState
/// pointing at it, with no external services configured.
pub fn test_state(tag: &str) -> AppState {
    let path = write_dataset(tag, &sample_csv());
    AppState::new(test_config(path))
}

pub fn write_dataset(tag: &str, contents: &str) -> PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static NEXT: AtomicUsize = AtomicUsize::new(0);

    let path = std::env::temp_dir().join(format!(
        "fitplan-test-{}-{}-{}.csv",
        tag,
        std::process::id(),
        NEXT.fetch_add(1, Ordering::Relaxed)
    ));
    let mut file = std::fs::File::create(&path).expect("create dataset file");
    file.write_all(contents.as_bytes()).expect("write dataset");
    path
}

pub fn test_config(dataset_path: PathBuf) -> Config {
    Config {
        port: 0,
        dataset_path,
        max_body_size: 256 * 1024,
        llm_timeout: Duration::from_secs(5),
        groq_api_key: None,
        groq_base_url: "http://127.0.0.1:9".to_string(),
        groq_model: "test-model".to_string(),
        supabase_url: None,
        supabase_key: None,
    }
}
