use std::fmt::Write;

use crate::dataset::{rank, stats};
use crate::types::profile::{ProfileRecord, QueryProfile};

/// Renders the statistics snapshot and the closest matches into the text
/// block that seeds the plan-generation prompt.
pub fn generate_context(records: &[ProfileRecord], query: &QueryProfile, limit: usize) -> String {
    let snapshot = stats::compute_statistics(records);
    let matches = rank::find_similar(records, query, limit);

    let mut out = String::new();

    let _ = writeln!(
        out,
        "INDIAN FITNESS DATASET ANALYSIS ({} real profiles):\n",
        snapshot.total_records
    );

    let demo = &snapshot.demographics;
    let _ = writeln!(out, "DEMOGRAPHICS:");
    let _ = writeln!(
        out,
        "- Age: {}-{} years (avg: {})",
        demo.age_range.min, demo.age_range.max, demo.age_range.avg
    );
    let _ = writeln!(
        out,
        "- Gender: Male {}%, Female {}%",
        demo.male_pct, demo.female_pct
    );
    let top_cities: Vec<&str> = demo.top_cities.iter().take(8).map(String::as_str).collect();
    let _ = writeln!(out, "- Top Cities: {}\n", top_cities.join(", "));

    let body = &snapshot.body_metrics;
    let _ = writeln!(out, "BODY METRICS (from dataset):");
    let _ = writeln!(
        out,
        "- Weight range: {}-{} kg (avg: {})",
        body.weight.min, body.weight.max, body.weight.avg
    );
    let _ = writeln!(
        out,
        "- Height range: {}-{} cm (avg: {})",
        body.height.min, body.height.max, body.height.avg
    );
    let _ = writeln!(
        out,
        "- BMI range: {}-{} (avg: {})",
        body.bmi.min, body.bmi.max, body.bmi.avg
    );
    let _ = writeln!(
        out,
        "- Body Fat: Male avg {}%, Female avg {}%\n",
        body.body_fat_male_avg, body.body_fat_female_avg
    );

    let _ = writeln!(out, "POPULAR EXERCISES (by effectiveness):");
    for e in snapshot.exercise.types.iter().take(8) {
        let _ = writeln!(
            out,
            "- {}: {}% of users, burns {} cal in {} mins",
            e.exercise_type, e.percentage, e.avg_calories, e.avg_duration
        );
    }

    let life = &snapshot.lifestyle;
    let _ = writeln!(out, "\nLIFESTYLE PATTERNS:");
    let _ = writeln!(out, "- Average sleep: {} hours", life.sleep.avg);
    let _ = writeln!(
        out,
        "- Average water intake: {}L (Indian climate needs 3-3.5L)",
        life.water.avg
    );
    let _ = writeln!(out, "- Average daily steps: {}", life.avg_steps);
    let _ = writeln!(out, "- Average stress level: {}/10\n", life.avg_stress);

    let _ = writeln!(out, "FITNESS GOALS IN INDIA:");
    for g in &snapshot.goals {
        let _ = writeln!(out, "- {}: {}%", g.name, g.percentage);
    }

    let _ = writeln!(out, "\nDIET PREFERENCES:");
    for d in &snapshot.diet_types {
        let _ = writeln!(out, "- {}: {}%", d.name, d.percentage);
    }

    let _ = writeln!(
        out,
        "\nSIMILAR USER PROFILES (matched by age, gender, goal, diet):"
    );
    for p in &matches {
        let _ = writeln!(
            out,
            "- {}, {}{}, {}: {}kg, BMI {}, does {} {}min/{}x week, burns {}cal, Goal: {}, Health Score: {}",
            p.name,
            p.age,
            p.gender,
            p.city,
            p.weight_kg,
            p.bmi,
            p.exercise_type,
            p.duration_minutes,
            p.workout_frequency_weekly,
            p.calories_burned,
            p.goal,
            p.health_score
        );
    }

    let _ = writeln!(out, "\nBased on similar profiles, recommended:");
    let _ = writeln!(
        out,
        "- Workout duration: {} mins",
        mean(matches.iter().map(|p| p.duration_minutes as f64)).round()
    );
    let _ = writeln!(
        out,
        "- Workout frequency: {} days/week",
        mean(matches.iter().map(|p| p.workout_frequency_weekly as f64)).round()
    );
    let _ = writeln!(
        out,
        "- Target calories to burn: {} cal/session",
        mean(matches.iter().map(|p| p.calories_burned as f64)).round()
    );

    out
}

/// Unrounded mean; rounding happens at render time only.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load::load_records;

    #[test]
    fn context_includes_all_sections() {
        let header = "id,name,age,gender,city,occupation,diet_type,gym_membership,weight_kg,height_cm,bmi,body_fat_percentage,exercise_type,duration_minutes,calories_burned,heart_rate_avg,resting_heart_rate,steps_daily,sleep_hours,water_intake_liters,workout_frequency_weekly,fitness_level,goal,stress_level,weekly_cheat_meals,health_score";
        let row = "1,Asha,30,F,Pune,Engineer,Vegetarian,Yes,62,162,23.6,24.5,Yoga,45,220,110,68,8000,7.5,2.8,4,Intermediate,Fat Loss,4,2,78";
        let records = load_records(&format!("{header}\n{row}"));
        let query = QueryProfile {
            age: 28,
            gender: "F".to_string(),
            goal: "weight-loss".to_string(),
            diet_preference: "vegetarian".to_string(),
        };

        let context = generate_context(&records, &query, 5);
        assert!(context.contains("1 real profiles"));
        assert!(context.contains("DEMOGRAPHICS:"));
        assert!(context.contains("Asha, 30F, Pune"));
        assert!(context.contains("- Workout duration: 45 mins"));
        assert!(context.contains("- Fat Loss: 100%"));
    }

    #[test]
    fn empty_dataset_renders_without_panicking() {
        let query = QueryProfile {
            age: 28,
            gender: "F".to_string(),
            goal: "weight-loss".to_string(),
            diet_preference: "vegetarian".to_string(),
        };
        let context = generate_context(&[], &query, 5);
        assert!(context.contains("0 real profiles"));
        assert!(context.contains("- Workout duration: 0 mins"));
    }
}
