use crate::types::profile::ProfileRecord;
use crate::types::stats::{
    BodyMetrics, CategoryShare, Demographics, ExercisePatterns, ExerciseTypeStats, Lifestyle,
    NumericRange, StatisticsSnapshot,
};

/// Computes the full snapshot over one record set. Pure and deterministic in
/// input order; zero records yield a zeroed snapshot rather than an error.
pub fn compute_statistics(records: &[ProfileRecord]) -> StatisticsSnapshot {
    let total = records.len();

    let ages: Vec<f64> = records.iter().map(|r| r.age as f64).collect();
    let males = records.iter().filter(|r| r.gender == "M").count();
    let females = records.iter().filter(|r| r.gender == "F").count();

    let mut city_counts = count_by(records, |r| &r.city);
    sort_descending(&mut city_counts);
    let top_cities = city_counts
        .into_iter()
        .take(10)
        .map(|(city, _)| city)
        .collect();

    let weights: Vec<f64> = records.iter().map(|r| r.weight_kg).collect();
    let heights: Vec<f64> = records.iter().map(|r| r.height_cm).collect();
    let bmis: Vec<f64> = records.iter().map(|r| r.bmi).collect();
    let male_body_fat: Vec<f64> = records
        .iter()
        .filter(|r| r.gender == "M")
        .map(|r| r.body_fat_percentage)
        .collect();
    let female_body_fat: Vec<f64> = records
        .iter()
        .filter(|r| r.gender == "F")
        .map(|r| r.body_fat_percentage)
        .collect();

    let mut exercise_counts = count_by(records, |r| &r.exercise_type);
    sort_descending(&mut exercise_counts);
    let exercise_types = exercise_counts
        .into_iter()
        .take(10)
        .map(|(exercise_type, count)| {
            let matching: Vec<&ProfileRecord> = records
                .iter()
                .filter(|r| r.exercise_type == exercise_type)
                .collect();
            ExerciseTypeStats {
                exercise_type,
                percentage: percentage(count, total),
                avg_calories: avg(matching.iter().map(|r| r.calories_burned as f64)),
                avg_duration: avg(matching.iter().map(|r| r.duration_minutes as f64)),
            }
        })
        .collect();

    let mut goal_counts = count_by(records, |r| &r.goal);
    sort_descending(&mut goal_counts);
    let level_counts = count_by(records, |r| &r.fitness_level);
    let mut diet_counts = count_by(records, |r| &r.diet_type);
    sort_descending(&mut diet_counts);

    let sleep: Vec<f64> = records.iter().map(|r| r.sleep_hours).collect();
    let water: Vec<f64> = records.iter().map(|r| r.water_intake_liters).collect();
    let steps = avg(records.iter().map(|r| r.steps_daily as f64));

    StatisticsSnapshot {
        total_records: total,
        demographics: Demographics {
            age_range: range(&ages),
            male_pct: percentage(males, total),
            female_pct: percentage(females, total),
            top_cities,
        },
        body_metrics: BodyMetrics {
            weight: range(&weights),
            height: range(&heights),
            bmi: range(&bmis),
            body_fat_male_avg: avg(male_body_fat.iter().copied()),
            body_fat_female_avg: avg(female_body_fat.iter().copied()),
        },
        exercise: ExercisePatterns {
            types: exercise_types,
            avg_duration: avg(records.iter().map(|r| r.duration_minutes as f64)),
            avg_calories: avg(records.iter().map(|r| r.calories_burned as f64)),
        },
        lifestyle: Lifestyle {
            sleep: range(&sleep),
            water: range(&water),
            avg_steps: steps.round() as i64,
            avg_stress: avg(records.iter().map(|r| r.stress_level as f64)),
        },
        goals: shares(goal_counts, total),
        fitness_levels: shares(level_counts, total),
        diet_types: shares(diet_counts, total),
    }
}

/// Average rounded to one decimal place, half-up. Empty input yields 0.
pub(crate) fn avg(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        return 0.0;
    }
    (sum / count as f64 * 10.0).round() / 10.0
}

/// Whole-number percentage, half-up. A zero total yields 0.
fn percentage(count: usize, total: usize) -> i64 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as i64
}

/// Min/max/avg over a slice. Empty input yields the 0 sentinel on all three
/// fields, never NaN or infinity.
fn range(values: &[f64]) -> NumericRange {
    if values.is_empty() {
        return NumericRange {
            min: 0.0,
            max: 0.0,
            avg: 0.0,
        };
    }
    NumericRange {
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        avg: avg(values.iter().copied()),
    }
}

/// Occurrence counts grouped by exact string equality, in first-encountered
/// order.
fn count_by<'a>(
    records: &'a [ProfileRecord],
    key: impl Fn(&'a ProfileRecord) -> &'a str,
) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        let value = key(record);
        match counts.iter_mut().find(|(name, _)| name == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts
}

/// Stable descending sort by count; ties keep first-encountered order.
fn sort_descending(counts: &mut [(String, usize)]) {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
}

fn shares(counts: Vec<(String, usize)>, total: usize) -> Vec<CategoryShare> {
    counts
        .into_iter()
        .map(|(name, count)| CategoryShare {
            name,
            percentage: percentage(count, total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load::load_records;

    fn record(age: i64, gender: &str, city: &str) -> ProfileRecord {
        let mut r = blank();
        r.age = age;
        r.gender = gender.to_string();
        r.city = city.to_string();
        r
    }

    fn blank() -> ProfileRecord {
        load_records("id\n1").remove(0)
    }

    #[test]
    fn age_range_over_three_records() {
        let records = vec![
            record(20, "M", "Pune"),
            record(30, "F", "Delhi"),
            record(40, "M", "Pune"),
        ];
        let stats = compute_statistics(&records);
        assert_eq!(stats.demographics.age_range.min, 20.0);
        assert_eq!(stats.demographics.age_range.max, 40.0);
        assert_eq!(stats.demographics.age_range.avg, 30.0);
    }

    #[test]
    fn gender_percentages_round_independently() {
        let records = vec![
            record(25, "M", "Pune"),
            record(25, "M", "Pune"),
            record(25, "F", "Pune"),
        ];
        let stats = compute_statistics(&records);
        assert_eq!(stats.demographics.male_pct, 67);
        assert_eq!(stats.demographics.female_pct, 33);
    }

    #[test]
    fn empty_input_yields_zeroed_snapshot() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.demographics.age_range.min, 0.0);
        assert_eq!(stats.demographics.age_range.max, 0.0);
        assert_eq!(stats.demographics.male_pct, 0);
        assert_eq!(stats.body_metrics.body_fat_male_avg, 0.0);
        assert_eq!(stats.lifestyle.avg_steps, 0);
        assert!(stats.goals.is_empty());
        assert!(stats.exercise.types.is_empty());
    }

    #[test]
    fn city_ties_keep_input_order() {
        let records = vec![
            record(25, "M", "Pune"),
            record(25, "M", "Delhi"),
            record(25, "M", "Delhi"),
            record(25, "M", "Jaipur"),
        ];
        let stats = compute_statistics(&records);
        assert_eq!(stats.demographics.top_cities, vec!["Delhi", "Pune", "Jaipur"]);
    }

    #[test]
    fn category_grouping_is_case_sensitive() {
        let mut a = blank();
        a.diet_type = "Vegan".to_string();
        let mut b = blank();
        b.diet_type = "vegan".to_string();
        let stats = compute_statistics(&[a, b]);
        assert_eq!(stats.diet_types.len(), 2);
    }

    #[test]
    fn per_exercise_averages_cover_matching_subset_only() {
        let mut yoga = blank();
        yoga.exercise_type = "Yoga".to_string();
        yoga.calories_burned = 200;
        yoga.duration_minutes = 60;
        let mut gym = blank();
        gym.exercise_type = "Gym".to_string();
        gym.calories_burned = 500;
        gym.duration_minutes = 45;
        let mut gym2 = blank();
        gym2.exercise_type = "Gym".to_string();
        gym2.calories_burned = 400;
        gym2.duration_minutes = 55;

        let stats = compute_statistics(&[yoga, gym, gym2]);
        let top = &stats.exercise.types[0];
        assert_eq!(top.exercise_type, "Gym");
        assert_eq!(top.percentage, 67);
        assert_eq!(top.avg_calories, 450.0);
        assert_eq!(top.avg_duration, 50.0);
    }

    #[test]
    fn percentages_stay_in_bounds() {
        let records: Vec<ProfileRecord> = (0..7)
            .map(|i| record(20 + i, if i % 2 == 0 { "M" } else { "F" }, "Pune"))
            .collect();
        let stats = compute_statistics(&records);
        for share in stats
            .goals
            .iter()
            .chain(&stats.fitness_levels)
            .chain(&stats.diet_types)
        {
            assert!((0..=100).contains(&share.percentage));
        }
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = vec![
            record(20, "M", "Pune"),
            record(30, "F", "Delhi"),
            record(40, "M", "Pune"),
        ];
        assert_eq!(compute_statistics(&records), compute_statistics(&records));
    }

    #[test]
    fn average_rounds_half_up() {
        assert_eq!(avg([0.25, 0.0].into_iter()), 0.1);
        assert_eq!(avg([1.0, 2.0].into_iter()), 1.5);
        assert_eq!(avg(std::iter::empty()), 0.0);
    }
}
