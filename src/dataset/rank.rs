use crate::types::profile::{ProfileRecord, QueryProfile};

/// Query goal values mapped to the dataset goal categories they match.
const GOAL_MAP: [(&str, &[&str]); 3] = [
    ("weight-loss", &["Fat Loss", "General Fitness"]),
    ("muscle-gain", &["Muscle Gain"]),
    ("maintenance", &["General Fitness", "Endurance"]),
];

/// Query diet preferences mapped to the dataset diet categories they match.
const DIET_MAP: [(&str, &[&str]); 3] = [
    ("vegetarian", &["Vegetarian", "Vegan"]),
    ("non-vegetarian", &["Non-Vegetarian"]),
    ("eggetarian", &["Non-Vegetarian", "Vegetarian"]),
];

/// Additive similarity score, 0..=10. Raw integers, no normalization.
pub fn score(record: &ProfileRecord, query: &QueryProfile) -> u8 {
    let mut score = 0u8;

    // abs_diff: the lossy loader can produce ages at the i64 extremes, so
    // plain subtraction could overflow.
    let age_gap = record.age.abs_diff(query.age);
    if age_gap <= 5 {
        score += 3;
    } else if age_gap <= 10 {
        score += 1;
    }

    // The record carries a single-letter code; compare it with the first
    // character of the query gender, case-insensitively.
    let query_initial = query.gender.chars().next().map(|c| c.to_ascii_lowercase());
    if record.gender.to_lowercase() == query_initial.map(String::from).unwrap_or_default() {
        score += 2;
    }

    if categories_for(&GOAL_MAP, &query.goal).contains(&record.goal.as_str()) {
        score += 3;
    }

    if categories_for(&DIET_MAP, &query.diet_preference).contains(&record.diet_type.as_str()) {
        score += 2;
    }

    score
}

fn categories_for<'a>(map: &'a [(&str, &[&'a str])], key: &str) -> &'a [&'a str] {
    map.iter()
        .find(|(name, _)| *name == key)
        .map(|(_, categories)| *categories)
        .unwrap_or(&[])
}

/// Scores every record against the query and returns the `limit` best,
/// descending by score. Ties keep original input order; a limit beyond the
/// record count returns everything.
pub fn find_similar(
    records: &[ProfileRecord],
    query: &QueryProfile,
    limit: usize,
) -> Vec<ProfileRecord> {
    let mut scored: Vec<(&ProfileRecord, u8)> =
        records.iter().map(|r| (r, score(r, query))).collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(limit)
        .map(|(record, _)| record.clone())
        .collect()
}
