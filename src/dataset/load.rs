use std::path::Path;

use crate::error::DatasetError;
use crate::types::profile::ProfileRecord;

/// The 26 dataset columns. Resolution is by header name first, with the
/// canonical position as fallback, so reordered exports still parse and a
/// correctly-ordered file without recognizable headers behaves as before.
const COLUMNS: [&str; 26] = [
    "id",
    "name",
    "age",
    "gender",
    "city",
    "occupation",
    "diet_type",
    "gym_membership",
    "weight_kg",
    "height_cm",
    "bmi",
    "body_fat_percentage",
    "exercise_type",
    "duration_minutes",
    "calories_burned",
    "heart_rate_avg",
    "resting_heart_rate",
    "steps_daily",
    "sleep_hours",
    "water_intake_liters",
    "workout_frequency_weekly",
    "fitness_level",
    "goal",
    "stress_level",
    "weekly_cheat_meals",
    "health_score",
];

/// Maps each known column to an index in the data rows.
struct ColumnMap {
    indices: [usize; 26],
    min_fields: usize,
}

impl ColumnMap {
    fn from_header(header: &str) -> Self {
        let names: Vec<String> = header
            .split(',')
            .map(|h| h.trim().trim_matches('"').to_lowercase().replace(' ', "_"))
            .collect();

        let mut indices = [0usize; 26];
        for (canonical_pos, column) in COLUMNS.iter().enumerate() {
            indices[canonical_pos] = names
                .iter()
                .position(|n| n == column)
                .unwrap_or(canonical_pos);
        }

        Self {
            indices,
            min_fields: names.len(),
        }
    }

    fn text<'a>(&self, fields: &'a [&str], column: usize) -> &'a str {
        fields.get(self.indices[column]).copied().unwrap_or("")
    }
}

/// Reads the dataset file and parses it. The read is the only I/O and the
/// only hard failure point; malformed rows inside the file never fail.
pub fn load_dataset(path: &Path) -> Result<Vec<ProfileRecord>, DatasetError> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| DatasetError::Io(path.display().to_string(), err))?;
    Ok(load_records(&text))
}

/// Parses delimited text into records. The first line is the header; rows
/// with fewer fields than the header are dropped without error.
pub fn load_records(text: &str) -> Vec<ProfileRecord> {
    let mut lines = text.trim().lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };

    let map = ColumnMap::from_header(header);
    let mut records = Vec::new();

    for (row, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < map.min_fields {
            continue;
        }
        records.push(parse_record(&map, &fields, row as i64 + 1));
    }

    records
}

fn parse_record(map: &ColumnMap, fields: &[&str], row: i64) -> ProfileRecord {
    let text = |column: usize| map.text(fields, column).to_string();

    ProfileRecord {
        id: int_or(map.text(fields, 0), row),
        name: text(1),
        age: int_or(map.text(fields, 2), 0),
        gender: text(3),
        city: text(4),
        occupation: text(5),
        diet_type: text(6),
        gym_membership: map.text(fields, 7) == "Yes",
        weight_kg: float_or(map.text(fields, 8)),
        height_cm: float_or(map.text(fields, 9)),
        bmi: float_or(map.text(fields, 10)),
        body_fat_percentage: float_or(map.text(fields, 11)),
        exercise_type: text(12),
        duration_minutes: int_or(map.text(fields, 13), 0),
        calories_burned: int_or(map.text(fields, 14), 0),
        heart_rate_avg: int_or(map.text(fields, 15), 0),
        resting_heart_rate: int_or(map.text(fields, 16), 0),
        steps_daily: int_or(map.text(fields, 17), 0),
        sleep_hours: float_or(map.text(fields, 18)),
        water_intake_liters: float_or(map.text(fields, 19)),
        workout_frequency_weekly: int_or(map.text(fields, 20), 0),
        fitness_level: text(21),
        goal: text(22),
        stress_level: int_or(map.text(fields, 23), 0),
        weekly_cheat_meals: int_or(map.text(fields, 24), 0),
        health_score: int_or(map.text(fields, 25), 0),
    }
}

/// Lossy integer coercion: unparseable text yields the default, fractional
/// values truncate toward zero.
fn int_or(text: &str, default: i64) -> i64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => default,
    }
}

/// Lossy float coercion: unparseable or non-finite text yields 0.
fn float_or(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_defaults() {
        assert_eq!(int_or("30", 0), 30);
        assert_eq!(int_or("7.9", 0), 7);
        assert_eq!(int_or("abc", 4), 4);
        assert_eq!(int_or("", 4), 4);
        assert_eq!(float_or("72.5"), 72.5);
        assert_eq!(float_or("NaN"), 0.0);
        assert_eq!(float_or("oops"), 0.0);
    }

    #[test]
    fn short_rows_are_dropped() {
        let text = "id,name,age,gender\n1,Asha,30,F\n2,too-short\n3,Ravi,41,M";
        let records = load_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Asha");
        assert_eq!(records[1].name, "Ravi");
    }

    #[test]
    fn minimal_header_parses_one_record() {
        let text = "id,name,age,gender\n1,Asha,30,F";
        let records = load_records(text);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, 1);
        assert_eq!(r.name, "Asha");
        assert_eq!(r.age, 30);
        assert_eq!(r.gender, "F");
        assert_eq!(r.weight_kg, 0.0);
        assert_eq!(r.city, "");
        assert!(!r.gym_membership);
    }

    #[test]
    fn id_falls_back_to_row_number() {
        let text = "id,name,age,gender\nx,Asha,30,F\ny,Ravi,41,M";
        let records = load_records(text);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].id, 2);
    }

    #[test]
    fn gym_membership_is_exact_match() {
        let header = "id,name,age,gender,city,occupation,diet_type,gym_membership";
        let records = load_records(&format!(
            "{header}\n1,A,30,F,Pune,Engineer,Vegetarian,Yes\n2,B,31,M,Pune,Doctor,Vegan,yes\n3,C,32,M,Pune,Doctor,Vegan,No"
        ));
        assert!(records[0].gym_membership);
        assert!(!records[1].gym_membership);
        assert!(!records[2].gym_membership);
    }

    #[test]
    fn reordered_columns_resolve_by_name() {
        let text = "age,id,gender,name\n30,1,F,Asha";
        let records = load_records(text);
        assert_eq!(records[0].age, 30);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].name, "Asha");
        assert_eq!(records[0].gender, "F");
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(load_records("").is_empty());
        assert!(load_records("id,name,age,gender").is_empty());
    }
}
