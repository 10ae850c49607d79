use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::StoreError;

const USERS_TABLE: &str = "plan_users";
const FEEDBACK_TABLE: &str = "feedback";

/// New user row written after a plan is generated.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlanUser {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub weight: f64,
    pub height: f64,
    pub bmi: f64,
    pub goal: String,
    pub activity_level: String,
    pub diet_preference: String,
    pub medical_conditions: String,
    pub equipment: String,
    pub plan_calories: i64,
    pub plan_workout_days: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFeedback {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age_group: Option<String>,
    pub city: Option<String>,
    pub occupation: Option<String>,
    pub current_fitness_level: Option<String>,
    pub fitness_goals: Option<Vec<String>>,
    pub diet_type: Option<String>,
    pub how_did_you_hear: Option<String>,
    pub rating: Option<i64>,
    pub liked_features: Option<String>,
    pub improvements: Option<String>,
    pub would_recommend: Option<bool>,
    pub consent_to_research: bool,
    pub consent_to_contact: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoredUser {
    pub name: String,
    #[serde(default)]
    pub age: i64,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub bmi: f64,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub diet_preference: String,
    #[serde(default)]
    pub plan_calories: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenderSplit {
    pub male: usize,
    pub female: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserAggregates {
    pub average_age: f64,
    pub average_bmi: f64,
    pub average_calories: f64,
    pub goal_distribution: Vec<CategoryCount>,
    pub diet_distribution: Vec<CategoryCount>,
    pub gender_split: GenderSplit,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentUser {
    pub name: String,
    pub goal: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Submission statistics read back from the store.
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub total_users: u64,
    pub last_user: Option<DateTime<Utc>>,
    pub stats: Option<UserAggregates>,
    pub recent_users: Vec<RecentUser>,
}

/// Thin PostgREST client over the hosted store. Constructed per request from
/// shared state; owns no connection.
pub struct Store<'a> {
    http: &'a reqwest::Client,
    base_url: &'a str,
    api_key: &'a str,
}

impl<'a> Store<'a> {
    pub fn from_config(config: &'a Config, http: &'a reqwest::Client) -> Option<Self> {
        let base_url = config.supabase_url.as_deref()?;
        let api_key = config.supabase_key.as_deref()?;
        Some(Self {
            http,
            base_url,
            api_key,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    async fn insert(&self, table: &str, row: &impl Serialize) -> Result<Option<String>, StoreError> {
        let response = self
            .http
            .post(self.table_url(table))
            .header("apikey", self.api_key)
            .bearer_auth(self.api_key)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status(status.as_u16(), body));
        }

        let rows: Vec<Value> = response.json().await?;
        Ok(rows
            .first()
            .and_then(|r| r.get("id"))
            .map(|id| id.to_string().trim_matches('"').to_string()))
    }

    pub async fn insert_user(&self, user: &NewPlanUser) -> Result<Option<String>, StoreError> {
        self.insert(USERS_TABLE, user).await
    }

    pub async fn insert_feedback(
        &self,
        feedback: &NewFeedback,
    ) -> Result<Option<String>, StoreError> {
        self.insert(FEEDBACK_TABLE, feedback).await
    }

    /// Exact row count via the `content-range` header, without fetching rows.
    async fn count(&self, table: &str) -> Result<u64, StoreError> {
        let response = self
            .http
            .get(self.table_url(table))
            .query(&[("select", "id"), ("limit", "1")])
            .header("apikey", self.api_key)
            .bearer_auth(self.api_key)
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status(status.as_u16(), body));
        }

        let range = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| StoreError::Malformed("missing content-range".to_string()))?;

        parse_content_range(range)
            .ok_or_else(|| StoreError::Malformed(format!("bad content-range: {range}")))
    }

    pub async fn feedback_count(&self) -> Result<u64, StoreError> {
        self.count(FEEDBACK_TABLE).await
    }

    pub async fn user_count(&self) -> Result<u64, StoreError> {
        self.count(USERS_TABLE).await
    }

    /// Fetches all submitted users (newest first) and aggregates them the
    /// same way the dataset statistics are built. An empty table degrades to
    /// a count-only result.
    pub async fn user_stats(&self) -> Result<UserStats, StoreError> {
        let total_users = self.count(USERS_TABLE).await.unwrap_or(0);

        let response = self
            .http
            .get(self.table_url(USERS_TABLE))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .header("apikey", self.api_key)
            .bearer_auth(self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status(status.as_u16(), body));
        }

        let users: Vec<StoredUser> = response.json().await?;
        if users.is_empty() {
            return Ok(UserStats {
                total_users,
                last_user: None,
                stats: None,
                recent_users: Vec::new(),
            });
        }

        Ok(UserStats {
            total_users: total_users.max(users.len() as u64),
            last_user: users.first().and_then(|u| u.created_at),
            stats: Some(aggregate(&users)),
            recent_users: users
                .iter()
                .take(5)
                .map(|u| RecentUser {
                    name: u.name.clone(),
                    goal: u.goal.clone(),
                    created_at: u.created_at,
                })
                .collect(),
        })
    }
}

fn aggregate(users: &[StoredUser]) -> UserAggregates {
    UserAggregates {
        average_age: round1(mean(users.iter().map(|u| u.age as f64))),
        average_bmi: round1(mean(users.iter().map(|u| u.bmi))),
        average_calories: round1(mean(users.iter().map(|u| u.plan_calories as f64))),
        goal_distribution: distribution(users, |u| &u.goal),
        diet_distribution: distribution(users, |u| &u.diet_preference),
        gender_split: GenderSplit {
            male: users
                .iter()
                .filter(|u| u.gender.to_lowercase().starts_with('m'))
                .count(),
            female: users
                .iter()
                .filter(|u| u.gender.to_lowercase().starts_with('f'))
                .count(),
        },
    }
}

fn distribution<'a>(
    users: &'a [StoredUser],
    key: impl Fn(&'a StoredUser) -> &'a str,
) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for user in users {
        let value = key(user);
        match counts.iter_mut().find(|c| c.name == value) {
            Some(c) => c.count += 1,
            None => counts.push(CategoryCount {
                name: value.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn parse_content_range(range: &str) -> Option<u64> {
    range.rsplit('/').next()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_range_total_parses() {
        assert_eq!(parse_content_range("0-0/123"), Some(123));
        assert_eq!(parse_content_range("*/0"), Some(0));
        assert_eq!(parse_content_range("garbage"), None);
    }

    #[test]
    fn distribution_counts_in_first_seen_order() {
        let user = |goal: &str| StoredUser {
            name: String::new(),
            age: 0,
            gender: String::new(),
            bmi: 0.0,
            goal: goal.to_string(),
            diet_preference: String::new(),
            plan_calories: 0,
            created_at: None,
        };
        let users = vec![user("maintenance"), user("weight-loss"), user("weight-loss")];
        let dist = distribution(&users, |u| &u.goal);
        assert_eq!(dist[0].name, "maintenance");
        assert_eq!(dist[1].name, "weight-loss");
        assert_eq!(dist[1].count, 2);
    }
}
