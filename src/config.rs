use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub dataset_path: PathBuf,
    pub max_body_size: usize,
    pub llm_timeout: Duration,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let dataset_path = std::env::var("DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("dataset/fitness_profiles.csv"));

        let max_body_size_kb = std::env::var("MAX_BODY_SIZE_KB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256);

        let llm_timeout_seconds = std::env::var("LLM_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        let groq_base_url = std::env::var("GROQ_BASE_URL")
            .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string());

        let groq_model = std::env::var("GROQ_MODEL")
            .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string());

        Self {
            port,
            dataset_path,
            max_body_size: max_body_size_kb * 1024,
            llm_timeout: Duration::from_secs(llm_timeout_seconds),
            groq_api_key: std::env::var("GROQ_API_KEY").ok().filter(|s| !s.is_empty()),
            groq_base_url,
            groq_model,
            supabase_url: std::env::var("SUPABASE_URL").ok().filter(|s| !s.is_empty()),
            supabase_key: std::env::var("SUPABASE_ANON_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }
}
