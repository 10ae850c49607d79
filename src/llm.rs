use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::LlmError;

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 4000;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Sends the prompt to the OpenAI-compatible completions endpoint and parses
/// the model output into a JSON plan.
pub async fn generate_plan(
    http: &reqwest::Client,
    config: &Config,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<Value, LlmError> {
    let api_key = config.groq_api_key.as_deref().unwrap_or_default();

    let request = ChatRequest {
        model: &config.groq_model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_prompt,
            },
            ChatMessage {
                role: "user",
                content: user_prompt,
            },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    };

    let response = http
        .post(format!("{}/chat/completions", config.groq_base_url))
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LlmError::Status(status.as_u16(), body));
    }

    let completion: ChatResponse = response.json().await?;
    let content = completion
        .choices
        .first()
        .and_then(|c| c.message.content.as_deref())
        .filter(|c| !c.trim().is_empty())
        .ok_or(LlmError::EmptyResponse)?;

    let cleaned = strip_code_fences(content);
    serde_json::from_str(cleaned).map_err(|_| {
        tracing::error!("Failed to parse model response: {}", content);
        LlmError::InvalidPlan
    })
}

/// Models sometimes wrap the JSON in markdown code fences despite the
/// instructions; peel them off before parsing.
fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }
}
