use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{GeneratedProblem, ProblemAi};
use crate::error::AiError;
use tutor_core::model::RawAnswer;

const PROBLEM_PROMPT: &str = r#"You are an assistant that returns a single Primary 5 level math word problem as JSON.
Return ONLY valid JSON with these fields:
{
  "problem_text": "A bakery sold 45 cupcakes...",
  "final_answer": 15
}
Do not add any explanations, code blocks, or commentary."#;

fn feedback_prompt(problem_text: &str, correct_answer: f64, submitted: &RawAnswer) -> String {
    format!(
        "You are a friendly primary-school tutor. \
         A student solved this problem: \"{problem_text}\". \
         The correct answer is {correct_answer}. \
         The student submitted: \"{submitted}\". \
         Write a short personalized feedback message (2-4 sentences) that: \
         1) praises their effort, \
         2) says whether the answer is correct, \
         3) gives one concise tip or next step. Return plain text only."
    )
}

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GeminiConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("TUTOR_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("TUTOR_AI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());
        let model = env::var("TUTOR_AI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// HTTP adapter for a Gemini-style `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: Option<GeminiConfig>,
}

impl GeminiClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GeminiConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// A client without credentials is kept around and fails per request
    /// with `AiError::NotConfigured`, never at startup.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    async fn call(&self, prompt: &str, json_output: bool) -> Result<Value, AiError> {
        let config = self.config.as_ref().ok_or(AiError::NotConfigured)?;

        let url = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        let payload = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: json_output.then(|| GenerationConfig {
                response_mime_type: "application/json",
            }),
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", config.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AiError::HttpStatus(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ProblemAi for GeminiClient {
    async fn generate_problem(&self) -> Result<GeneratedProblem, AiError> {
        let body = self.call(PROBLEM_PROMPT, true).await?;
        parse_problem_body(&body)
    }

    async fn generate_feedback(
        &self,
        problem_text: &str,
        correct_answer: f64,
        submitted: &RawAnswer,
    ) -> Result<String, AiError> {
        let prompt = feedback_prompt(problem_text, correct_answer, submitted);
        let body = self.call(&prompt, false).await?;
        Ok(candidate_text(&body).unwrap_or_default().trim().to_string())
    }
}

/// Extracts a problem from either response shape the endpoint produces:
/// the JSON object directly at the top level (when the JSON mime type is
/// honored) or a JSON-encoded string inside the candidate parts.
fn parse_problem_body(body: &Value) -> Result<GeneratedProblem, AiError> {
    if body.get("problem_text").is_some() {
        return problem_from_value(body.clone());
    }

    let text = candidate_text(body).ok_or(AiError::NoOutput)?;
    let parsed: Value = serde_json::from_str(text).map_err(|_| AiError::InvalidJson)?;
    problem_from_value(parsed)
}

fn problem_from_value(value: Value) -> Result<GeneratedProblem, AiError> {
    let problem: GeneratedProblem =
        serde_json::from_value(value).map_err(|_| AiError::MissingFields)?;
    if problem.problem_text.trim().is_empty() || !problem.final_answer.is_finite() {
        return Err(AiError::MissingFields);
    }
    Ok(problem)
}

fn candidate_text(body: &Value) -> Option<&str> {
    body.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wrapped(text: &str) -> Value {
        json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        })
    }

    #[test]
    fn parses_top_level_problem_object() {
        let body = json!({ "problem_text": "3 x 5 = ?", "final_answer": 15 });
        let problem = parse_problem_body(&body).unwrap();
        assert_eq!(problem.problem_text, "3 x 5 = ?");
        assert_eq!(problem.final_answer, 15.0);
    }

    #[test]
    fn parses_problem_embedded_as_candidate_text() {
        let body = wrapped(r#"{ "problem_text": "3 x 5 = ?", "final_answer": 15 }"#);
        let problem = parse_problem_body(&body).unwrap();
        assert_eq!(problem.final_answer, 15.0);
    }

    #[test]
    fn missing_output_is_no_output() {
        let err = parse_problem_body(&json!({ "candidates": [] })).unwrap_err();
        assert!(matches!(err, AiError::NoOutput));
    }

    #[test]
    fn unparseable_candidate_text_is_invalid_json() {
        let err = parse_problem_body(&wrapped("here is your problem: 3 x 5")).unwrap_err();
        assert!(matches!(err, AiError::InvalidJson));
    }

    #[test]
    fn wrong_field_type_is_missing_fields() {
        let body = wrapped(r#"{ "problem_text": "3 x 5 = ?", "final_answer": "15" }"#);
        let err = parse_problem_body(&body).unwrap_err();
        assert!(matches!(err, AiError::MissingFields));
    }

    #[test]
    fn blank_problem_text_is_missing_fields() {
        let body = json!({ "problem_text": "  ", "final_answer": 15 });
        let err = parse_problem_body(&body).unwrap_err();
        assert!(matches!(err, AiError::MissingFields));
    }

    #[test]
    fn candidate_text_reads_the_first_part() {
        let body = wrapped("Great effort!");
        assert_eq!(candidate_text(&body), Some("Great effort!"));
        assert_eq!(candidate_text(&json!({})), None);
    }

    #[test]
    fn feedback_prompt_embeds_the_raw_submission() {
        let prompt = feedback_prompt("3 x 5 = ?", 15.0, &RawAnswer::from("15.0"));
        assert!(prompt.contains("\"3 x 5 = ?\""));
        assert!(prompt.contains("The correct answer is 15."));
        assert!(prompt.contains("The student submitted: \"15.0\"."));
    }

    #[test]
    fn client_without_credentials_is_disabled() {
        let client = GeminiClient::new(None);
        assert!(!client.enabled());
    }
}
