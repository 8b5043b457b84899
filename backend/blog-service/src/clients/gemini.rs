// ============================================
// AI Draft Generator
// ============================================
//
// Turns a free-text topic into a post title and a two-sentence summary
// using the Gemini `generateContent` REST API with a JSON response schema.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

use super::{with_deadline, ClientError};

/// Title and summary proposed for a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDraft {
    pub title: String,
    pub summary: String,
}

#[async_trait]
pub trait DraftGenerator: Send + Sync {
    async fn generate(&self, topic: &str) -> Result<GeneratedDraft, ClientError>;

    /// Whether a call can succeed at all (credentials present).
    fn is_enabled(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// `None` disables the generator.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
            temperature: 0.8,
        }
    }
}

pub struct GeminiDraftGenerator {
    client: HttpClient,
    config: GeminiConfig,
}

impl GeminiDraftGenerator {
    pub fn new(config: GeminiConfig) -> Self {
        if config.api_key.is_none() {
            warn!("Gemini API key not configured; AI drafting is disabled");
        }
        Self {
            client: HttpClient::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(&self, topic: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: build_prompt(topic),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: serde_json::json!({
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": "The blog post title."
                        },
                        "summary": {
                            "type": "STRING",
                            "description": "A 2-sentence summary of the blog post."
                        }
                    },
                    "required": ["title", "summary"]
                }),
                temperature: self.config.temperature,
            },
        }
    }
}

fn build_prompt(topic: &str) -> String {
    format!(
        "Generate a creative and engaging blog post title and a 2-sentence summary for a \
         personal anime-style blog. The topic is \"{}\". The tone should be cheerful and friendly.",
        topic
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .map(|p| p.text.as_str())
            .find(|t| !t.trim().is_empty())
    }
}

/// Parse the model's JSON text into a draft.
pub(crate) fn parse_draft(text: &str) -> Result<GeneratedDraft, ClientError> {
    serde_json::from_str::<GeneratedDraft>(text.trim())
        .map_err(|e| ClientError::Decode(format!("model returned invalid JSON: {}", e)))
}

#[async_trait]
impl DraftGenerator for GeminiDraftGenerator {
    async fn generate(&self, topic: &str) -> Result<GeneratedDraft, ClientError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            ClientError::Unavailable(
                "AI Service is not available. Ensure API_KEY is configured.".to_string(),
            )
        })?;

        let request = self.build_request(topic);
        debug!(model = %self.config.model, "requesting AI draft");

        let result = with_deadline(self.config.timeout, async {
            let response = self
                .client
                .post(self.endpoint())
                .header("x-goog-api-key", api_key)
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let body: GenerateContentResponse = response
                .json()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()))?;
            let text = body
                .first_text()
                .ok_or_else(|| ClientError::Decode("response contained no text".to_string()))?;
            parse_draft(text)
        })
        .await;

        if let Err(e) = &result {
            error!("Error generating blog post draft: {}", e);
        }
        result
    }

    fn is_enabled(&self) -> bool {
        self.config.api_key.is_some()
    }
}
