use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

#[derive(Clone)]
pub struct GenaiClientConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub max_error_body_bytes: usize,
}

impl GenaiClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            max_error_body_bytes: DEFAULT_MAX_ERROR_BODY_BYTES,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

// The API key never appears in logs.
impl std::fmt::Debug for GenaiClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiClientConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("max_error_body_bytes", &self.max_error_body_bytes)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenaiClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned error: status={status} message={message}")]
    Upstream { status: StatusCode, message: String },

    #[error("upstream returned non-JSON error: status={status} body={body}")]
    UpstreamBody { status: StatusCode, body: String },
}

/// Client for the Generative Language `generateContent` endpoint.
///
/// One request per call: no retries, no client-side timeout.
#[derive(Clone)]
pub struct GenaiClient {
    config: GenaiClientConfig,
    http: reqwest::Client,
}

impl GenaiClient {
    pub fn new(config: GenaiClientConfig) -> Result<Self, GenaiClientError> {
        let http = reqwest::Client::builder()
            .user_agent("case-study/summarizer")
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GenaiClientConfig {
        &self.config
    }

    /// Send a single-turn prompt and return the model's text.
    ///
    /// The returned string may be empty when the model produced no candidates;
    /// deciding whether that is an error is left to the caller.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GenaiClientError> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let resp = self
            .http
            .post(self.config.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::to_upstream_error(resp, self.config.max_error_body_bytes).await);
        }

        let body = resp.json::<GenerateContentResponse>().await?;
        if let Some(reason) = body
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            warn!(reason, "prompt blocked by upstream");
        }
        if let Some(usage) = &body.usage_metadata {
            debug!(
                model = %self.config.model,
                prompt_tokens = usage.prompt_token_count,
                candidate_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "generateContent usage"
            );
        }
        Ok(body.text())
    }

    async fn to_upstream_error(
        resp: reqwest::Response,
        max_error_body_bytes: usize,
    ) -> GenaiClientError {
        let status = resp.status();
        let body = read_limited_text(resp, max_error_body_bytes).await;
        parse_upstream_error(status, body)
    }
}

fn parse_upstream_error(status: StatusCode, body: String) -> GenaiClientError {
    if let Ok(parsed) = serde_json::from_str::<GenaiErrorEnvelope>(&body) {
        let message = parsed
            .error
            .message
            .unwrap_or_else(|| "unknown upstream error".to_string());
        return GenaiClientError::Upstream { status, message };
    }
    GenaiClientError::UpstreamBody { status, body }
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenaiErrorEnvelope {
    error: GenaiErrorObject,
}

#[derive(Debug, Deserialize)]
struct GenaiErrorObject {
    message: Option<String>,
    #[allow(dead_code)]
    status: Option<String>,
    #[allow(dead_code)]
    code: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u64>,
    pub candidates_token_count: Option<u64>,
    pub total_token_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}
