use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GatewayError;

pub const TEMPERATURE: f32 = 0.7;
pub const TOP_K: u32 = 40;
pub const TOP_P: f32 = 0.95;

/// Source of generated text. One call, one attempt: implementations must not
/// retry and must report every failure as an `Err`.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        max_output_tokens: u32,
    ) -> Result<String, GatewayError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.trim().is_empty())
    }
}

/// `generateContent` client for the Gemini REST API.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        max_output_tokens: u32,
    ) -> Result<String, GatewayError> {
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::NotConfigured);
        }

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens,
            },
        };

        debug!(model, max_output_tokens, "calling Gemini generateContent");

        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|err| GatewayError::transport(err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(model, %status, "Gemini API returned an error status");
            return Err(GatewayError::transport(format!("Gemini API error: {status}")));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|err| GatewayError::transport(err.without_url().to_string()))?;

        let text = body.first_text().ok_or(GatewayError::EmptyResponse)?;
        debug!(model, chars = text.len(), "Gemini response received");
        Ok(text)
    }
}
