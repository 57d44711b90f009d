//! Gemini generateContent client with function-calling support.

use crate::ai::{ChatModel, Content, ModelReply};
use crate::tools::ToolDefinition;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolsEntry>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolsEntry {
    function_declarations: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: &str, endpoint: &str, model: &str) -> Result<Self, String> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let mut key_value = header::HeaderValue::from_str(api_key)
            .map_err(|e| format!("Invalid API key format: {}", e))?;
        key_value.set_sensitive(true);
        headers.insert("x-goog-api-key", key_value);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn generate(
        &self,
        contents: &[Content],
        tools: &[ToolDefinition],
    ) -> Result<ModelReply, String> {
        let request = GenerateContentRequest {
            contents,
            tools: if tools.is_empty() {
                None
            } else {
                Some(vec![ToolsEntry {
                    function_declarations: tools
                        .iter()
                        .map(|t| t.to_function_declaration())
                        .collect(),
                }])
            },
            generation_config: GenerationConfig {
                max_output_tokens: 512,
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Gemini API request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Keep the upstream status code and status string in the error so
            // callers can classify rate limits (429 / RESOURCE_EXHAUSTED).
            if let Ok(parsed) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                let status_tag = parsed.error.status.unwrap_or_default();
                return Err(format!(
                    "Gemini API error {} {}: {}",
                    status.as_u16(),
                    status_tag,
                    parsed.error.message
                ));
            }
            return Err(format!(
                "Gemini API returned error status {}: {}",
                status.as_u16(),
                error_text
            ));
        }

        let response_data: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Gemini response: {}", e))?;

        let parts = response_data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        Ok(ModelReply::from_parts(parts))
    }
}
