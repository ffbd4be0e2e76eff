//! Client for the external vision-capable chat model.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::Config;

/// Instruction sent alongside every image.
pub const TAGGING_PROMPT: &str = "Analyze this image and return JSON with an array of tags. \
Each tag must have { label, confidence }. \
Return ONLY JSON without any additional text or markdown formatting.";

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Request to vision model failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Vision API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Could not decode vision model response: {0}")]
    Decode(String),
    #[error("Vision model returned no choices")]
    EmptyResponse,
}

/// A model that can look at an image and answer the tagging prompt.
///
/// Implementations return the raw completion text; shaping it into tags is
/// left to [`crate::normalize::parse_tags`].
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Run the tagging prompt against an image given as a `data:` URI.
    async fn complete(&self, data_uri: &str) -> Result<String, VisionError>;

    /// Model identifier, used for logging.
    fn name(&self) -> &str;
}

/// OpenAI-compatible chat-completions backend.
pub struct OpenAiVision {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiVision {
    pub fn new(client: Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Client::new(),
            config.api_key.clone(),
            config.base_url.clone(),
            config.model.clone(),
        )
    }

    fn request_body(&self, data_uri: &str) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    {
                        "type": "image_url",
                        "image_url": { "url": data_uri }
                    },
                    {
                        "type": "text",
                        "text": TAGGING_PROMPT
                    }
                ]
            }],
            "temperature": 0,
            "response_format": { "type": "json_object" }
        })
    }
}

#[async_trait]
impl VisionModel for OpenAiVision {
    async fn complete(&self, data_uri: &str) -> Result<String, VisionError> {
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!("Sending image to {} ({})", self.model, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(data_uri))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(VisionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let completion: ChatCompletion =
            serde_json::from_str(&body).map_err(|e| VisionError::Decode(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(VisionError::EmptyResponse)?;

        Ok(choice.message.and_then(|m| m.content).unwrap_or_default())
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
