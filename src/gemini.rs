//! Gemini text model client.
//!
//! Sends one prompt to the `generateContent` endpoint and returns the reply
//! as plain text. The reply has no guaranteed shape; parsing it is left to
//! [`crate::organize::parse_classifications`].

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::Config,
    error::OrganizeError,
    organize::TextModel,
    types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part},
};

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, OrganizeError> {
        let http = config.http_client()?;

        Ok(Self {
            http,
            api_url: config.gemini_api_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.trim_start_matches("models/").to_string(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{url}/models/{model}:generateContent",
            url = self.api_url,
            model = self.model
        )
    }
}

/// The request body for a single user prompt with a plain-text reply.
pub fn text_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(prompt.to_string()),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "text/plain".to_string(),
        },
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, OrganizeError> {
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&text_request(prompt))
            .send()
            .await
            .map_err(|e| OrganizeError::Classification(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrganizeError::Classification(format!(
                "Gemini returned status {}",
                status
            )));
        }

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| OrganizeError::Classification(e.without_url().to_string()))?;

        Ok(body.text())
    }
}
