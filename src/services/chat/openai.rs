use async_trait::async_trait;
use serde_json::json;

use super::{ChatBackend, ChatError};

/// OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiBackend {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn send(&self, prompt: &str, context: &str) -> Result<String, ChatError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt },
                { "role": "user", "content": context },
            ],
            "max_tokens": 1000,
            "temperature": 0.7,
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let data: serde_json::Value = resp.json().await?;

        if !status.is_success() {
            return Err(ChatError::Response(format!("chat API error ({status}): {data}")));
        }

        data["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ChatError::Response("missing content in chat response".to_string()))
    }
}
