use async_trait::async_trait;
use serde_json::json;

use super::{ChatBackend, ChatError};

pub struct OllamaBackend {
    url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaBackend {
    pub fn new(url: String, model: String) -> Self {
        Self {
            url,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    async fn send(&self, prompt: &str, context: &str) -> Result<String, ChatError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt },
                { "role": "user", "content": context },
            ],
            "stream": false,
        });

        let resp = self
            .client
            .post(format!("{}/api/chat", self.url))
            .json(&body)
            .send()
            .await?;

        let data: serde_json::Value = resp.json().await?;

        data["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ChatError::Response("missing content in Ollama response".to_string()))
    }
}
