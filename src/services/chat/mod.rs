pub mod ollama;
pub mod openai;

use async_trait::async_trait;

use crate::config::{AppConfig, ChatProvider};
use crate::errors::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Response(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ChatError::Response(e.to_string())
        } else {
            ChatError::Network(e.to_string())
        }
    }
}

/// Single-turn chat completion: a system prompt plus one user context block.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, prompt: &str, context: &str) -> Result<String, ChatError>;
}

pub const SYSTEM_PROMPT: &str = r#"You are a knowledgeable health information assistant trained to provide evidence-based health information and general guidance. While you can offer educational content about health conditions and wellness practices, you:
1. Aim to provide accurate and helpful information/basic diagnosis, you are not a licensed medical professional.
2. Will always recommend consulting qualified healthcare providers for specific medical concerns
3. Will consider provided details like age, gender, symptoms, medical history, and allergies when discussing health topics
4. Will acknowledge limitations and uncertainties in medical knowledge
5. Will prioritize patient safety by emphasizing when immediate medical attention might be necessary
6. Will provide balanced information about treatment options without recommending specific medications or dosages
7. Will use clear, accessible language and avoid unnecessary medical jargon
8. Will provide contextual information about prevention, risk factors, and general health maintenance
9. Will cite reputable health organizations when appropriate
"#;

pub fn build_backend(config: &AppConfig) -> Result<Option<Box<dyn ChatBackend>>, AppError> {
    let backend: Box<dyn ChatBackend> = match config.chat_provider {
        ChatProvider::OpenAi => {
            if config.openai_api_key.is_empty() {
                return Err(AppError::Config(
                    "OPENAI_API_KEY must be set when CHAT_PROVIDER=openai".to_string(),
                ));
            }
            tracing::info!("using OpenAI chat backend (model: {})", config.openai_model);
            Box::new(openai::OpenAiBackend::new(
                config.openai_url.clone(),
                config.openai_api_key.clone(),
                config.openai_model.clone(),
            ))
        }
        ChatProvider::Ollama => {
            tracing::info!("using Ollama chat backend (url: {})", config.ollama_url);
            Box::new(ollama::OllamaBackend::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
            ))
        }
        ChatProvider::None => {
            tracing::info!("no chat backend configured, using rule-based replies");
            return Ok(None);
        }
    };
    Ok(Some(backend))
}
