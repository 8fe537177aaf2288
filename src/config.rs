use std::env;

#[derive(Clone, Debug, PartialEq)]
pub enum ChatProvider {
    /// Replies come from the local triage rules.
    None,
    OpenAi,
    Ollama,
}

impl ChatProvider {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "openai" => ChatProvider::OpenAi,
            "ollama" => ChatProvider::Ollama,
            _ => ChatProvider::None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub chat_provider: ChatProvider,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_url: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub booking_reset_secs: u64,
    pub reply_delay_ms: u64,
    /// Sessions untouched for this long are closed by the sweeper.
    pub session_idle_secs: u64,
    pub session_sweep_secs: u64,
    pub patient_profile_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            chat_provider: ChatProvider::None,
            openai_api_key: String::new(),
            openai_model: "gpt-4o-mini".to_string(),
            openai_url: "https://api.openai.com/v1".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3.2".to_string(),
            booking_reset_secs: 3,
            reply_delay_ms: 800,
            session_idle_secs: 1800,
            session_sweep_secs: 60,
            patient_profile_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            chat_provider: env::var("CHAT_PROVIDER")
                .map(|v| ChatProvider::parse(&v))
                .unwrap_or(ChatProvider::None),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_url: env::var("OPENAI_URL").unwrap_or(defaults.openai_url),
            ollama_url: env::var("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            booking_reset_secs: env::var("BOOKING_RESET_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.booking_reset_secs),
            reply_delay_ms: env::var("REPLY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.reply_delay_ms),
            session_idle_secs: env::var("SESSION_IDLE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.session_idle_secs),
            session_sweep_secs: env::var("SESSION_SWEEP_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&secs: &u64| secs > 0)
                .unwrap_or(defaults.session_sweep_secs),
            patient_profile_path: env::var("PATIENT_PROFILE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider() {
        assert_eq!(ChatProvider::parse("OpenAI"), ChatProvider::OpenAi);
        assert_eq!(ChatProvider::parse(" ollama "), ChatProvider::Ollama);
        assert_eq!(ChatProvider::parse("none"), ChatProvider::None);
        assert_eq!(ChatProvider::parse("groq"), ChatProvider::None);
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.booking_reset_secs, 3);
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert!(config.patient_profile_path.is_none());
        assert_eq!(config.session_idle_secs, 1800);
        assert_eq!(config.session_sweep_secs, 60);
    }
}
