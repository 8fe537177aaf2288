use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Bot,
    Option,
}

/// Follow-up actions offered once an assessment outcome is reached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriageOption {
    Book,
    CallEmergency,
    Restart,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub role: MessageRole,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<TriageOption>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            role,
            timestamp: Utc::now(),
            options: Vec::new(),
        }
    }

    pub fn welcome() -> Self {
        Self {
            id: WELCOME_ID.to_string(),
            ..Self::new(MessageRole::Bot, WELCOME_TEXT)
        }
    }
}

pub const WELCOME_ID: &str = "welcome";

pub const WELCOME_TEXT: &str = "Hello! I'm your SingHealth assistant. I can provide a preliminary assessment of your symptoms. Your profile information has been loaded. How can I help you today?";
