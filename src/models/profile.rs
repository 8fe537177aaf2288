use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientProfile {
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            age: 72,
            gender: "Female".to_string(),
            allergies: vec![
                "Penicillin (causes rash and swelling)".to_string(),
                "Peanuts (causes difficulty breathing)".to_string(),
                "Aspirin (causes stomach bleeding and dizziness)".to_string(),
            ],
            medical_history: vec![
                "Type 2 diabetes diagnosed 10 years ago, managed with insulin".to_string(),
                "Hypertension for 15 years, controlled with medication".to_string(),
                "Mild stroke 3 years ago, undergoing regular check-ups".to_string(),
                "Mild kidney disease diagnosed last year, monitored closely".to_string(),
            ],
        }
    }
}

impl PatientProfile {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Markdown block prepended to every symptom description sent upstream.
    pub fn to_prompt(&self) -> String {
        let mut lines = vec![
            format!("**Age:** {} years old", self.age),
            format!("**Gender:** {}", self.gender),
            "**Allergies:**".to_string(),
        ];
        lines.extend(self.allergies.iter().map(|a| format!("* {a}")));
        lines.push("**Medical History:**".to_string());
        lines.extend(self.medical_history.iter().map(|h| format!("* {h}")));
        lines.join("\n")
    }

    pub fn request_context(&self, symptoms: &str) -> String {
        format!(
            "{}\n\nSymptoms described by patient: {symptoms}",
            self.to_prompt()
        )
    }
}
