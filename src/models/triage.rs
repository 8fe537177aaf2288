use serde::{Deserialize, Serialize};

use super::chat::TriageOption;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentOutcome {
    SelfManage,
    GpVisit,
    Emergency,
}

impl AssessmentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentOutcome::SelfManage => "self-manage",
            AssessmentOutcome::GpVisit => "gp-visit",
            AssessmentOutcome::Emergency => "emergency",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AssessmentOutcome::SelfManage => "Self-management Recommended",
            AssessmentOutcome::GpVisit => "GP Visit Recommended",
            AssessmentOutcome::Emergency => "Emergency Care Needed",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AssessmentOutcome::SelfManage => {
                "Based on your symptoms, you can manage this condition at home with rest and over-the-counter remedies if needed."
            }
            AssessmentOutcome::GpVisit => {
                "Your symptoms suggest you should visit a general practitioner within the next 1-2 days."
            }
            AssessmentOutcome::Emergency => {
                "Your symptoms require immediate medical attention. Please go to the emergency department or call 995."
            }
        }
    }

    /// Restart is always last.
    pub fn options(&self) -> Vec<TriageOption> {
        match self {
            AssessmentOutcome::SelfManage => vec![TriageOption::Restart],
            AssessmentOutcome::GpVisit => vec![TriageOption::Book, TriageOption::Restart],
            AssessmentOutcome::Emergency => {
                vec![TriageOption::CallEmergency, TriageOption::Restart]
            }
        }
    }
}

impl std::fmt::Display for AssessmentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutcomeSummary {
    pub outcome: AssessmentOutcome,
    pub title: &'static str,
    pub description: &'static str,
    pub options: Vec<TriageOption>,
}

impl From<AssessmentOutcome> for OutcomeSummary {
    fn from(outcome: AssessmentOutcome) -> Self {
        Self {
            outcome,
            title: outcome.title(),
            description: outcome.description(),
            options: outcome.options(),
        }
    }
}

pub const EMERGENCY_NUMBER: &str = "995";

/// Confirmation shown before placing an emergency call.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmergencyDialog {
    pub title: &'static str,
    pub message: String,
    pub number: &'static str,
    pub actions: [&'static str; 2],
}

impl EmergencyDialog {
    pub fn new() -> Self {
        Self {
            title: "Emergency Contact",
            message: format!("Call {EMERGENCY_NUMBER} for emergency services?"),
            number: EMERGENCY_NUMBER,
            actions: ["Cancel", "Call"],
        }
    }
}

impl Default for EmergencyDialog {
    fn default() -> Self {
        Self::new()
    }
}
