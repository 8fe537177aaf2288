use serde::Serialize;

use crate::models::{
    AssessmentOutcome, ChatMessage, EmergencyDialog, MessageRole, OutcomeSummary, Route,
    TriageOption,
};

pub struct TriageRule {
    pub keywords: &'static [&'static str],
    pub outcome: Option<AssessmentOutcome>,
    pub reply: &'static str,
}

impl TriageRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Evaluated top to bottom; the first match wins.
pub const TRIAGE_RULES: [TriageRule; 5] = [
    TriageRule {
        keywords: &["chest", "heart", "breathing"],
        outcome: Some(AssessmentOutcome::Emergency),
        reply: "Chest discomfort, heart symptoms or difficulty breathing can be signs of a serious condition. Based on what you've described, you need immediate medical attention.",
    },
    TriageRule {
        keywords: &["rash", "skin"],
        outcome: Some(AssessmentOutcome::GpVisit),
        reply: "Skin changes like rashes are best looked at in person, especially with your allergy history. I recommend seeing a general practitioner in the next day or two.",
    },
    TriageRule {
        keywords: &["cold", "flu", "cough"],
        outcome: Some(AssessmentOutcome::SelfManage),
        reply: "That sounds like a common viral infection. Rest, fluids and over-the-counter remedies usually help. Seek care if symptoms get worse or last more than a week.",
    },
    TriageRule {
        keywords: &["fever", "temperature"],
        outcome: None,
        reply: "How high is your temperature, and how long have you had the fever? Do you have any other symptoms such as a cough, rash or chest discomfort?",
    },
    TriageRule {
        keywords: &["headache", "pain"],
        outcome: None,
        reply: "Where exactly is the pain, and how severe is it on a scale of 1 to 10? Did it start suddenly or gradually?",
    },
];

pub const FALLBACK_REPLY: &str = "Could you tell me more about your symptoms? For example, where you feel discomfort, when it started, and how severe it is.";

pub const CLOSING_REPLY: &str = "Your assessment is complete. Please follow the recommendation above, or start a new assessment if something has changed.";

pub const ERROR_REPLY: &str =
    "Sorry, I encountered an error while processing your request. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    /// Outcome triggered by this input, if any.
    pub outcome: Option<AssessmentOutcome>,
    pub reply: &'static str,
    /// The session already has an outcome; the reply is a closing remark.
    pub closing: bool,
}

pub fn assess(text: &str, current: Option<AssessmentOutcome>) -> Assessment {
    if current.is_some() {
        return Assessment {
            outcome: None,
            reply: CLOSING_REPLY,
            closing: true,
        };
    }

    let lowered = text.to_lowercase();
    TRIAGE_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| Assessment {
            outcome: rule.outcome,
            reply: rule.reply,
            closing: false,
        })
        .unwrap_or(Assessment {
            outcome: None,
            reply: FALLBACK_REPLY,
            closing: false,
        })
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TriageError {
    #[error("option {0:?} is not offered right now")]
    OptionNotOffered(TriageOption),
    #[error("still waiting for the reply to the previous message")]
    ReplyPending,
}

/// What the caller should do after an option is picked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OptionAction {
    Navigate { route: Route },
    ConfirmCall { dialog: EmergencyDialog },
    Restarted,
}

/// A user message that has been recorded and is waiting for its reply.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReply {
    pub assessment: Assessment,
    pub text: String,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct TriageDialogue {
    messages: Vec<ChatMessage>,
    outcome: Option<AssessmentOutcome>,
    /// Bumped on every reset so replies to a previous conversation are dropped.
    generation: u64,
    awaiting_reply: bool,
}

impl Default for TriageDialogue {
    fn default() -> Self {
        Self::new()
    }
}

impl TriageDialogue {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::welcome()],
            outcome: None,
            generation: 0,
            awaiting_reply: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn outcome(&self) -> Option<AssessmentOutcome> {
        self.outcome
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Records the user's message. Blank input is ignored.
    ///
    /// Only one message may wait for a reply at a time, so outcomes are
    /// decided in the order messages were sent.
    pub fn accept_input(&mut self, text: &str) -> Result<Option<PendingReply>, TriageError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        if self.awaiting_reply {
            return Err(TriageError::ReplyPending);
        }
        self.messages.push(ChatMessage::new(MessageRole::User, text));
        self.awaiting_reply = true;
        Ok(Some(PendingReply {
            assessment: assess(text, self.outcome),
            text: text.to_string(),
            generation: self.generation,
        }))
    }

    /// Appends the bot reply for `pending`. Returns false when the dialogue was
    /// reset in the meantime and the reply was discarded.
    pub fn respond(&mut self, pending: &PendingReply, reply: impl Into<String>) -> bool {
        if pending.generation != self.generation {
            return false;
        }
        self.awaiting_reply = false;
        self.messages.push(ChatMessage::new(MessageRole::Bot, reply));

        if let Some(outcome) = pending.assessment.outcome {
            if self.outcome.is_none() {
                self.outcome = Some(outcome);
                let mut options = ChatMessage::new(MessageRole::Option, outcome.title());
                options.options = outcome.options();
                self.messages.push(options);
            }
        }
        true
    }

    /// The reply for `pending` will never arrive; accept input again.
    pub fn abandon(&mut self, pending: &PendingReply) {
        if pending.generation == self.generation {
            self.awaiting_reply = false;
        }
    }

    /// Rule-based reply with no upstream backend.
    pub fn submit(&mut self, text: &str) -> Result<Option<Assessment>, TriageError> {
        let Some(pending) = self.accept_input(text)? else {
            return Ok(None);
        };
        self.respond(&pending, pending.assessment.reply);
        Ok(Some(pending.assessment))
    }

    pub fn reset(&mut self) {
        self.messages = vec![ChatMessage::welcome()];
        self.outcome = None;
        self.generation += 1;
        self.awaiting_reply = false;
    }

    pub fn offered_options(&self) -> Vec<TriageOption> {
        self.outcome.map(|o| o.options()).unwrap_or_default()
    }

    pub fn select_option(&mut self, option: TriageOption) -> Result<OptionAction, TriageError> {
        if !self.offered_options().contains(&option) {
            return Err(TriageError::OptionNotOffered(option));
        }
        Ok(match option {
            TriageOption::Book => OptionAction::Navigate {
                route: Route::Appointments,
            },
            TriageOption::CallEmergency => OptionAction::ConfirmCall {
                dialog: EmergencyDialog::new(),
            },
            TriageOption::Restart => {
                self.reset();
                OptionAction::Restarted
            }
        })
    }

    pub fn view(&self) -> TriageView {
        TriageView {
            messages: self.messages.clone(),
            outcome: self.outcome.map(OutcomeSummary::from),
            assessment_completed: self.outcome.is_some(),
            awaiting_reply: self.awaiting_reply,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TriageView {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OutcomeSummary>,
    pub assessment_completed: bool,
    pub awaiting_reply: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WELCOME_ID;

    impl TriageDialogue {
        fn submit_ok(&mut self, text: &str) -> Option<Assessment> {
            self.submit(text).unwrap()
        }
    }

    #[test]
    fn test_starts_with_welcome() {
        let dialogue = TriageDialogue::new();
        assert_eq!(dialogue.messages().len(), 1);
        assert_eq!(dialogue.messages()[0].id, WELCOME_ID);
        assert_eq!(dialogue.messages()[0].role, MessageRole::Bot);
        assert!(dialogue.outcome().is_none());
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut dialogue = TriageDialogue::new();
        assert!(dialogue.submit_ok("").is_none());
        assert!(dialogue.submit_ok("   \n\t").is_none());
        assert_eq!(dialogue.messages().len(), 1);
    }

    #[test]
    fn test_emergency_is_not_overwritten() {
        let mut dialogue = TriageDialogue::new();
        let first = dialogue
            .submit_ok("I have chest pain and trouble breathing")
            .unwrap();
        assert_eq!(first.outcome, Some(AssessmentOutcome::Emergency));
        assert_eq!(dialogue.outcome(), Some(AssessmentOutcome::Emergency));

        let second = dialogue.submit_ok("I have a cold").unwrap();
        assert!(second.closing);
        assert_eq!(second.reply, CLOSING_REPLY);
        assert_eq!(dialogue.outcome(), Some(AssessmentOutcome::Emergency));
    }

    #[test]
    fn test_rule_priority() {
        assert_eq!(
            assess("My HEART is racing and I have a rash", None).outcome,
            Some(AssessmentOutcome::Emergency)
        );
        assert_eq!(
            assess("itchy skin and a cough", None).outcome,
            Some(AssessmentOutcome::GpVisit)
        );
        assert_eq!(
            assess("Flu since Monday", None).outcome,
            Some(AssessmentOutcome::SelfManage)
        );
    }

    #[test]
    fn test_clarifying_questions_set_no_outcome() {
        let mut dialogue = TriageDialogue::new();
        let fever = dialogue.submit_ok("I have a fever").unwrap();
        assert_eq!(fever.outcome, None);
        assert!(fever.reply.contains("temperature"));

        let pain = dialogue.submit_ok("bad headache").unwrap();
        assert_eq!(pain.outcome, None);
        assert!(pain.reply.contains("pain"));

        let other = dialogue.submit_ok("I feel off").unwrap();
        assert_eq!(other.reply, FALLBACK_REPLY);
        assert!(dialogue.outcome().is_none());
        assert_eq!(dialogue.messages().len(), 7);

        // A later severity match still sets the outcome
        dialogue.submit_ok("now I have a cough").unwrap();
        assert_eq!(dialogue.outcome(), Some(AssessmentOutcome::SelfManage));
    }

    #[test]
    fn test_outcome_appends_options_message() {
        let mut dialogue = TriageDialogue::new();
        dialogue.submit_ok("a rash on my arm").unwrap();
        let last = dialogue.messages().last().unwrap();
        assert_eq!(last.role, MessageRole::Option);
        assert_eq!(last.options, vec![TriageOption::Book, TriageOption::Restart]);

        // No second options message after the closing remark
        dialogue.submit_ok("and a cold").unwrap();
        let option_count = dialogue
            .messages()
            .iter()
            .filter(|m| m.role == MessageRole::Option)
            .count();
        assert_eq!(option_count, 1);
    }

    #[test]
    fn test_reset_restores_welcome() {
        let mut dialogue = TriageDialogue::new();
        dialogue.submit_ok("chest tightness").unwrap();
        dialogue.reset();
        assert_eq!(dialogue.messages().len(), 1);
        assert_eq!(dialogue.messages()[0].id, WELCOME_ID);
        assert!(dialogue.outcome().is_none());
    }

    #[test]
    fn test_reply_after_reset_is_dropped() {
        let mut dialogue = TriageDialogue::new();
        let pending = dialogue.accept_input("chest pain").unwrap().unwrap();
        dialogue.reset();
        assert!(!dialogue.respond(&pending, "late reply"));
        assert_eq!(dialogue.messages().len(), 1);
        assert!(dialogue.outcome().is_none());
    }

    #[test]
    fn test_select_option() {
        let mut dialogue = TriageDialogue::new();
        assert_eq!(
            dialogue.select_option(TriageOption::Book),
            Err(TriageError::OptionNotOffered(TriageOption::Book))
        );

        dialogue.submit_ok("I can't stop coughing, maybe flu").unwrap();
        assert_eq!(
            dialogue.select_option(TriageOption::CallEmergency),
            Err(TriageError::OptionNotOffered(TriageOption::CallEmergency))
        );

        dialogue.reset();
        dialogue.submit_ok("skin is peeling").unwrap();
        assert_eq!(
            dialogue.select_option(TriageOption::Book),
            Ok(OptionAction::Navigate {
                route: Route::Appointments
            })
        );

        dialogue.reset();
        dialogue.submit_ok("my heart hurts").unwrap();
        match dialogue.select_option(TriageOption::CallEmergency).unwrap() {
            OptionAction::ConfirmCall { dialog } => {
                assert_eq!(dialog.message, "Call 995 for emergency services?");
            }
            other => panic!("unexpected action {other:?}"),
        }

        assert_eq!(
            dialogue.select_option(TriageOption::Restart),
            Ok(OptionAction::Restarted)
        );
        assert_eq!(dialogue.messages().len(), 1);
    }

    #[test]
    fn test_one_message_in_flight() {
        let mut dialogue = TriageDialogue::new();
        let first = dialogue.accept_input("chest pain").unwrap().unwrap();
        assert!(dialogue.awaiting_reply());
        assert_eq!(
            dialogue.accept_input("I have a rash"),
            Err(TriageError::ReplyPending)
        );
        // Blank input is still a no-op rather than an error
        assert_eq!(dialogue.accept_input("  "), Ok(None));
        assert_eq!(dialogue.messages().len(), 2);

        dialogue.respond(&first, first.assessment.reply);
        assert!(!dialogue.awaiting_reply());
        assert_eq!(dialogue.outcome(), Some(AssessmentOutcome::Emergency));

        let second = dialogue.accept_input("I have a rash").unwrap().unwrap();
        assert!(second.assessment.closing);
    }

    #[test]
    fn test_abandoned_reply_reopens_input() {
        let mut dialogue = TriageDialogue::new();
        let pending = dialogue.accept_input("a cough").unwrap().unwrap();
        dialogue.abandon(&pending);
        assert!(!dialogue.awaiting_reply());
        assert!(dialogue.accept_input("a cough").unwrap().is_some());

        // A stale ticket does not release the gate for the next conversation
        dialogue.reset();
        let current = dialogue.accept_input("a rash").unwrap().unwrap();
        dialogue.abandon(&pending);
        assert!(dialogue.awaiting_reply());
        dialogue.abandon(&current);
        assert!(!dialogue.awaiting_reply());
    }
}
