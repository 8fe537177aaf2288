use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::route::Route;
use super::triage::EmergencyDialog;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEventKind {
    BookingReset,
    Navigate { route: Route, path: &'static str },
    Dialog { dialog: EmergencyDialog },
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionEvent {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub kind: SessionEventKind,
    pub created_at: DateTime<Utc>,
}

impl SessionEvent {
    pub fn new(session_id: Uuid, kind: SessionEventKind) -> Self {
        Self {
            session_id,
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            SessionEventKind::BookingReset => "booking_reset",
            SessionEventKind::Navigate { .. } => "navigate",
            SessionEventKind::Dialog { .. } => "dialog",
        }
    }
}
