use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::models::{PatientProfile, SessionEvent};
use crate::services::chat::ChatBackend;
use crate::services::reference::ReferenceIssuer;
use crate::services::session::SessionStore;

pub struct AppState {
    pub config: AppConfig,
    pub sessions: SessionStore,
    pub chat: Option<Box<dyn ChatBackend>>,
    pub profile: PatientProfile,
    pub references: ReferenceIssuer,
    pub events_tx: broadcast::Sender<SessionEvent>,
}

impl AppState {
    pub fn new(config: AppConfig, chat: Option<Box<dyn ChatBackend>>) -> Self {
        let (events_tx, _) = broadcast::channel(256);
        Self {
            config,
            sessions: SessionStore::new(),
            chat,
            profile: PatientProfile::default(),
            references: ReferenceIssuer::new(),
            events_tx,
        }
    }

    pub fn with_profile(mut self, profile: PatientProfile) -> Self {
        self.profile = profile;
        self
    }
}
