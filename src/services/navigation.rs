use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::{Route, SessionEvent, SessionEventKind};

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Forwards navigation requests to the session's event stream, where the
/// client picks them up and switches screens.
pub struct EventNavigator {
    session_id: Uuid,
    events: broadcast::Sender<SessionEvent>,
}

impl EventNavigator {
    pub fn new(session_id: Uuid, events: broadcast::Sender<SessionEvent>) -> Self {
        Self { session_id, events }
    }
}

impl Navigator for EventNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(session_id = %self.session_id, route = route.path(), "navigating");
        let event = SessionEvent::new(
            self.session_id,
            SessionEventKind::Navigate {
                route,
                path: route.path(),
            },
        );
        // No subscribers is fine; the HTTP response carries the route as well
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_navigate_publishes_event() {
        let (tx, mut rx) = broadcast::channel(8);
        let id = Uuid::new_v4();
        EventNavigator::new(id, tx).navigate(Route::Appointments);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.session_id, id);
        assert_eq!(event.name(), "navigate");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "navigate");
        assert_eq!(json["route"], "appointments");
        assert_eq!(json["path"], "/appointments");
    }
}
