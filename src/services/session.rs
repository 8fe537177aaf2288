use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Confirmation, SessionEvent, SessionEventKind, TriageOption, EMERGENCY_NUMBER};
use crate::services::booking::BookingFlow;
use crate::services::chat::SYSTEM_PROMPT;
use crate::services::navigation::{EventNavigator, Navigator};
use crate::services::scheduler::{ScheduledTasks, TaskHandle};
use crate::services::triage::{
    OptionAction, PendingReply, TriageDialogue, TriageError, TriageView, ERROR_REPLY,
};
use crate::state::AppState;

/// One client's screens: its booking wizard, its triage chat and the timers
/// that belong to them.
pub struct Session {
    pub id: Uuid,
    booking: BookingFlow,
    pub triage: TriageDialogue,
    last_seen: Instant,
    tasks: ScheduledTasks,
    pending_reset: Option<TaskHandle>,
}

impl Session {
    pub fn new(id: Uuid, today: NaiveDate) -> Self {
        Self {
            id,
            booking: BookingFlow::new(today),
            triage: TriageDialogue::new(),
            last_seen: Instant::now(),
            tasks: ScheduledTasks::new(),
            pending_reset: None,
        }
    }

    /// The booking wizard, with its date window moved on if the day changed.
    pub fn booking(&mut self) -> &mut BookingFlow {
        self.booking.roll_date(today());
        &mut self.booking
    }

    pub fn has_pending_reset(&self) -> bool {
        self.pending_reset
            .as_ref()
            .is_some_and(|h| !h.is_cancelled())
    }
}

#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn insert(&self, session: Session) {
        self.lock().insert(session.id, session);
    }

    pub fn remove(&self, id: &Uuid) -> Option<Session> {
        self.lock().remove(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Runs `f` with the session locked and marks it as recently used.
    /// Never hold the result across an await.
    pub fn with<T>(&self, id: &Uuid, f: impl FnOnce(&mut Session) -> T) -> Result<T, AppError> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("session {id}")))?;
        session.last_seen = Instant::now();
        Ok(f(session))
    }

    /// Takes out every session that has not been used for `idle`.
    pub fn remove_idle(&self, idle: Duration) -> Vec<Session> {
        let now = Instant::now();
        let mut sessions = self.lock();
        let expired: Vec<Uuid> = sessions
            .values()
            .filter(|s| now.duration_since(s.last_seen) >= idle)
            .map(|s| s.id)
            .collect();
        expired
            .iter()
            .filter_map(|id| sessions.remove(id))
            .collect()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn open_session(state: &Arc<AppState>) -> Uuid {
    let id = Uuid::new_v4();
    state.sessions.insert(Session::new(id, today()));
    tracing::info!(session_id = %id, "session opened");
    id
}

/// Drops the session; any timers still pending are cancelled with it.
pub fn close_session(state: &Arc<AppState>, id: &Uuid) -> Result<(), AppError> {
    let session = state
        .sessions
        .remove(id)
        .ok_or_else(|| AppError::NotFound(format!("session {id}")))?;
    session.tasks.cancel_all();
    tracing::info!(session_id = %id, "session closed");
    Ok(())
}

/// Closes sessions idle for longer than `session_idle_secs`.
pub fn sweep_idle_sessions(state: &Arc<AppState>) -> usize {
    let idle = Duration::from_secs(state.config.session_idle_secs);
    let expired = state.sessions.remove_idle(idle);
    for session in &expired {
        session.tasks.cancel_all();
        tracing::info!(session_id = %session.id, "idle session expired");
    }
    expired.len()
}

/// Sweeps idle sessions every `session_sweep_secs` until aborted.
pub fn spawn_idle_sweeper(state: Arc<AppState>) -> JoinHandle<()> {
    let period = Duration::from_secs(state.config.session_sweep_secs.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let closed = sweep_idle_sessions(&state);
            if closed > 0 {
                tracing::debug!(closed, remaining = state.sessions.len(), "idle sweep");
            }
        }
    })
}

pub fn confirm_booking(state: &Arc<AppState>, id: &Uuid) -> Result<Confirmation, AppError> {
    let window = Duration::from_secs(state.config.booking_reset_secs);

    let confirmation = state.sessions.with(id, |session| {
        if !session.booking().can_confirm() {
            // Reports the wrong step or the missing field without spending a reference
            return session.booking.confirm(String::new());
        }
        let confirmation = session.booking.confirm(state.references.issue())?;

        let task_state = Arc::clone(state);
        let session_id = session.id;
        let handle = session.tasks.schedule(window, async move {
            reset_booking(&task_state, &session_id);
        });
        session.pending_reset = Some(handle);
        Ok(confirmation)
    })??;

    tracing::info!(
        session_id = %id,
        reference = %confirmation.reference,
        doctor = %confirmation.doctor,
        "booking confirmed"
    );
    Ok(confirmation)
}

fn reset_booking(state: &Arc<AppState>, id: &Uuid) {
    let result = state.sessions.with(id, |session| {
        session.booking.reset(today());
        session.pending_reset = None;
    });
    match result {
        Ok(()) => {
            tracing::info!(session_id = %id, "booking reset after confirmation");
            let _ = state
                .events_tx
                .send(SessionEvent::new(*id, SessionEventKind::BookingReset));
        }
        Err(e) => tracing::debug!(error = %e, "booking reset skipped"),
    }
}

/// Reopens the chat for input if the request is dropped before its reply
/// is recorded.
struct ReplyGuard<'a> {
    state: &'a Arc<AppState>,
    id: Uuid,
    pending: PendingReply,
    armed: bool,
}

impl Drop for ReplyGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let pending = &self.pending;
            let _ = self
                .state
                .sessions
                .with(&self.id, |session| session.triage.abandon(pending));
        }
    }
}

pub async fn submit_message(
    state: &Arc<AppState>,
    id: &Uuid,
    text: &str,
) -> Result<TriageView, AppError> {
    let (pending, delay) = state.sessions.with(id, |session| {
        let delay = session
            .tasks
            .sleep(Duration::from_millis(state.config.reply_delay_ms));
        session.triage.accept_input(text).map(|pending| (pending, delay))
    })??;

    let Some(pending) = pending else {
        return state.sessions.with(id, |session| session.triage.view());
    };
    let mut guard = ReplyGuard {
        state,
        id: *id,
        pending,
        armed: true,
    };
    let pending = &guard.pending;

    tracing::info!(
        session_id = %id,
        outcome = ?pending.assessment.outcome,
        closing = pending.assessment.closing,
        "symptom message received"
    );

    let reply = match state.chat.as_deref() {
        // Once an outcome is set the backend is not consulted again
        Some(backend) if !pending.assessment.closing => {
            let context = state.profile.request_context(&pending.text);
            match backend.send(SYSTEM_PROMPT, &context).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::error!(session_id = %id, error = %e, "chat backend failed");
                    ERROR_REPLY.to_string()
                }
            }
        }
        _ => {
            if !delay.await {
                return Err(AppError::NotFound(format!("session {id}")));
            }
            pending.assessment.reply.to_string()
        }
    };

    let view = state.sessions.with(id, |session| {
        if !session.triage.respond(pending, reply) {
            tracing::debug!(session_id = %id, "dropping reply to a reset conversation");
        }
        session.triage.view()
    });
    guard.armed = false;
    view
}

pub fn select_option(
    state: &Arc<AppState>,
    id: &Uuid,
    option: TriageOption,
) -> Result<OptionAction, AppError> {
    let action = state
        .sessions
        .with(id, |session| session.triage.select_option(option))??;

    match &action {
        OptionAction::Navigate { route } => {
            EventNavigator::new(*id, state.events_tx.clone()).navigate(*route);
        }
        OptionAction::ConfirmCall { dialog } => {
            let _ = state.events_tx.send(SessionEvent::new(
                *id,
                SessionEventKind::Dialog {
                    dialog: dialog.clone(),
                },
            ));
        }
        OptionAction::Restarted => {
            tracing::info!(session_id = %id, "assessment restarted");
        }
    }
    Ok(action)
}

/// The user accepted the emergency dialog. There is no telephony here; the
/// number is handed back for the device to dial.
pub fn confirm_emergency_call(state: &Arc<AppState>, id: &Uuid) -> Result<&'static str, AppError> {
    state.sessions.with(id, |session| {
        if !session
            .triage
            .offered_options()
            .contains(&TriageOption::CallEmergency)
        {
            return Err(TriageError::OptionNotOffered(TriageOption::CallEmergency));
        }
        Ok(())
    })??;

    tracing::warn!(session_id = %id, number = EMERGENCY_NUMBER, "emergency call requested");
    Ok(EMERGENCY_NUMBER)
}
