use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::booking::BookingView;
use crate::services::session;
use crate::services::triage::TriageView;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub booking: BookingView,
    pub triage: TriageView,
}

// POST /api/sessions
pub async fn open_session(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let id = session::open_session(&state);
    let (booking, triage) = state
        .sessions
        .with(&id, |s| (s.booking().view(), s.triage.view()))?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            id,
            booking,
            triage,
        }),
    ))
}

// DELETE /api/sessions/:id
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    session::close_session(&state, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
