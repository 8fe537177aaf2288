use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{PatientProfile, TriageOption};
use crate::services::session;
use crate::services::triage::{OptionAction, TriageView};
use crate::state::AppState;

// GET /api/sessions/:id/triage
pub async fn get_triage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TriageView>, AppError> {
    Ok(Json(state.sessions.with(&id, |s| s.triage.view())?))
}

// POST /api/sessions/:id/triage/messages
#[derive(Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<TriageView>, AppError> {
    let view = session::submit_message(&state, &id, &body.text).await?;
    Ok(Json(view))
}

// POST /api/sessions/:id/triage/reset
pub async fn reset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TriageView>, AppError> {
    let view = state.sessions.with(&id, |s| {
        s.triage.reset();
        s.triage.view()
    })?;
    tracing::info!(session_id = %id, "assessment reset");
    Ok(Json(view))
}

// POST /api/sessions/:id/triage/options
#[derive(Deserialize)]
pub struct OptionRequest {
    pub option: TriageOption,
}

#[derive(Serialize)]
pub struct OptionResponse {
    #[serde(flatten)]
    pub action: OptionAction,
    pub triage: TriageView,
}

pub async fn select_option(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<OptionRequest>,
) -> Result<Json<OptionResponse>, AppError> {
    let action = session::select_option(&state, &id, body.option)?;
    let triage = state.sessions.with(&id, |s| s.triage.view())?;
    Ok(Json(OptionResponse { action, triage }))
}

// POST /api/sessions/:id/triage/emergency-call
pub async fn emergency_call(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let number = session::confirm_emergency_call(&state, &id)?;
    Ok(Json(serde_json::json!({ "dial": number })))
}

// GET /api/profile
pub async fn get_profile(State(state): State<Arc<AppState>>) -> Json<PatientProfile> {
    Json(state.profile.clone())
}
