use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Specialty;
use crate::services::booking::BookingView;
use crate::services::session;
use crate::state::AppState;

// GET /api/sessions/:id/booking
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    Ok(Json(state.sessions.with(&id, |s| s.booking().view())?))
}

// POST /api/sessions/:id/booking/specialty
#[derive(Deserialize)]
pub struct SpecialtyRequest {
    pub specialty: String,
}

pub async fn select_specialty(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SpecialtyRequest>,
) -> Result<Json<BookingView>, AppError> {
    let specialty = Specialty::parse(&body.specialty)
        .ok_or_else(|| AppError::BadRequest(format!("unknown specialty: {}", body.specialty)))?;

    let view = state.sessions.with(&id, |s| {
        s.booking().select_specialty(specialty)?;
        Ok::<_, AppError>(s.booking().view())
    })??;

    tracing::info!(session_id = %id, specialty = specialty.name(), "specialty selected");
    Ok(Json(view))
}

// POST /api/sessions/:id/booking/doctor
#[derive(Deserialize)]
pub struct DoctorRequest {
    pub doctor_id: String,
}

pub async fn select_doctor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<DoctorRequest>,
) -> Result<Json<BookingView>, AppError> {
    let view = state.sessions.with(&id, |s| {
        s.booking().select_doctor(body.doctor_id.trim())?;
        Ok::<_, AppError>(s.booking().view())
    })??;

    tracing::info!(session_id = %id, doctor_id = %body.doctor_id, "doctor selected");
    Ok(Json(view))
}

// POST /api/sessions/:id/booking/date
#[derive(Deserialize)]
pub struct DateRequest {
    pub date: NaiveDate,
}

pub async fn select_date(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<DateRequest>,
) -> Result<Json<BookingView>, AppError> {
    let view = state.sessions.with(&id, |s| {
        s.booking().select_date(body.date)?;
        Ok::<_, AppError>(s.booking().view())
    })??;
    Ok(Json(view))
}

// POST /api/sessions/:id/booking/time
#[derive(Deserialize)]
pub struct TimeRequest {
    pub slot: usize,
}

pub async fn select_time(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<TimeRequest>,
) -> Result<Json<BookingView>, AppError> {
    let view = state.sessions.with(&id, |s| {
        s.booking().select_time(body.slot)?;
        Ok::<_, AppError>(s.booking().view())
    })??;
    Ok(Json(view))
}

// POST /api/sessions/:id/booking/back
pub async fn go_back(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    let view = state.sessions.with(&id, |s| {
        s.booking().go_back();
        s.booking().view()
    })?;
    Ok(Json(view))
}

// POST /api/sessions/:id/booking/confirm
pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    session::confirm_booking(&state, &id)?;
    Ok(Json(state.sessions.with(&id, |s| s.booking().view())?))
}
