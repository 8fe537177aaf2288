use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/profile", get(handlers::triage::get_profile))
        .route("/api/sessions", post(handlers::sessions::open_session))
        .route("/api/sessions/:id", delete(handlers::sessions::close_session))
        .route("/api/sessions/:id/booking", get(handlers::booking::get_booking))
        .route(
            "/api/sessions/:id/booking/specialty",
            post(handlers::booking::select_specialty),
        )
        .route(
            "/api/sessions/:id/booking/doctor",
            post(handlers::booking::select_doctor),
        )
        .route(
            "/api/sessions/:id/booking/date",
            post(handlers::booking::select_date),
        )
        .route(
            "/api/sessions/:id/booking/time",
            post(handlers::booking::select_time),
        )
        .route("/api/sessions/:id/booking/back", post(handlers::booking::go_back))
        .route(
            "/api/sessions/:id/booking/confirm",
            post(handlers::booking::confirm),
        )
        .route("/api/sessions/:id/triage", get(handlers::triage::get_triage))
        .route(
            "/api/sessions/:id/triage/messages",
            post(handlers::triage::send_message),
        )
        .route("/api/sessions/:id/triage/reset", post(handlers::triage::reset))
        .route(
            "/api/sessions/:id/triage/options",
            post(handlers::triage::select_option),
        )
        .route(
            "/api/sessions/:id/triage/emergency-call",
            post(handlers::triage::emergency_call),
        )
        .route(
            "/api/sessions/:id/events",
            get(handlers::events::events_stream),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
