use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use careflow::config::AppConfig;
use careflow::models::PatientProfile;
use careflow::router::build_router;
use careflow::services::{chat, session};
use careflow::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let backend = chat::build_backend(&config)?;

    let profile = match &config.patient_profile_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read patient profile {path}"))?;
            let profile = PatientProfile::from_json(&raw)
                .with_context(|| format!("invalid patient profile {path}"))?;
            tracing::info!("loaded patient profile from {path}");
            profile
        }
        None => PatientProfile::default(),
    };

    let state = Arc::new(AppState::new(config.clone(), backend).with_profile(profile));

    session::spawn_idle_sweeper(Arc::clone(&state));

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
