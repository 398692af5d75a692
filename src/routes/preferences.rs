//! Dark-mode preference endpoints

use std::sync::{Arc, MutexGuard};

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    preferences::{DarkMode, DarkModeState},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct SetDarkModeRequest {
    pub dark_mode: bool,
}

fn dark_mode(state: &AppState) -> AppResult<MutexGuard<'_, DarkMode>> {
    state
        .dark_mode
        .lock()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("dark mode lock poisoned")))
}

pub async fn get_dark_mode(State(state): State<Arc<AppState>>) -> AppResult<Json<DarkModeState>> {
    Ok(Json(dark_mode(&state)?.state()?))
}

pub async fn set_dark_mode(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetDarkModeRequest>,
) -> AppResult<Json<DarkModeState>> {
    let mut dark_mode = dark_mode(&state)?;
    dark_mode.set(request.dark_mode)?;
    Ok(Json(dark_mode.state()?))
}

pub async fn toggle_dark_mode(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<DarkModeState>> {
    let mut dark_mode = dark_mode(&state)?;
    dark_mode.toggle()?;
    Ok(Json(dark_mode.state()?))
}

/// Forget the explicit choice and follow the host's system preference
pub async fn follow_system(State(state): State<Arc<AppState>>) -> AppResult<Json<DarkModeState>> {
    let mut dark_mode = dark_mode(&state)?;
    dark_mode.follow_system(state.config.system_prefers_dark)?;
    Ok(Json(dark_mode.state()?))
}
