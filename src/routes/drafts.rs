// SPDX-License-Identifier: MIT

//! Draft routes: staged form state, per staff member and form slot.

use crate::error::{AppError, Result};
use crate::middleware::auth::SessionUser;
use crate::services::drafts::Draft;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/drafts/{slot}",
        get(load_draft).put(save_draft).delete(clear_draft),
    )
}

async fn load_draft(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    Path(slot): Path<String>,
) -> Result<Json<Draft>> {
    state
        .drafts
        .load(&session.uid, &slot)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No draft for slot {}", slot)))
}

#[derive(Serialize)]
pub struct DraftSavedResponse {
    pub success: bool,
}

async fn save_draft(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    Path(slot): Path<String>,
    Json(fields): Json<BTreeMap<String, String>>,
) -> Json<DraftSavedResponse> {
    state.drafts.save(&session.uid, &slot, fields);
    Json(DraftSavedResponse { success: true })
}

#[derive(Serialize)]
pub struct DraftClearedResponse {
    pub cleared: bool,
}

async fn clear_draft(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    Path(slot): Path<String>,
) -> Json<DraftClearedResponse> {
    let cleared = state.drafts.clear(&session.uid, &slot);
    Json(DraftClearedResponse { cleared })
}
