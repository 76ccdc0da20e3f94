// SPDX-License-Identifier: MIT

//! Dashboard and session-profile routes.

use crate::error::Result;
use crate::middleware::auth::SessionUser;
use crate::models::{BikeRecord, Role};
use crate::services::lifecycle::is_ready_for_sale;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

const RECENT_INTAKE_LIMIT: u32 = 6;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/dashboard", get(get_dashboard))
}

// ─── Session Profile ─────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Current session profile.
async fn get_me(Extension(session): Extension<SessionUser>) -> Json<MeResponse> {
    Json(MeResponse {
        uid: session.uid,
        name: session.name,
        email: session.email,
        role: session.role,
    })
}

// ─── Dashboard ───────────────────────────────────────────────

/// Card shown in the ready-to-sell and recent-intake grids.
#[derive(Serialize)]
pub struct BikeCard {
    pub bike_id: String,
    pub registration_number: String,
    pub maker: String,
    pub model_year: String,
    pub seller_name: String,
    pub chassis_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub repair_cost: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_photo: Option<String>,
}

impl From<&BikeRecord> for BikeCard {
    fn from(bike: &BikeRecord) -> Self {
        Self {
            bike_id: bike.bike_id.clone(),
            registration_number: bike.registration_number.clone(),
            maker: bike.maker.clone(),
            model_year: bike.model_year.clone(),
            seller_name: bike.seller_name.clone(),
            chassis_number: bike.chassis_number.clone(),
            repair_cost: bike.repair_cost.clone(),
            front_photo: bike.photos.get("front_photo").cloned(),
        }
    }
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub total_bikes: usize,
    pub ready_count: usize,
    /// Purchased but with no sale fields yet
    pub ready_to_sell: Vec<BikeCard>,
    /// Most recently created records
    pub recent_intake: Vec<BikeCard>,
}

/// Dashboard counts and grids.
async fn get_dashboard(State(state): State<Arc<AppState>>) -> Result<Json<DashboardResponse>> {
    let all = state.db.list_bikes().await?;
    let recent = state.db.list_recent_bikes(RECENT_INTAKE_LIMIT).await?;

    let ready_to_sell: Vec<BikeCard> = all
        .iter()
        .filter(|b| is_ready_for_sale(b))
        .map(BikeCard::from)
        .collect();

    Ok(Json(DashboardResponse {
        total_bikes: all.len(),
        ready_count: ready_to_sell.len(),
        ready_to_sell,
        recent_intake: recent.iter().map(BikeCard::from).collect(),
    }))
}
