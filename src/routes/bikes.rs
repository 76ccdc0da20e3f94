// SPDX-License-Identifier: MIT

//! Bike record routes: list/filter/search, read, intake, delete.

use crate::error::{AppError, Result};
use crate::middleware::auth::SessionUser;
use crate::models::BikeRecord;
use crate::services::intake::PendingUpload;
use crate::services::lifecycle::{self, StageCompletion, StageFilter};
use crate::AppState;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Draft slot cleared when the create form submits successfully.
pub const CREATE_DRAFT_SLOT: &str = "new-bike";

/// A submit carries up to ~30 document scans and bike photos.
const MAX_SUBMIT_BYTES: usize = 50 * 1024 * 1024;

/// Bike routes (admin only; gating middleware is applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/bikes", get(list_bikes).post(create_bike))
        .route("/api/bikes/next-bill-number", get(next_bill_number))
        .route(
            "/api/bikes/{id}",
            get(get_bike).put(update_bike).delete(delete_bike),
        )
        .layer(DefaultBodyLimit::max(MAX_SUBMIT_BYTES))
}

// ─── List / Filter / Search ──────────────────────────────────

#[derive(Deserialize)]
struct BikeListQuery {
    /// Stage filter: all | purchased | repair | sold | complete
    filter: Option<String>,
    /// Case-insensitive substring search over identifying fields
    search: Option<String>,
}

/// One row of the record list.
#[derive(Serialize)]
pub struct BikeSummary {
    pub bike_id: String,
    pub bill_number: String,
    pub registration_number: String,
    pub maker: String,
    pub model_year: String,
    pub seller_name: String,
    pub seller_cnic: String,
    pub buyer_name: String,
    pub buyer_cnic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_photo: Option<String>,
    pub status: StageCompletion,
}

impl From<&BikeRecord> for BikeSummary {
    fn from(bike: &BikeRecord) -> Self {
        Self {
            bike_id: bike.bike_id.clone(),
            bill_number: bike.bill_number.clone(),
            registration_number: bike.registration_number.clone(),
            maker: bike.maker.clone(),
            model_year: bike.model_year.clone(),
            seller_name: bike.seller_name.clone(),
            seller_cnic: bike.seller_cnic.clone(),
            buyer_name: bike.buyer_name.clone(),
            buyer_cnic: bike.buyer_cnic.clone(),
            seller_photo: bike.photos.get("seller_with_bike").cloned(),
            buyer_photo: bike.photos.get("buyer_with_bike").cloned(),
            status: StageCompletion::of(bike),
        }
    }
}

#[derive(Serialize)]
pub struct BikesResponse {
    pub bikes: Vec<BikeSummary>,
    pub total: usize,
}

/// List bike records with stage filtering and search.
async fn list_bikes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BikeListQuery>,
) -> Result<Json<BikesResponse>> {
    let filter = match params.filter.as_deref() {
        None | Some("") => StageFilter::All,
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Unknown filter: {}", raw)))?,
    };
    let search = params.search.unwrap_or_default();

    tracing::debug!(?filter, search = %search, "Listing bikes");

    let all = state.db.list_bikes().await?;
    let bikes: Vec<BikeSummary> = lifecycle::filter_bikes(&all, filter, &search)
        .into_iter()
        .map(BikeSummary::from)
        .collect();

    let total = bikes.len();
    Ok(Json(BikesResponse { bikes, total }))
}

// ─── Single Record ───────────────────────────────────────────

/// Full record plus derived stage flags, for the read-only view.
#[derive(Serialize)]
pub struct BikeDetailResponse {
    #[serde(flatten)]
    pub bike: BikeRecord,
    pub status: StageCompletion,
}

async fn get_bike(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BikeDetailResponse>> {
    let bike = state
        .db
        .get_bike(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Bike {} not found", id)))?;

    let status = StageCompletion::of(&bike);
    Ok(Json(BikeDetailResponse { bike, status }))
}

// ─── Intake (create / update) ────────────────────────────────

#[derive(Serialize)]
pub struct SubmitResponse {
    pub bike_id: String,
    pub bill_number: String,
}

/// Create a record from a multipart form (fields + pending photos).
async fn create_bike(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SubmitResponse>)> {
    let (fields, uploads) = read_multipart(multipart).await?;

    let record = state.intake.create_bike(&fields, uploads).await?;

    // Submit committed; drop the staged draft for the create form.
    state.drafts.clear(&session.uid, CREATE_DRAFT_SLOT);

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            bike_id: record.bike_id,
            bill_number: record.bill_number,
        }),
    ))
}

/// Update a record from a multipart form (full field set + pending photos).
async fn update_bike(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<SubmitResponse>> {
    let (fields, uploads) = read_multipart(multipart).await?;

    let record = state.intake.update_bike(&id, &fields, uploads).await?;

    state.drafts.clear(&session.uid, &id);

    Ok(Json(SubmitResponse {
        bike_id: record.bike_id,
        bill_number: record.bill_number,
    }))
}

/// Split a multipart form into text fields and pending file uploads.
///
/// Parts carrying a filename are files; an empty file input (submitted
/// untouched) is skipped rather than uploaded as a zero-byte photo.
async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(BTreeMap<String, String>, Vec<PendingUpload>)> {
    let mut fields = BTreeMap::new();
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = match field.name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(AppError::BadRequest("Unnamed form field".to_string())),
        };

        if let Some(filename) = field.file_name().map(|f| f.to_string()) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            if bytes.is_empty() {
                continue;
            }
            uploads.push(PendingUpload {
                key: name,
                filename,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            fields.insert(name, value);
        }
    }

    Ok((fields, uploads))
}

// ─── Delete ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Delete a record. Immediate and unrecoverable; there is no soft-delete.
async fn delete_bike(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.db.delete_bike(&id).await?;
    tracing::info!(bike_id = %id, "Bike record deleted");
    Ok(Json(DeleteResponse { success: true }))
}

// ─── Bill Number ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct NextBillNumberResponse {
    pub bill_number: String,
}

/// The bill number the create form pre-fills before first render.
async fn next_bill_number(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NextBillNumberResponse>> {
    let bikes = state.db.list_bikes().await?;
    Ok(Json(NextBillNumberResponse {
        bill_number: lifecycle::next_bill_number(&bikes),
    }))
}
