// SPDX-License-Identifier: MIT

//! Record intake: the form-and-upload submit flow.
//!
//! A submit carries staged field edits plus pending photo files. Every
//! pending file is uploaded to the media store first, sequentially; the
//! first failure aborts the whole submit and nothing is written to the
//! record store. Only after all uploads succeed is the merged field-and-URL
//! map written in a single store call. One attempt, no retry, no cleanup of
//! already-uploaded files on a later failure.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::bike::photo_keys;
use crate::models::BikeRecord;
use crate::services::lifecycle::next_bill_number;
use crate::services::media::MediaClient;
use crate::time_utils::now_rfc3339;
use std::collections::BTreeMap;

/// Fields that must be present to create a record, checked in order;
/// the first missing one is reported.
const REQUIRED_CREATE_FIELDS: &[&str] = &["seller_name", "registration_number"];

/// A file staged for upload, keyed by its logical photo name.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub key: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Intake service: validates, uploads, and writes bike records.
#[derive(Clone)]
pub struct BikeIntake {
    db: FirestoreDb,
    media: MediaClient,
}

impl BikeIntake {
    pub fn new(db: FirestoreDb, media: MediaClient) -> Self {
        Self { db, media }
    }

    /// Create a new record from submitted fields and pending files.
    ///
    /// Auto-fills the bill number when none was supplied.
    pub async fn create_bike(
        &self,
        fields: &BTreeMap<String, String>,
        uploads: Vec<PendingUpload>,
    ) -> Result<BikeRecord, AppError> {
        validate_required(fields)?;
        validate_upload_keys(&uploads)?;

        let mut record = BikeRecord::from_fields(fields)?;
        record.bike_id = uuid::Uuid::new_v4().to_string();
        record.created_at = now_rfc3339();

        if record.bill_number.is_empty() {
            let existing = self.db.list_bikes().await?;
            record.bill_number = next_bill_number(&existing);
        }

        let urls = self.upload_all(uploads).await?;
        record.photos.extend(urls);

        self.db.set_bike(&record).await?;
        tracing::info!(
            bike_id = %record.bike_id,
            bill_number = %record.bill_number,
            "Bike record created"
        );
        Ok(record)
    }

    /// Update an existing record with submitted fields and pending files.
    pub async fn update_bike(
        &self,
        bike_id: &str,
        fields: &BTreeMap<String, String>,
        uploads: Vec<PendingUpload>,
    ) -> Result<BikeRecord, AppError> {
        validate_upload_keys(&uploads)?;

        let existing = self
            .db
            .get_bike(bike_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bike {} not found", bike_id)))?;

        let submitted = BikeRecord::from_fields(fields)?;
        let mut record = apply_update(&existing, submitted);

        let urls = self.upload_all(uploads).await?;
        record.photos.extend(urls);

        self.db.set_bike(&record).await?;
        tracing::info!(bike_id = %record.bike_id, "Bike record updated");
        Ok(record)
    }

    /// Upload every pending file, in submission order. All uploads must
    /// complete before the store write starts; the first failure aborts the
    /// submit.
    async fn upload_all(
        &self,
        uploads: Vec<PendingUpload>,
    ) -> Result<BTreeMap<String, String>, AppError> {
        let mut urls = BTreeMap::new();
        for upload in uploads {
            let url = self.media.upload(&upload.filename, upload.bytes).await?;
            tracing::debug!(key = %upload.key, "Photo uploaded");
            urls.insert(upload.key, url);
        }
        Ok(urls)
    }
}

/// Sequential required-field check; reports the first missing field only.
fn validate_required(fields: &BTreeMap<String, String>) -> Result<(), AppError> {
    for name in REQUIRED_CREATE_FIELDS {
        let missing = fields
            .get(*name)
            .map(|v| v.trim().is_empty())
            .unwrap_or(true);
        if missing {
            return Err(AppError::BadRequest(format!(
                "Missing required field: {}",
                name
            )));
        }
    }
    Ok(())
}

/// Reject uploads against photo keys the record model doesn't know.
fn validate_upload_keys(uploads: &[PendingUpload]) -> Result<(), AppError> {
    for upload in uploads {
        if !photo_keys::is_known(&upload.key) {
            return Err(AppError::BadRequest(format!(
                "Unknown photo key: {}",
                upload.key
            )));
        }
    }
    Ok(())
}

/// Merge a submitted field set over an existing record.
///
/// The edit form posts the full field set, so submitted scalars replace
/// stored ones (a blank submitted field clears it). Exceptions: the id and
/// creation stamp are immutable, a blank bill number keeps the stored one,
/// and stored photo URLs survive until overlaid by new uploads.
fn apply_update(existing: &BikeRecord, mut submitted: BikeRecord) -> BikeRecord {
    submitted.bike_id = existing.bike_id.clone();
    submitted.created_at = existing.created_at.clone();
    if submitted.bill_number.is_empty() {
        submitted.bill_number = existing.bill_number.clone();
    }
    submitted.photos = existing.photos.clone();
    submitted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_validate_required_reports_first_missing() {
        let err = validate_required(&fields(&[])).unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(ref msg) if msg == "Missing required field: seller_name"
        ));

        let err = validate_required(&fields(&[("seller_name", "Ahmed")])).unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(ref msg) if msg == "Missing required field: registration_number"
        ));

        // Whitespace-only counts as missing
        let err = validate_required(&fields(&[
            ("seller_name", "   "),
            ("registration_number", "KHI-1"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(ref msg) if msg == "Missing required field: seller_name"
        ));

        validate_required(&fields(&[
            ("seller_name", "Ahmed"),
            ("registration_number", "KHI-1"),
        ]))
        .unwrap();
    }

    #[test]
    fn test_validate_upload_keys() {
        let good = PendingUpload {
            key: "repair_bill".to_string(),
            filename: "bill.jpg".to_string(),
            bytes: vec![1, 2, 3],
        };
        validate_upload_keys(&[good.clone()]).unwrap();

        let bad = PendingUpload {
            key: "selfie".to_string(),
            ..good
        };
        let err = validate_upload_keys(&[bad]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_apply_update_replaces_scalars() {
        let existing = BikeRecord {
            bike_id: "b1".to_string(),
            created_at: "2025-06-01T10:00:00Z".to_string(),
            bill_number: "B-104".to_string(),
            seller_name: "Ahmed".to_string(),
            repair_description: "old chain".to_string(),
            ..Default::default()
        };

        let submitted = BikeRecord {
            seller_name: "Ahmed Khan".to_string(),
            buyer_name: "Bilal".to_string(),
            ..Default::default()
        };

        let merged = apply_update(&existing, submitted);

        assert_eq!(merged.bike_id, "b1");
        assert_eq!(merged.created_at, "2025-06-01T10:00:00Z");
        assert_eq!(merged.seller_name, "Ahmed Khan");
        assert_eq!(merged.buyer_name, "Bilal");
        // Full-field-set semantics: a blank submitted scalar clears it
        assert!(merged.repair_description.is_empty());
        // ...except the auto-generated bill number, which is preserved
        assert_eq!(merged.bill_number, "B-104");
    }

    #[test]
    fn test_apply_update_keeps_existing_photos() {
        let mut existing = BikeRecord {
            bike_id: "b1".to_string(),
            ..Default::default()
        };
        existing
            .photos
            .insert("front_photo".to_string(), "https://media/front.jpg".to_string());
        existing
            .photos
            .insert("repair_bill".to_string(), "https://media/bill.jpg".to_string());

        let mut merged = apply_update(&existing, BikeRecord::default());

        // New upload URLs overlay, untouched keys survive
        merged
            .photos
            .insert("front_photo".to_string(), "https://media/front-v2.jpg".to_string());

        assert_eq!(merged.photos["front_photo"], "https://media/front-v2.jpg");
        assert_eq!(merged.photos["repair_bill"], "https://media/bill.jpg");
    }

    #[test]
    fn test_apply_update_takes_submitted_bill_number() {
        let existing = BikeRecord {
            bill_number: "B-104".to_string(),
            ..Default::default()
        };
        let submitted = BikeRecord {
            bill_number: "B-200".to_string(),
            ..Default::default()
        };

        assert_eq!(apply_update(&existing, submitted).bill_number, "B-200");
    }
}
