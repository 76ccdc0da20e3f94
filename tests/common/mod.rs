// SPDX-License-Identifier: MIT

use showroom_ledger::config::Config;
use showroom_ledger::db::FirestoreDb;
use showroom_ledger::routes::create_router;
use showroom_ledger::services::{BikeIntake, DraftStore, IdentityClient, MediaClient};
use showroom_ledger::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a session token the way the login route does.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, signing_key: &[u8]) -> String {
    showroom_ledger::middleware::auth::create_jwt(uid, signing_key)
        .expect("Failed to create test JWT")
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();

    let media = MediaClient::new(
        &config.media_base_url,
        &config.media_cloud_name,
        &config.media_upload_preset,
    );
    let identity = IdentityClient::new(&config.identity_base_url, &config.identity_api_key);
    let intake = BikeIntake::new(db.clone(), media);
    let drafts = DraftStore::new();

    let state = Arc::new(AppState {
        config,
        db,
        identity,
        intake,
        drafts,
    });

    (create_router(state.clone()), state)
}
