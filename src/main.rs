// SPDX-License-Identifier: MIT

//! Showroom-Ledger API Server
//!
//! Record-keeping backend for a used-motorcycle dealership: purchase,
//! repair, and sale records with document photos, behind an admin login.

use showroom_ledger::{
    config::Config,
    db::FirestoreDb,
    services::{BikeIntake, DraftStore, IdentityClient, MediaClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Showroom-Ledger API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Media store client (photo uploads)
    let media = MediaClient::new(
        &config.media_base_url,
        &config.media_cloud_name,
        &config.media_upload_preset,
    );
    tracing::info!(cloud = %config.media_cloud_name, "Media client initialized");

    // Identity provider client (email/password accounts)
    let identity = IdentityClient::new(&config.identity_base_url, &config.identity_api_key);

    // Intake flow and per-session draft store
    let intake = BikeIntake::new(db.clone(), media);
    let drafts = DraftStore::new();

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        identity,
        intake,
        drafts,
    });

    // Build router
    let app = showroom_ledger::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("showroom_ledger=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
