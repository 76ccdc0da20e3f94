// SPDX-License-Identifier: MIT

//! Showroom Ledger: record-keeping backend for a used-motorcycle dealership.
//!
//! Bikes move through purchase, repair, and sale stages; staff manage the
//! records and their document photos through an admin-gated HTTP API.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{BikeIntake, DraftStore, IdentityClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity: IdentityClient,
    pub intake: BikeIntake,
    pub drafts: DraftStore,
}
