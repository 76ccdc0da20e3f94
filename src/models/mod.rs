// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod bike;
pub mod user;

pub use bike::{BikeRecord, CplcStatus, FileHandoverStatus, PaymentMethod};
pub use user::{Role, UserProfile};
