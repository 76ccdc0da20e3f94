// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod drafts;
pub mod identity;
pub mod intake;
pub mod lifecycle;
pub mod media;

pub use drafts::DraftStore;
pub use identity::{IdentityClient, IdentitySession};
pub use intake::{BikeIntake, PendingUpload};
pub use lifecycle::{StageCompletion, StageFilter};
pub use media::MediaClient;
