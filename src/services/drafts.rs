// SPDX-License-Identifier: MIT

//! In-process draft store for uncommitted form state.
//!
//! Drafts are staged per staff member and form slot ("new-bike" for the
//! create form, the bike id for an edit form) and never touch the record
//! store. They live for the life of the process; a successful submit
//! clears the slot.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One saved draft: the staged field map plus when it was saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub fields: BTreeMap<String, String>,
    pub saved_at: String,
}

/// Draft store keyed by (staff uid, form slot).
#[derive(Clone, Default)]
pub struct DraftStore {
    drafts: Arc<DashMap<(String, String), Draft>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save (or replace) the draft for a slot.
    pub fn save(&self, uid: &str, slot: &str, fields: BTreeMap<String, String>) {
        let draft = Draft {
            fields,
            saved_at: crate::time_utils::now_rfc3339(),
        };
        self.drafts
            .insert((uid.to_string(), slot.to_string()), draft);
    }

    /// Load the draft for a slot, if any.
    pub fn load(&self, uid: &str, slot: &str) -> Option<Draft> {
        self.drafts
            .get(&(uid.to_string(), slot.to_string()))
            .map(|entry| entry.value().clone())
    }

    /// Clear the draft for a slot. Returns whether one existed.
    pub fn clear(&self, uid: &str, slot: &str) -> bool {
        self.drafts
            .remove(&(uid.to_string(), slot.to_string()))
            .is_some()
    }
}
