//! Staff profile model for storage and API.

use serde::{Deserialize, Serialize};

/// Staff role; only admins can use the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
}

/// Staff profile stored in Firestore.
///
/// Created at signup with the `editor` role; elevation to `admin` happens
/// out-of-band (there is no in-app promotion flow).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity-provider subject (also used as document ID)
    pub uid: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Role gating admin pages
    pub role: Role,
    /// When the account was created (RFC3339)
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        let profile = UserProfile {
            uid: "u1".to_string(),
            name: "Staff".to_string(),
            email: "staff@example.com".to_string(),
            role: Role::Editor,
            created_at: "2025-06-01T10:00:00Z".to_string(),
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["role"], "editor");

        let parsed: UserProfile = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.role, Role::Editor);
    }
}
