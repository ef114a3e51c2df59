//! Core data type definitions

use serde::{Deserialize, Serialize};

/// Role of a signed-in user
///
/// Serialized in upper case (`"ADMIN"`, `"RESIDENT"`) so stored sessions stay
/// readable by older front-end builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Resident,
}

impl Role {
    /// All roles known to the portal
    pub const ALL: [Role; 2] = [Role::Admin, Role::Resident];

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Resident => "RESIDENT",
        }
    }

    /// Human readable label for headers and menus
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Resident => "Resident",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "resident" => Ok(Role::Resident),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Authenticated user held by the session
///
/// Never mutated in place; a new sign-in replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Unique, opaque user id
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// House assignment, residents only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    /// Avatar URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Identity {
    /// Whether the identity is usable as a session owner
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Short display string for logs
    pub fn display_string(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"RESIDENT\"").unwrap(),
            Role::Resident
        );
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn test_identity_uses_camel_case_keys() {
        let identity = Identity {
            id: "res_1".to_string(),
            name: "Alex Resident".to_string(),
            email: "resident@bliss3.com".to_string(),
            role: Role::Resident,
            house_number: Some("Block B, #104".to_string()),
            avatar: None,
        };

        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["houseNumber"], "Block B, #104");
        assert_eq!(json["role"], "RESIDENT");
        assert!(json.get("avatar").is_none());
    }

    #[test]
    fn test_identity_rejects_incomplete_shapes() {
        assert!(serde_json::from_str::<Identity>("{}").is_err());
        assert!(serde_json::from_str::<Identity>("[]").is_err());
        assert!(serde_json::from_str::<Identity>(
            r#"{"id":"x","name":"n","email":"e","role":"OWNER"}"#
        )
        .is_err());

        let parsed: Identity =
            serde_json::from_str(r#"{"id":"admin_1","name":"n","email":"e","role":"ADMIN"}"#)
                .unwrap();
        assert!(parsed.is_well_formed());
        assert_eq!(parsed.house_number, None);
    }

    #[test]
    fn test_blank_id_is_not_well_formed() {
        let parsed: Identity =
            serde_json::from_str(r#"{"id":"  ","name":"n","email":"e","role":"ADMIN"}"#).unwrap();
        assert!(!parsed.is_well_formed());
    }
}
