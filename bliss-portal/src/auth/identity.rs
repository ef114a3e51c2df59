//! Mock sign-in
//!
//! There is no credential check: picking a role yields the canned account
//! for that role.

use bliss_core::{Identity, Role};
use serde::{Deserialize, Serialize};

/// Sign-in form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockCredentials {
    /// Overrides the canned email when non-blank
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

impl MockCredentials {
    pub fn new(role: Role) -> Self {
        Self { email: None, role }
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Build the canned identity for the chosen role
pub fn sign_in(credentials: &MockCredentials) -> Identity {
    let role = credentials.role;
    let (id, name, default_email, house_number) = match role {
        Role::Admin => ("admin_1", "Head Administrator", "admin@bliss3.com", None),
        Role::Resident => (
            "res_1",
            "Alex Resident",
            "resident@bliss3.com",
            Some("Block B, #104".to_string()),
        ),
    };

    let email = credentials
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(default_email);

    Identity {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        house_number,
        avatar: Some(format!("https://picsum.photos/seed/{}/200", role.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_accounts() {
        let admin = sign_in(&MockCredentials::new(Role::Admin));
        assert_eq!(admin.id, "admin_1");
        assert_eq!(admin.email, "admin@bliss3.com");
        assert_eq!(admin.house_number, None);
        assert_eq!(
            admin.avatar.as_deref(),
            Some("https://picsum.photos/seed/ADMIN/200")
        );

        let resident = sign_in(&MockCredentials::new(Role::Resident));
        assert_eq!(resident.id, "res_1");
        assert_eq!(resident.name, "Alex Resident");
        assert_eq!(resident.house_number.as_deref(), Some("Block B, #104"));
    }

    #[test]
    fn test_email_override() {
        let identity =
            sign_in(&MockCredentials::new(Role::Resident).with_email("alex@example.com"));
        assert_eq!(identity.email, "alex@example.com");

        let blank = sign_in(&MockCredentials::new(Role::Admin).with_email("   "));
        assert_eq!(blank.email, "admin@bliss3.com");
    }
}
