use serde::{Deserialize, Serialize};

/// Role of the authenticated principal.
///
/// Encoded as the lowercase strings `"admin"` and `"user"`. Any other value is
/// rejected when a session is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Account the session user belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAccount {
    pub id: String,
    pub owner_id: String,
    pub name: Option<String>,
    pub code: Option<String>,
}

/// Authenticated principal carried inside the session cookie
///
/// # Fields
///
/// * `id` - Opaque user identifier
/// * `name` - Display first name, if known
/// * `last_name` - Display last name, if known
/// * `account_id` - Identifier of the owning account
/// * `email` - User's email address
/// * `role` - Whether the user is an admin or a regular user
/// * `account` - The owning account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub id: String,
    pub name: Option<String>,
    pub account_id: String,
    pub email: String,
    pub last_name: Option<String>,
    pub role: Role,
    pub account: SessionAccount,
}

impl UserSession {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
