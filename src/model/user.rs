use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// A full user record (profile and admin views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub avatar: Option<String>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// "First Last", falling back to the username when both parts are empty
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// The subset of user fields the backend embeds on related objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBrief {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl UserBrief {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_full_name() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "username": "abaker", "first_name": "Alice", "last_name": "Baker"}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "Alice Baker");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let user: User = serde_json::from_str(r#"{"id": 2, "username": "ghost"}"#).unwrap();
        assert_eq!(user.display_name(), "ghost");
        assert!(user.is_active);
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn single_name_part_is_trimmed() {
        let brief: UserBrief =
            serde_json::from_str(r#"{"id": 3, "username": "c", "first_name": "Cho"}"#).unwrap();
        assert_eq!(brief.display_name(), "Cho");
    }

    #[test]
    fn role_wire_values() {
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
