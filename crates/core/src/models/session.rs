use serde::{Deserialize, Serialize};

use crate::models::reservation::ANONYMOUS_EMAIL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    /// Identity handed out by the mock login: the display name is derived
    /// from the local part of the email (`ahmed.regragui@…` → `Ahmed Regragui`).
    pub fn from_email(id: &str, email: &str) -> Self {
        let local = email.split('@').next().unwrap_or(email);
        let name = local
            .split(['.', '_', '-'])
            .filter(|part| !part.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            id: id.to_string(),
            name,
            email: email.to_string(),
            phone: None,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Per-request identity. Only personalisation depends on it, never access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user_email(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.email.as_str())
            .unwrap_or(ANONYMOUS_EMAIL)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}
