//! Mock session handling.
//!
//! Logging in hands out an opaque bearer token; later requests present it in
//! the `Authorization` header and are resolved to a [`Session`]. Requests
//! without a known token are anonymous. Nothing is access-controlled by the
//! session, it only personalises bookings.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use regragui_core::errors::{BookingError, BookingResult};
use regragui_core::models::session::{Session, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::ApiState;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, User>>,
}

impl SessionStore {
    /// Accepts any well-formed email with a non-empty password.
    pub async fn login(&self, email: &str, password: &str) -> BookingResult<(String, User)> {
        let email = email.trim();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(BookingError::Validation(format!("Invalid email address: \"{}\"", email)));
        }
        if password.is_empty() {
            return Err(BookingError::Authentication("Password is required".to_string()));
        }

        let token = Uuid::new_v4().to_string();
        let user = User::from_email(&Uuid::new_v4().simple().to_string(), email);
        self.sessions.write().await.insert(token.clone(), user.clone());

        tracing::info!("Session opened for {}", user.email);
        Ok((token, user))
    }

    pub async fn resolve(&self, token: &str) -> Session {
        match self.sessions.read().await.get(token) {
            Some(user) => Session::authenticated(user.clone()),
            None => Session::anonymous(),
        }
    }

    /// Returns whether the token was known.
    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

/// The caller's session, resolved from the bearer token if any.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: Option<String>,
    pub session: Session,
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[axum::async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<ApiState>) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts);
        let session = match &token {
            Some(token) => state.sessions.resolve(token).await,
            None => Session::anonymous(),
        };
        Ok(Self { token, session })
    }
}
