// SPDX-License-Identifier: MIT
//! Session and demo-credential handling.
//!
//! Demo-grade by design: a fixed in-memory credential map, plaintext
//! comparison, and opaque tokens minted as base64 of "username:password".
//! Sessions live for the process lifetime; logout is the only revocation.

use base64::Engine as _;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::ApiError;

/// Role attached to a session at login, derived from the username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    Admin,
    Teacher,
    Student,
}

impl SessionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionRole::Admin => "admin",
            SessionRole::Teacher => "teacher",
            SessionRole::Student => "student",
        }
    }

    /// Usernames containing "student" are students, "teacher" is the
    /// teacher, everything else is an admin.
    fn from_username(username: &str) -> Self {
        if username.contains("student") {
            SessionRole::Student
        } else if username == "teacher" {
            SessionRole::Teacher
        } else {
            SessionRole::Admin
        }
    }
}

/// An authenticated session record.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: SessionRole,
    /// ISO-8601 timestamp of the login.
    pub created_at: String,
}

/// In-memory session registry keyed by opaque token.
pub struct SessionStore {
    credentials: HashMap<String, String>,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Build the store with the fixed demo credential set.
    ///
    /// `admin_password` comes from config so deployments can at least
    /// change the default; the other demo accounts are fixed.
    pub fn new(admin_password: &str) -> Self {
        let mut credentials = HashMap::new();
        credentials.insert("admin".to_string(), admin_password.to_string());
        credentials.insert("student1".to_string(), "password".to_string());
        credentials.insert("teacher".to_string(), "password".to_string());
        Self {
            credentials,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Check credentials and mint a session.
    ///
    /// Failed attempts never create a session. A repeated login for the
    /// same user re-issues the same token (it is derived, not random) and
    /// refreshes the stored record.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let known = self.credentials.get(username);
        if known.map(String::as_str) != Some(password) {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = mint_token(username, password);
        let session = Session {
            token: token.clone(),
            username: username.to_string(),
            role: SessionRole::from_username(username),
            created_at: Utc::now().to_rfc3339(),
        };
        self.sessions.write().await.insert(token, session.clone());
        Ok(session)
    }

    /// Remove the session for `token`. Unknown tokens are a no-op so a
    /// repeated logout returns the same success message.
    pub async fn logout(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Look up the session for a bearer token.
    pub async fn get(&self, token: &str) -> Option<Session> {
        self.sessions.read().await.get(token).cloned()
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Opaque token: base64("username:password"). Not a security boundary,
/// just an unguessable-enough handle for the demo credential set.
fn mint_token(username: &str, password: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"))
}
