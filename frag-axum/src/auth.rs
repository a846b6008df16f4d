//! HTTP Basic authentication.
//!
//! Credentials are verified against bcrypt hashes; the authenticated email
//! never travels further than this module. Routes see only the derived
//! [`Owner`] id, a hex-encoded SHA-256 of the email.

use std::collections::HashMap;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::response::error_body;
use crate::AppState;

/// Registered users: email → bcrypt password hash.
#[derive(Debug, Default)]
pub struct BasicUsers {
    users: HashMap<String, String>,
}

impl BasicUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with an already-computed bcrypt hash (htpasswd-style).
    pub fn insert_hashed<E, H>(&mut self, email: E, hash: H)
    where
        E: Into<String>,
        H: Into<String>,
    {
        self.users.insert(email.into(), hash.into());
    }

    /// Register a user from a plaintext password, hashing it at the given
    /// bcrypt cost.
    pub fn insert(
        &mut self,
        email: &str,
        password: &str,
        cost: u32,
    ) -> Result<(), bcrypt::BcryptError> {
        let hash = bcrypt::hash(password, cost)?;
        self.insert_hashed(email, hash);
        Ok(())
    }

    /// Parse htpasswd-format content: one `email:bcrypt-hash` per line,
    /// blank lines and `#` comments skipped. Malformed lines are logged and
    /// skipped rather than rejected.
    pub fn from_htpasswd(contents: &str) -> Self {
        let mut users = Self::new();
        for (number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once(':') {
                Some((email, hash)) if !email.is_empty() && !hash.is_empty() => {
                    users.insert_hashed(email, hash);
                }
                _ => warn!(line = number + 1, "skipping malformed htpasswd line"),
            }
        }
        users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Check a plaintext password against the stored hash for `email`.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        let Some(hash) = self.users.get(email) else {
            return false;
        };
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

/// The authenticated principal's opaque owner id, inserted as a request
/// extension by [`require_basic_auth`].
#[derive(Debug, Clone)]
pub struct Owner(pub String);

/// Derive the opaque owner id for an email address.
pub fn owner_id(email: &str) -> String {
    hex::encode(Sha256::digest(email.as_bytes()))
}

/// Middleware guarding the `/v1` routes. Missing or invalid credentials get
/// the 401 envelope; on success the [`Owner`] extension is attached.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, &request) {
        Some(owner) => {
            request.extensions_mut().insert(owner);
            next.run(request).await
        }
        None => unauthorized(),
    }
}

fn authenticate(state: &AppState, request: &Request) -> Option<Owner> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;

    if !state.users.verify(email, password) {
        debug!(email, "rejected credentials");
        return None;
    }
    Some(Owner(owner_id(email)))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"fragments\"")],
        Json(error_body(401, "Unauthorized")),
    )
        .into_response()
}
