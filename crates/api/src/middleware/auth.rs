//! Basic-Auth extractor resolving the current member.
//!
//! Replaces an interceptor + request-scoped holder with an axum extractor:
//! handlers that take [`AuthMember`] get the resolved [`Member`] injected,
//! and any parse or credential failure short-circuits into a 401 before the
//! handler body runs.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn list_cart(AuthMember(member): AuthMember) -> impl IntoResponse {
//!     format!("cart of {}", member.email)
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use cart_core::Email;

use crate::db::{MemberRepository, RepositoryError};
use crate::error::AppError;
use crate::models::Member;
use crate::state::AppState;

/// Authentication failures. All map to 401 except repository errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header on the request.
    #[error("missing authorization header")]
    MissingHeader,

    /// The header does not use the `Basic` scheme.
    #[error("authorization scheme must be Basic")]
    InvalidScheme,

    /// The Basic payload is not valid base64 or UTF-8.
    #[error("malformed basic authorization payload")]
    MalformedPayload,

    /// The decoded payload has no `email:password` separator.
    #[error("credentials must be email:password")]
    MalformedCredentials,

    /// The email or password is wrong. One message for both cases so the
    /// response does not reveal which member emails exist.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Looking up the member failed.
    #[error("credential lookup failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Parsed `email:password` pair from a Basic authorization header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse the value of an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the scheme is not `Basic`, the payload
    /// is not base64-encoded UTF-8, or the decoded text has no colon.
    pub fn parse(header_value: &str) -> Result<Self, AuthError> {
        // Scheme names are case-insensitive (RFC 7235).
        let (scheme, payload) = header_value
            .split_once(' ')
            .ok_or(AuthError::InvalidScheme)?;
        if !scheme.eq_ignore_ascii_case("Basic") {
            return Err(AuthError::InvalidScheme);
        }

        let decoded = BASE64
            .decode(payload.trim())
            .map_err(|_| AuthError::MalformedPayload)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedPayload)?;

        // Passwords may contain colons; split on the first one only.
        let (email, password) = decoded
            .split_once(':')
            .ok_or(AuthError::MalformedCredentials)?;

        Ok(Self {
            email: email.to_owned(),
            password: password.to_owned(),
        })
    }
}

/// Extractor that requires Basic-Auth member credentials.
///
/// Parses the header, resolves the member row, and compares the password.
pub struct AuthMember(pub Member);

impl FromRequestParts<AppState> for AuthMember {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::MissingHeader)?;

        let credentials = BasicCredentials::parse(header_value)?;

        // A structurally invalid email can never match a stored member.
        let email =
            Email::parse(&credentials.email).map_err(|_| AuthError::InvalidCredentials)?;

        let member = MemberRepository::new(state.pool())
            .get_by_email(&email)
            .await
            .map_err(AuthError::Repository)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !member.verify_password(&credentials.password) {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(Self(member))
    }
}
