//! Member domain type.

use cart_core::{Email, MemberId};

/// A registered member.
///
/// Credentials are compared against the Basic-Auth header on every request;
/// there is no session or token issuance.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: MemberId,
    pub email: Email,
    password: String,
}

impl Member {
    /// Construct a member from persisted fields.
    #[must_use]
    pub const fn new(id: MemberId, email: Email, password: String) -> Self {
        Self {
            id,
            email,
            password,
        }
    }

    /// Compare a presented password against the stored one.
    ///
    /// Passwords are stored and compared as plaintext. This is a known
    /// weakness kept for compatibility with existing member data, not a
    /// design feature.
    #[must_use]
    pub fn verify_password(&self, presented: &str) -> bool {
        self.password == presented
    }
}
