//! Driving port for signup, login, and identity lookup.
//!
//! Inbound adapters authenticate against this port without knowing which
//! store backs it, so handler tests can substitute a double and the HTTP
//! layer stays free of storage concerns.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, Password, Registration, User, UserId};

/// Domain use-case port for the user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Create a new user from a validated registration.
    ///
    /// # Errors
    /// [`ErrorCode::DuplicateEmail`](crate::domain::ErrorCode::DuplicateEmail)
    /// when the email is already a directory key; the directory is left
    /// untouched in that case.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Exact-match credential check.
    ///
    /// # Errors
    /// [`ErrorCode::InvalidCredentials`](crate::domain::ErrorCode::InvalidCredentials)
    /// unless a user with exactly this email and password exists.
    async fn authenticate(&self, email: &EmailAddress, password: &Password)
        -> Result<User, Error>;

    /// Resolve a session-stored id back to its user.
    ///
    /// # Errors
    /// [`ErrorCode::NotAuthenticated`](crate::domain::ErrorCode::NotAuthenticated)
    /// when no such user exists; a session naming a vanished user is treated
    /// as no session at all.
    async fn find_user(&self, id: &UserId) -> Result<User, Error>;
}
