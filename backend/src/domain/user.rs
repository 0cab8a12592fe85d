//! User identity model.
//!
//! Strongly typed wrappers validate once at the boundary so the directory and
//! handlers can pass identities around without re-checking. Passwords are
//! exact-match opaque secrets; they never appear in serialised output and are
//! wiped from memory when dropped.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroize;

/// Validation errors raised by the identity newtypes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The id was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Display name empty once trimmed.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// Display name over the length cap.
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong {
        /// The enforced maximum length.
        max: usize,
    },
    /// Email did not look like `local@domain`.
    #[error("email address must look like local@domain")]
    InvalidEmail,
    /// Empty password.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Stable user identifier backed by a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    ///
    /// # Errors
    /// Returns [`UserValidationError::InvalidId`] for anything but a UUID.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let parsed = Uuid::parse_str(id.as_ref()).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a fresh random id for a new signup.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Human readable name shown next to the user's comments.
///
/// Kept permissive on purpose: real names such as `Alice A.` must pass, so
/// only emptiness and length are enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    ///
    /// # Errors
    /// Returns a [`UserValidationError`] when empty once trimmed or longer
    /// than [`DISPLAY_NAME_MAX`] characters.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if display_name.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only; the directory key is the exact, case-sensitive
        // string as entered.
        let pattern = r"^[^@\s]+@[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address used as the unique, case-sensitive directory key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Errors
    /// Returns [`UserValidationError::InvalidEmail`] when the value does not
    /// match the `local@domain` shape.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque exact-match credential.
///
/// Never serialised; the backing memory is zeroed when the value drops and
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Validate and construct a [`Password`].
    ///
    /// # Errors
    /// Returns [`UserValidationError::EmptyPassword`] for an empty value.
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = password.into();
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(password))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Validated signup payload handed to the user directory.
#[derive(Debug, Clone)]
pub struct Registration {
    display_name: DisplayName,
    email: EmailAddress,
    password: Password,
}

impl Registration {
    /// Bundle validated signup components.
    pub fn new(display_name: DisplayName, email: EmailAddress, password: Password) -> Self {
        Self {
            display_name,
            email,
            password,
        }
    }

    /// Name the new account will display.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Unique directory key for the new account.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Credential for subsequent logins.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Decompose into parts for storage.
    pub fn into_parts(self) -> (DisplayName, EmailAddress, Password) {
        (self.display_name, self.email, self.password)
    }
}

/// Application user as seen outside the directory.
///
/// ## Invariants
/// - `id` is a valid UUID.
/// - `email` is unique within the directory for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "Alice A.")]
    display_name: DisplayName,
    #[schema(value_type = String, example = "alice_2002@gmail.com")]
    email: EmailAddress,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, display_name: DisplayName, email: EmailAddress) -> Self {
        Self {
            id,
            display_name,
            email,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name shown next to the user's comments.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Unique directory key.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}
