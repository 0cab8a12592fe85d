//! Domain primitives and aggregates.
//!
//! Purpose: define the strongly typed entities shared by the HTTP adapter and
//! the in-memory store. Types are immutable value objects; invariants and
//! serde contracts live in each type's Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic failure payload.
//! - `User` and its validation newtypes — directory identities.
//! - `Question`, `Comment`, `CommentIndex` — the shared thread.
//! - `Style`, `StyleRun`, `render_markup` — the markup canonicaliser.
//! - `ports` — use-case traits implemented by `outbound::memory`.

pub mod error;
pub mod ports;
pub mod question;
pub mod richtext;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::question::{
    Comment, CommentIndex, Question, QuestionSnapshot, QuestionValidationError,
};
pub use self::richtext::{
    render_markup, RichTextError, Style, StyleRun, StyleSet, CONTAINER_TAG,
};
pub use self::user::{
    DisplayName, EmailAddress, Password, Registration, User, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_authenticated("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
