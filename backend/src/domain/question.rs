//! The single question resource and its comment thread.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::DisplayName;

/// Validation errors raised by [`Question::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionValidationError {
    /// Title empty once trimmed.
    #[error("question title must not be empty")]
    EmptyTitle,
    /// Body empty once trimmed.
    #[error("question body must not be empty")]
    EmptyBody,
}

/// The one discussion subject this backend serves.
///
/// Exactly one instance exists for the process lifetime and it is read-only
/// to every client; only its comment thread changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    title: String,
    body: String,
}

impl Question {
    /// Validate and construct the question resource.
    ///
    /// # Errors
    /// Returns a [`QuestionValidationError`] when either field is empty once
    /// trimmed.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, QuestionValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuestionValidationError::EmptyTitle);
        }
        let body = body.into();
        if body.trim().is_empty() {
            return Err(QuestionValidationError::EmptyBody);
        }
        Ok(Self { title, body })
    }

    /// Header shown above the question body.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Plain-text question body.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }
}

/// One entry in the question's comment thread.
///
/// The author is a display-name snapshot taken when the comment was posted;
/// `body_markup` is canonical output of
/// [`render_markup`](super::richtext::render_markup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[schema(value_type = String, example = "Alice A.")]
    author: DisplayName,
    #[schema(example = "<span>Test comment 1</span>")]
    body_markup: String,
}

impl Comment {
    /// Build a comment from an author snapshot and rendered markup.
    pub fn new(author: DisplayName, body_markup: String) -> Self {
        Self {
            author,
            body_markup,
        }
    }

    /// Display name of the user who posted the comment.
    pub fn author(&self) -> &DisplayName {
        &self.author
    }

    /// Canonical markup body.
    pub fn body_markup(&self) -> &str {
        self.body_markup.as_str()
    }
}

/// Point-in-time view of the question plus its ordered comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSnapshot {
    /// The fixed question resource.
    pub question: Question,
    /// Comments in insertion order at the time of the read.
    pub comments: Vec<Comment>,
}

/// Ordinal position of a comment in the thread.
///
/// Negative values count from the end, so `-1` addresses the newest comment
/// and `-2` the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentIndex(i64);

impl CommentIndex {
    /// Wrap a raw ordinal as supplied by the client.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw ordinal as supplied.
    pub fn raw(self) -> i64 {
        self.0
    }

    /// Resolve the ordinal against the current thread length.
    ///
    /// Returns `None` when the ordinal falls outside `0..len` after negative
    /// indices are shifted by `len`. Resolution happens before any mutation so
    /// an out-of-range removal leaves the thread untouched.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::CommentIndex;
    ///
    /// assert_eq!(CommentIndex::new(-1).resolve(3), Some(2));
    /// assert_eq!(CommentIndex::new(3).resolve(3), None);
    /// ```
    pub fn resolve(self, len: usize) -> Option<usize> {
        let len = i64::try_from(len).ok()?;
        let absolute = if self.0 < 0 { self.0 + len } else { self.0 };
        if (0..len).contains(&absolute) {
            usize::try_from(absolute).ok()
        } else {
            None
        }
    }
}

impl From<i64> for CommentIndex {
    fn from(raw: i64) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests;
