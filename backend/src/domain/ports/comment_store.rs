//! Driving port for the shared comment thread.
//!
//! All connections observe one thread instance; implementations must apply
//! each operation atomically so a write is visible to every subsequent read
//! from any connection.

use async_trait::async_trait;

use crate::domain::{Comment, CommentIndex, DisplayName, Error, QuestionSnapshot, StyleRun};

/// Domain use-case port for reading and mutating the comment thread.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Point-in-time view of the question and its ordered comments.
    async fn question(&self) -> Result<QuestionSnapshot, Error>;

    /// Canonicalise the runs and append the comment to the thread.
    ///
    /// The author snapshot is taken by the caller from the signed-in user at
    /// posting time.
    ///
    /// # Errors
    /// Propagates canonicaliser contract violations; nothing is appended on
    /// failure.
    async fn post_comment(&self, author: &DisplayName, runs: &[StyleRun])
        -> Result<Comment, Error>;

    /// Delete exactly one comment by ordinal; remaining comments keep their
    /// relative order.
    ///
    /// # Errors
    /// [`ErrorCode::IndexOutOfRange`](crate::domain::ErrorCode::IndexOutOfRange)
    /// when the ordinal does not resolve against the current thread length.
    async fn remove_comment(&self, index: CommentIndex) -> Result<Comment, Error>;
}
