//! Shared HTTP adapter state.
//!
//! Handlers accept this bundle via `actix_web::web::Data` so they depend only
//! on the domain ports and remain testable against any implementation.

use std::sync::Arc;

use crate::domain::ports::{CommentStore, UserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup, login, and identity lookup.
    pub directory: Arc<dyn UserDirectory>,
    /// The shared comment thread.
    pub comments: Arc<dyn CommentStore>,
}

impl HttpState {
    /// Bundle the two ports.
    ///
    /// In production both arcs point at the same
    /// [`MemoryStore`](crate::outbound::memory::MemoryStore) instance, which
    /// is what gives every connection the same view of the thread.
    pub fn new(directory: Arc<dyn UserDirectory>, comments: Arc<dyn CommentStore>) -> Self {
        Self {
            directory,
            comments,
        }
    }
}
