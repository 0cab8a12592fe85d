//! Driving ports consumed by inbound adapters.
//!
//! In hexagonal terms these are the use-case seams: HTTP handlers depend on
//! the traits here, and `outbound::memory` provides the process-wide
//! implementation.

pub mod comment_store;
pub mod user_directory;

pub use comment_store::CommentStore;
pub use user_directory::UserDirectory;
