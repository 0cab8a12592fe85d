//! Backend for a single-question comment board.
//!
//! One fixed question, session-authenticated signup/login, and a shared
//! comment thread whose bodies are produced by the markup canonicaliser in
//! [`domain::richtext`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped trace-id middleware.
pub use middleware::Trace;
