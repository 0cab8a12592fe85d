//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::web;

use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state backed by the seeded example thread.
pub fn seeded_state() -> web::Data<HttpState> {
    let store = Arc::new(MemoryStore::with_example_thread().expect("seeded store"));
    web::Data::new(HttpState::new(store.clone(), store))
}
