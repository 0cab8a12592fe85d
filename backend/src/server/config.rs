//! HTTP server configuration assembled from the environment.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration from explicit values.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }

    /// Assemble the configuration from the environment.
    ///
    /// - `SESSION_KEY_FILE`: path to the session signing key
    ///   (default `/var/run/secrets/session_key`). When the file is missing a
    ///   temporary key is generated, but only in debug builds or when
    ///   `SESSION_ALLOW_EPHEMERAL=1`; production refuses to start without one.
    /// - `SESSION_COOKIE_SECURE`: set to `0` to allow plain-HTTP cookies.
    /// - `BIND_ADDR`: listen address (default `0.0.0.0:8000`).
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the key file is unreadable in a
    /// production build or `BIND_ADDR` does not parse.
    pub fn from_env() -> std::io::Result<Self> {
        let key_path =
            env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
        let key = match std::fs::read(&key_path) {
            Ok(bytes) => Key::derive_from(&bytes),
            Err(e) => {
                let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                    Key::generate()
                } else {
                    return Err(std::io::Error::other(format!(
                        "failed to read session key at {key_path}: {e}"
                    )));
                }
            }
        };

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".into())
            .parse()
            .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

        Ok(Self::new(key, cookie_secure, SameSite::Lax, bind_addr))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
