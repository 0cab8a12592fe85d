//! Server harness shared by the HTTP integration suites.
//!
//! Owns a single-threaded Tokio runtime plus a `LocalSet` because Actix uses
//! `spawn_local` internally. The server is stopped on drop even if a test
//! panics. Each [`Browser`] keeps its own cookie jar, simulating independent
//! browser connections against the one shared backend process.

use std::net::TcpListener;
use std::sync::Arc;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{time::Duration as CookieDuration, Key, SameSite};
use actix_web::dev::ServerHandle;
use actix_web::http::header;
use actix_web::{web, App, HttpServer};
use serde_json::{json, Value};
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use backend::inbound::http::question::{get_question, post_comment, remove_comment};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{login, logout, me, signup};
use backend::outbound::memory::MemoryStore;
use backend::Trace;

pub struct TestBackend {
    runtime: Runtime,
    local: LocalSet,
    base_url: String,
    server: ServerHandle,
}

impl TestBackend {
    /// Spawn a backend over the seeded example thread.
    pub fn spawn_seeded() -> Self {
        let store = Arc::new(MemoryStore::with_example_thread().expect("seeded store"));
        Self::spawn(store)
    }

    /// Spawn a backend over the given store instance.
    pub fn spawn(store: Arc<MemoryStore>) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        let local = LocalSet::new();
        let (base_url, server) = local
            .block_on(&runtime, spawn_backend(store))
            .expect("server should start");
        Self {
            runtime,
            local,
            base_url,
            server,
        }
    }

    /// Open a fresh anonymous browser against this backend.
    pub fn browser(&self) -> Browser {
        Browser {
            base_url: self.base_url.clone(),
            cookie: None,
        }
    }

    /// Drive a client future to completion on the harness runtime.
    pub fn run<R, F>(&self, operation: F) -> R
    where
        F: std::future::Future<Output = R>,
    {
        self.local.block_on(&self.runtime, operation)
    }
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        let server = self.server.clone();
        self.local.block_on(&self.runtime, async move {
            server.stop(true).await;
        });
    }
}

fn test_session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

async fn spawn_backend(store: Arc<MemoryStore>) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(HttpState::new(store.clone(), store));

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(test_session_middleware(key.clone()))
            .service(signup)
            .service(login)
            .service(logout)
            .service(me)
            .service(get_question)
            .service(post_comment)
            .service(remove_comment);

        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

/// One simulated browser: a cookie jar over the shared backend.
pub struct Browser {
    base_url: String,
    cookie: Option<String>,
}

impl Browser {
    async fn send(
        &mut self,
        method: actix_web::http::Method,
        path: &str,
        payload: Option<Value>,
    ) -> (u16, Option<Value>) {
        let mut request =
            awc::Client::default().request(method, format!("{}{path}", self.base_url));
        if let Some(cookie) = &self.cookie {
            request = request.insert_header((header::COOKIE, cookie.clone()));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect("request sent"),
            None => request.send().await.expect("request sent"),
        };

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
        {
            let pair = set_cookie.split(';').next().expect("cookie pair").to_owned();
            self.cookie = Some(pair);
        }

        let status = response.status().as_u16();
        let body = response.body().await.expect("response body");
        let json = if body.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&body).expect("JSON body"))
        };
        (status, json)
    }

    pub async fn signup(&mut self, display_name: &str, email: &str, password: &str) -> u16 {
        let (status, _) = self
            .send(
                actix_web::http::Method::POST,
                "/api/v1/signup",
                Some(json!({
                    "displayName": display_name,
                    "email": email,
                    "password": password,
                })),
            )
            .await;
        status
    }

    pub async fn login(&mut self, email: &str, password: &str) -> u16 {
        let (status, _) = self
            .send(
                actix_web::http::Method::POST,
                "/api/v1/login",
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        status
    }

    pub async fn logout(&mut self) -> u16 {
        let (status, _) = self
            .send(actix_web::http::Method::POST, "/api/v1/logout", None)
            .await;
        status
    }

    /// Display name from `GET /api/v1/me`, or `None` when anonymous.
    pub async fn signed_in_name(&mut self) -> Option<String> {
        let (status, body) = self
            .send(actix_web::http::Method::GET, "/api/v1/me", None)
            .await;
        if status != 200 {
            return None;
        }
        body?
            .get("displayName")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    pub async fn post_runs(&mut self, runs: Value) -> u16 {
        let (status, _) = self
            .send(
                actix_web::http::Method::POST,
                "/api/v1/question/comments",
                Some(json!({ "runs": runs })),
            )
            .await;
        status
    }

    pub async fn post_text(&mut self, text: &str) -> u16 {
        self.post_runs(json!([{ "text": text }])).await
    }

    pub async fn remove(&mut self, index: i64) -> u16 {
        let (status, _) = self
            .send(
                actix_web::http::Method::DELETE,
                &format!("/api/v1/question/comments/{index}"),
                None,
            )
            .await;
        status
    }

    pub async fn question(&mut self) -> Value {
        let (status, body) = self
            .send(actix_web::http::Method::GET, "/api/v1/question", None)
            .await;
        assert_eq!(status, 200, "question read must succeed");
        body.expect("question body")
    }

    /// `(author, bodyMarkup)` pairs in thread order.
    pub async fn comments(&mut self) -> Vec<(String, String)> {
        self.question()
            .await
            .get("comments")
            .and_then(Value::as_array)
            .expect("comments array")
            .iter()
            .map(|comment| {
                (
                    comment
                        .get("author")
                        .and_then(Value::as_str)
                        .expect("author")
                        .to_owned(),
                    comment
                        .get("bodyMarkup")
                        .and_then(Value::as_str)
                        .expect("bodyMarkup")
                        .to_owned(),
                )
            })
            .collect()
    }
}
