//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and wire schema. The generated
//! specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Style};
use crate::inbound::http::question::{
    CommentRequest, CommentResponse, QuestionResponse, StyleRunDto,
};
use crate::inbound::http::users::{LoginRequest, SessionUserResponse, SignupRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/signup or /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Question board backend API",
        description = "Single-question comment board with session authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::me,
        crate::inbound::http::question::get_question,
        crate::inbound::http::question::post_comment,
        crate::inbound::http::question::remove_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Style,
        SignupRequest,
        LoginRequest,
        SessionUserResponse,
        CommentRequest,
        StyleRunDto,
        CommentResponse,
        QuestionResponse,
    )),
    tags(
        (name = "users", description = "Accounts and sessions"),
        (name = "question", description = "The question page and its comments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
