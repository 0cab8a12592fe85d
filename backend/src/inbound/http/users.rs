//! Account and session handlers.
//!
//! ```text
//! POST /api/v1/signup {"displayName":"Alice A.","email":"alice_2002@gmail.com","password":"aaa"}
//! POST /api/v1/login  {"email":"alice_2002@gmail.com","password":"aaa"}
//! POST /api/v1/logout
//! GET  /api/v1/me
//! ```
//!
//! Signup and login bind the authenticated user to this connection's session
//! cookie; every other connection stays anonymous until it authenticates on
//! its own.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{
    ApiResult, EmailAddress, Error, Password, Registration, User, UserValidationError,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Signup request body for `POST /api/v1/signup`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Name shown next to the user's comments.
    pub display_name: String,
    /// Unique, case-sensitive directory key.
    pub email: String,
    /// Exact-match credential.
    pub password: String,
}

impl TryFrom<SignupRequest> for Registration {
    type Error = UserValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Ok(Self::new(
            value.display_name.try_into()?,
            value.email.try_into()?,
            Password::new(value.password)?,
        ))
    }
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Directory key, compared case-sensitively.
    pub email: String,
    /// Exact-match credential.
    pub password: String,
}

/// Identity of the signed-in user as rendered in the page header.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserResponse {
    /// Stable user identifier.
    pub id: String,
    /// Name shown next to the user's comments.
    pub display_name: String,
}

impl From<&User> for SessionUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            display_name: user.display_name().as_ref().to_owned(),
        }
    }
}

/// Register a new user and establish a session.
///
/// On a duplicate email nothing is created and the connection stays
/// anonymous.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created and session established", body = SessionUserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<SessionUserResponse>> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let user = state.directory.register(registration).await?;
    session.persist_user(user.id())?;
    info!(user_id = %user.id(), "signup established a session");
    Ok(web::Json(SessionUserResponse::from(&user)))
}

/// Authenticate a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionUserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionUserResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let email = EmailAddress::new(email).map_err(map_user_validation_error)?;
    let password = Password::new(password).map_err(map_user_validation_error)?;
    let user = state.directory.authenticate(&email, &password).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(SessionUserResponse::from(&user)))
}

/// Drop the session and return the connection to the anonymous state.
///
/// Logging out an anonymous connection is a no-op rather than an error.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session dropped (or none existed)")
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.forget_user();
    HttpResponse::NoContent().finish()
}

/// Identity of the currently signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Signed-in identity", body = SessionUserResponse),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "me"
)]
#[get("/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SessionUserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.directory.find_user(&user_id).await?;
    Ok(web::Json(SessionUserResponse::from(&user)))
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let field = match err {
        UserValidationError::EmptyDisplayName | UserValidationError::DisplayNameTooLong { .. } => {
            "displayName"
        }
        UserValidationError::InvalidEmail => "email",
        UserValidationError::EmptyPassword => "password",
        UserValidationError::InvalidId => "id",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}
