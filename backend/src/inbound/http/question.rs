//! Question page handlers.
//!
//! ```text
//! GET    /api/v1/question
//! POST   /api/v1/question/comments {"runs":[{"text":"Hi","styles":["bold"]}]}
//! DELETE /api/v1/question/comments/{index}
//! ```
//!
//! Reading is open to anonymous connections; posting requires a session so
//! the comment can be stamped with the signed-in display name. Removal
//! addresses comments by ordinal, negative ordinals counting from the end.

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ApiResult, Comment, CommentIndex, Error, QuestionSnapshot, StyleRun, StyleSet,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One span of comment text with its active styles, as sent by the editor.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StyleRunDto {
    /// Literal text of the span.
    pub text: String,
    /// Style names drawn from `bold`, `italic`, `strike`, `underline`.
    #[serde(default)]
    pub styles: Vec<String>,
}

impl TryFrom<StyleRunDto> for StyleRun {
    type Error = Error;

    fn try_from(value: StyleRunDto) -> Result<Self, Self::Error> {
        let mut styles = StyleSet::EMPTY;
        for raw in &value.styles {
            styles.insert(raw.parse().map_err(Error::from)?);
        }
        Self::new(value.text, styles).map_err(Error::from)
    }
}

/// Comment submission body for `POST /api/v1/question/comments`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CommentRequest {
    /// Ordered spans exactly as typed.
    pub runs: Vec<StyleRunDto>,
}

/// One rendered comment as shown in the thread.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Display name of the author at posting time.
    pub author: String,
    /// Canonical markup body.
    pub body_markup: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            author: comment.author().as_ref().to_owned(),
            body_markup: comment.body_markup().to_owned(),
        }
    }
}

/// The question page payload.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    /// Question header.
    pub title: String,
    /// Plain-text question body.
    pub body: String,
    /// Comments in insertion order.
    pub comments: Vec<CommentResponse>,
}

impl From<QuestionSnapshot> for QuestionResponse {
    fn from(snapshot: QuestionSnapshot) -> Self {
        Self {
            title: snapshot.question.title().to_owned(),
            body: snapshot.question.body().to_owned(),
            comments: snapshot
                .comments
                .into_iter()
                .map(CommentResponse::from)
                .collect(),
        }
    }
}

/// Fetch the question and its comment thread.
///
/// Open to anonymous connections; always reflects the latest committed
/// write from any session.
#[utoipa::path(
    get,
    path = "/api/v1/question",
    responses(
        (status = 200, description = "Question with comments", body = QuestionResponse),
        (status = 500, description = "Internal server error")
    ),
    tags = ["question"],
    operation_id = "getQuestion",
    security([])
)]
#[get("/question")]
pub async fn get_question(state: web::Data<HttpState>) -> ApiResult<web::Json<QuestionResponse>> {
    let snapshot = state.comments.question().await?;
    Ok(web::Json(QuestionResponse::from(snapshot)))
}

/// Post a comment as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/question/comments",
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment appended", body = CommentResponse),
        (status = 400, description = "Invalid request or style", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["question"],
    operation_id = "postComment"
)]
#[post("/question/comments")]
pub async fn post_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let author = state.directory.find_user(&user_id).await?;

    let runs = payload
        .into_inner()
        .runs
        .into_iter()
        .map(StyleRun::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let comment = state
        .comments
        .post_comment(author.display_name(), &runs)
        .await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// Remove the comment at the given ordinal.
///
/// Negative ordinals count from the end: `-1` removes the newest comment.
#[utoipa::path(
    delete,
    path = "/api/v1/question/comments/{index}",
    params(
        ("index" = i64, Path, description = "Comment ordinal; negative counts from the end")
    ),
    responses(
        (status = 204, description = "Comment removed"),
        (status = 404, description = "No comment at this position", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["question"],
    operation_id = "removeComment",
    security([])
)]
#[delete("/question/comments/{index}")]
pub async fn remove_comment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let index = CommentIndex::new(path.into_inner());
    state.comments.remove_comment(index).await?;
    Ok(HttpResponse::NoContent().finish())
}
