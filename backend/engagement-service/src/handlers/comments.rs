use super::{AppState, AuthenticatedUser};
use crate::error::Result;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent_id: Option<Uuid>,
}

/// Create a comment on a feed, optionally as a reply to a top-level
/// comment
pub async fn create_comment(
    state: web::Data<AppState>,
    feed_id: web::Path<Uuid>,
    user: AuthenticatedUser,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let comment = state
        .comments
        .create(user.0, *feed_id, req.parent_id, &req.content)
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Delete the caller's own comment
pub async fn delete_comment(
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    state.comments.delete(user.0, *comment_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
