use super::{AppState, AuthenticatedUser};
use crate::domain::models::ContentRef;
use crate::error::Result;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ReportRequest {
    pub reason: String,
}

/// Toggle the caller's like on a feed
pub async fn toggle_feed_like(
    state: web::Data<AppState>,
    feed_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let toggle = state
        .engagement
        .toggle_like(user.0, ContentRef::feed(*feed_id))
        .await?;

    Ok(HttpResponse::Ok().json(toggle))
}

/// Toggle the caller's like on a comment
pub async fn toggle_comment_like(
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let toggle = state
        .engagement
        .toggle_like(user.0, ContentRef::comment(*comment_id))
        .await?;

    Ok(HttpResponse::Ok().json(toggle))
}

/// Report a feed
pub async fn report_feed(
    state: web::Data<AppState>,
    feed_id: web::Path<Uuid>,
    user: AuthenticatedUser,
    req: web::Json<ReportRequest>,
) -> Result<HttpResponse> {
    let report = state
        .engagement
        .submit_report(user.0, ContentRef::feed(*feed_id), &req.reason)
        .await?;

    Ok(HttpResponse::Created().json(report))
}

/// Report a comment
pub async fn report_comment(
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
    user: AuthenticatedUser,
    req: web::Json<ReportRequest>,
) -> Result<HttpResponse> {
    let report = state
        .engagement
        .submit_report(user.0, ContentRef::comment(*comment_id), &req.reason)
        .await?;

    Ok(HttpResponse::Created().json(report))
}

/// Counters plus the viewer's relation state for a feed
pub async fn feed_engagement(
    state: web::Data<AppState>,
    feed_id: web::Path<Uuid>,
    user: Option<AuthenticatedUser>,
) -> Result<HttpResponse> {
    let engagement = state
        .engagement
        .feed_engagement(*feed_id, user.map(|u| u.0))
        .await?;

    Ok(HttpResponse::Ok().json(engagement))
}

/// Counters plus the viewer's relation state for a comment
pub async fn comment_engagement(
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
    user: Option<AuthenticatedUser>,
) -> Result<HttpResponse> {
    let engagement = state
        .engagement
        .comment_engagement(*comment_id, user.map(|u| u.0))
        .await?;

    Ok(HttpResponse::Ok().json(engagement))
}
