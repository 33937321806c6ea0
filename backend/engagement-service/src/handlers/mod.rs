/// HTTP endpoints for engagement operations
///
/// Identity is resolved upstream (API gateway) and propagated as the
/// `x-user-id` header; handlers only translate requests into service
/// calls.
pub mod categories;
pub mod comments;
pub mod engagement;

use crate::error::AppError;
use crate::services::{CommentService, EngagementService, ReferenceDataService};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub engagement: EngagementService,
    pub comments: CommentService,
    pub reference: ReferenceDataService,
}

/// The authenticated actor, extracted from the gateway-set header.
/// Missing or malformed header means Unauthorized.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok());

        ready(match user_id {
            Some(id) => Ok(AuthenticatedUser(id)),
            None => Err(AppError::Unauthorized(
                "missing or invalid x-user-id header".into(),
            )),
        })
    }
}

/// Route table
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .route(
                "/feeds/{feed_id}/like",
                web::post().to(engagement::toggle_feed_like),
            )
            .route(
                "/feeds/{feed_id}/reports",
                web::post().to(engagement::report_feed),
            )
            .route(
                "/feeds/{feed_id}/engagement",
                web::get().to(engagement::feed_engagement),
            )
            .route(
                "/feeds/{feed_id}/comments",
                web::post().to(comments::create_comment),
            )
            .route(
                "/comments/{comment_id}/like",
                web::post().to(engagement::toggle_comment_like),
            )
            .route(
                "/comments/{comment_id}/reports",
                web::post().to(engagement::report_comment),
            )
            .route(
                "/comments/{comment_id}/engagement",
                web::get().to(engagement::comment_engagement),
            )
            .route(
                "/comments/{comment_id}",
                web::delete().to(comments::delete_comment),
            )
            .route("/categories", web::get().to(categories::list_categories))
            .route("/categories", web::post().to(categories::create_category))
            .route(
                "/categories/{category_id}",
                web::put().to(categories::update_category),
            )
            .route(
                "/categories/{category_id}",
                web::delete().to(categories::delete_category),
            ),
    );
}
