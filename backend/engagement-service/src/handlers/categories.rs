use super::{AppState, AuthenticatedUser};
use crate::error::Result;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub key: String,
    pub name: String,
    pub emoji: String,
    pub color: String,
    pub scope: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub emoji: String,
    pub color: String,
    pub is_displayed: bool,
}

/// Cached category list, public read
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse> {
    let categories = state.reference.categories().await?;

    Ok(HttpResponse::Ok().json(categories))
}

/// Create a category. Gateway restricts these write routes to
/// moderators; the write invalidates the cached list.
pub async fn create_category(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    req: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse> {
    let category = state
        .reference
        .create_category(
            &req.key,
            &req.name,
            &req.emoji,
            &req.color,
            req.scope.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(category))
}

/// Update a category and invalidate the cached list
pub async fn update_category(
    state: web::Data<AppState>,
    category_id: web::Path<i64>,
    _user: AuthenticatedUser,
    req: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse> {
    match state
        .reference
        .update_category(
            *category_id,
            &req.name,
            &req.emoji,
            &req.color,
            req.is_displayed,
        )
        .await?
    {
        Some(category) => Ok(HttpResponse::Ok().json(category)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete a category and invalidate the cached list
pub async fn delete_category(
    state: web::Data<AppState>,
    category_id: web::Path<i64>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse> {
    if state.reference.delete_category(*category_id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}
