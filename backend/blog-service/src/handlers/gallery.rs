/// Gallery handlers
use actix_web::{web, HttpResponse};

use super::ConfirmQuery;
use crate::error::{AppError, Result};
use crate::middleware::AdminMode;
use crate::models::{GalleryDraft, GalleryPatch};
use crate::services::PreConfirmed;
use crate::AppState;

pub async fn list_gallery(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.gallery.list()))
}

pub async fn create_gallery_image(
    state: web::Data<AppState>,
    admin: AdminMode,
    req: web::Json<GalleryDraft>,
) -> Result<HttpResponse> {
    admin.require()?;
    let image = state.gallery.create_image(req.into_inner())?;
    Ok(HttpResponse::Created().json(image))
}

pub async fn update_gallery_image(
    state: web::Data<AppState>,
    admin: AdminMode,
    image_id: web::Path<i64>,
    req: web::Json<GalleryPatch>,
) -> Result<HttpResponse> {
    admin.require()?;
    let image_id = image_id.into_inner();
    if matches!(&req.title, Some(title) if title.trim().is_empty()) {
        return Err(AppError::Validation("title is required".to_string()));
    }
    let image = state
        .gallery
        .update_image(image_id, &req)
        .ok_or_else(|| AppError::NotFound(format!("image {}", image_id)))?;
    Ok(HttpResponse::Ok().json(image))
}

pub async fn delete_gallery_image(
    state: web::Data<AppState>,
    admin: AdminMode,
    image_id: web::Path<i64>,
    query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse> {
    admin.require()?;
    let image_id = image_id.into_inner();
    if state.gallery.store().get(image_id).is_none() {
        return Err(AppError::NotFound(format!("image {}", image_id)));
    }

    let removed = state
        .gallery
        .delete_image(image_id, &PreConfirmed(query.confirm));
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "deleted": removed.is_some(),
        "id": image_id,
    })))
}
