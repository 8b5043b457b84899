/// Like handler - authoritative like counting for `POST /blog/like/{postId}`
use actix_web::{web, HttpResponse};

use crate::clients::LikeResponse;
use crate::error::{AppError, Result};
use crate::middleware::AdminMode;
use crate::views::parse_post_id;
use crate::AppState;

pub async fn like_post(
    state: web::Data<AppState>,
    admin: AdminMode,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_post_id(&post_id)
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;
    let post = state.posts.register_like(id, admin.is_admin())?;
    tracing::debug!(post_id = id, likes = post.likes, "like recorded");
    Ok(HttpResponse::Ok().json(LikeResponse { post }))
}
