/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use super::ConfirmQuery;
use crate::error::{AppError, Result};
use crate::middleware::AdminMode;
use crate::models::{PostDraft, PostPatch};
use crate::services::PreConfirmed;
use crate::store::Lookup;
use crate::views::{lookup_post_param, parse_post_id, search_param, ArticleListView, PostDetail};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub q: Option<String>,
    pub tag: Option<String>,
    pub page: Option<usize>,
}

/// List visible posts, filtered and paginated
pub async fn list_posts(
    state: web::Data<AppState>,
    admin: AdminMode,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let posts = state.posts.store().snapshot();
    let mut view = ArticleListView::new(state.settings.page_size);
    view.set_query(query.q.as_deref().and_then(search_param));
    view.set_tag(query.tag.as_deref().and_then(search_param));

    if let Some(page) = query.page {
        let total = view.total_pages(&posts, admin.is_admin());
        view.go_to_page(page, total);
    }

    Ok(HttpResponse::Ok().json(view.compute(&posts, admin.is_admin())))
}

/// Get a post with its table of contents
pub async fn get_post(
    state: web::Data<AppState>,
    admin: AdminMode,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    match lookup_post_param(state.posts.store(), &post_id, admin.is_admin()) {
        Lookup::Found(post) => Ok(HttpResponse::Ok().json(PostDetail::new(post))),
        Lookup::NotFound => Err(AppError::NotFound(format!("post {}", post_id))),
        Lookup::Loading => Err(AppError::Unavailable(
            "content is still loading".to_string(),
        )),
    }
}

/// Create a new post
pub async fn create_post(
    state: web::Data<AppState>,
    admin: AdminMode,
    req: web::Json<PostDraft>,
) -> Result<HttpResponse> {
    admin.require()?;
    let post = state.posts.create_post(req.into_inner())?;
    Ok(HttpResponse::Created().json(post))
}

/// Merge the supplied fields into an existing post
pub async fn update_post(
    state: web::Data<AppState>,
    admin: AdminMode,
    post_id: web::Path<String>,
    req: web::Json<PostPatch>,
) -> Result<HttpResponse> {
    admin.require()?;
    let id = parse_post_id(&post_id)
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;
    let post = state.posts.update_post(id, &req)?;
    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post; without `confirm=true` nothing is removed
pub async fn delete_post(
    state: web::Data<AppState>,
    admin: AdminMode,
    post_id: web::Path<String>,
    query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse> {
    admin.require()?;
    let id = parse_post_id(&post_id)
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;
    if state.posts.store().get(id).is_none() {
        return Err(AppError::NotFound(format!("post {}", id)));
    }

    match state.posts.delete_post(id, &PreConfirmed(query.confirm)) {
        Some(post) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "deleted": true,
            "post": post,
        }))),
        None => {
            info!(post_id = id, "delete not confirmed");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "deleted": false,
                "id": id,
            })))
        }
    }
}
