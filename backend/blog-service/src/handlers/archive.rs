/// Archive and tag handlers
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::AdminMode;
use crate::views::{collect_tags, search_param, visible_posts, ArchiveView};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ArchiveQuery {
    pub tag: Option<String>,
}

/// Tags across visible posts, sorted
pub async fn list_tags(state: web::Data<AppState>, admin: AdminMode) -> Result<HttpResponse> {
    let tags = state
        .posts
        .store()
        .read(|posts| collect_tags(&visible_posts(posts, admin.is_admin())));
    Ok(HttpResponse::Ok().json(tags))
}

/// Posts grouped by year and month, optionally narrowed to one tag
pub async fn get_archive(
    state: web::Data<AppState>,
    admin: AdminMode,
    query: web::Query<ArchiveQuery>,
) -> Result<HttpResponse> {
    let mut view = ArchiveView::new();
    view.select_tag(query.tag.as_deref().and_then(search_param));
    let page = state
        .posts
        .store()
        .read(|posts| view.compute(posts, admin.is_admin()));
    Ok(HttpResponse::Ok().json(page))
}
