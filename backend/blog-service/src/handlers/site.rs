/// Reference pages and home statistics
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::middleware::AdminMode;
use crate::models::{HomePageConfig, Post};
use crate::views::{site_overview, visible_posts, SiteOverview};
use crate::AppState;

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "blog-service",
        "version": env!("CARGO_PKG_VERSION"),
        "contentLoaded": state.content.is_loaded(),
    }))
}

pub async fn list_friends(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.content.friends()))
}

pub async fn get_about(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.content.about()))
}

pub async fn list_quotes(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.content.quotes()))
}

fn overview(state: &AppState, admin: bool) -> SiteOverview {
    let stats = state.content.site_stats();
    state.posts.store().read(|posts| {
        site_overview(posts, &stats, admin, state.settings.launch_date, Utc::now())
    })
}

/// Word count, visits, post count and uptime
pub async fn get_stats(state: web::Data<AppState>, admin: AdminMode) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(overview(&state, admin.is_admin())))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub config: HomePageConfig,
    pub featured_posts: Vec<Post>,
    pub stats: SiteOverview,
}

pub async fn get_home(state: web::Data<AppState>, admin: AdminMode) -> Result<HttpResponse> {
    let config = state.content.home_page_config();
    let featured_posts = state.posts.store().read(|posts| {
        visible_posts(posts, admin.is_admin())
            .into_iter()
            .take(config.featured_post_count)
            .collect()
    });

    Ok(HttpResponse::Ok().json(HomeResponse {
        stats: overview(&state, admin.is_admin()),
        config,
        featured_posts,
    }))
}
