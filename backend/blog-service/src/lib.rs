//! Blog Service Library
//!
//! View-state and content logic for a personal blog: posts, gallery and
//! reference pages loaded from one JSON document, derived page state
//! (pagination, tag filters, archive buckets, table of contents, home
//! statistics), optimistic likes and AI-assisted drafting.
//!
//! # Modules
//!
//! - `models`: content document records
//! - `store`: id-keyed collections with change notification
//! - `content`: one-shot document loading from file or HTTP
//! - `views`: derived view-state computations
//! - `services`: mutations, optimistic likes, edit modals
//! - `controllers`: scroll, section and lightbox state machines
//! - `clients`: like confirmation and AI drafting collaborators
//! - `handlers`: HTTP endpoints
//! - `middleware`: admin-mode extraction, request timing
//! - `metrics`: Prometheus collectors

pub mod clients;
pub mod config;
pub mod content;
pub mod controllers;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
pub mod views;

pub use config::Config;
pub use error::{AppError, Result};

use actix_web::web;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use clients::DraftGenerator;
use content::ContentStore;
use services::{AuthorDefaults, GalleryService, PostService};
use views::DEFAULT_PAGE_SIZE;

/// Presentation settings the handlers need per request.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub page_size: usize,
    pub launch_date: DateTime<Utc>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            launch_date: config::default_launch_date(),
        }
    }
}

impl From<&Config> for SiteSettings {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.site.page_size,
            launch_date: config.site.launch_date,
        }
    }
}

/// Shared state behind every handler.
pub struct AppState {
    pub content: Arc<ContentStore>,
    pub posts: PostService,
    pub gallery: GalleryService,
    pub drafts: Arc<dyn DraftGenerator>,
    pub settings: SiteSettings,
}

impl AppState {
    pub fn new(
        content: Arc<ContentStore>,
        drafts: Arc<dyn DraftGenerator>,
        settings: SiteSettings,
        defaults: AuthorDefaults,
    ) -> Self {
        Self {
            posts: PostService::with_defaults(content.posts(), defaults),
            gallery: GalleryService::new(content.gallery()),
            content,
            drafts,
            settings,
        }
    }
}

/// Register every route. Shared by the binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(metrics::serve_metrics))
        .route("/api/v1/health", web::get().to(handlers::health))
        .route(
            "/blog/like/{post_id}",
            web::post().to(handlers::like_post),
        )
        .service(
            web::scope("/api/v1")
                .wrap(middleware::MetricsMiddleware)
                .service(
                    web::scope("/posts")
                        .service(
                            web::resource("")
                                .route(web::get().to(handlers::list_posts))
                                .route(web::post().to(handlers::create_post)),
                        )
                        .service(
                            web::resource("/{post_id}")
                                .route(web::get().to(handlers::get_post))
                                .route(web::put().to(handlers::update_post))
                                .route(web::delete().to(handlers::delete_post)),
                        ),
                )
                .route("/tags", web::get().to(handlers::list_tags))
                .route("/archive", web::get().to(handlers::get_archive))
                .service(
                    web::scope("/gallery")
                        .service(
                            web::resource("")
                                .route(web::get().to(handlers::list_gallery))
                                .route(web::post().to(handlers::create_gallery_image)),
                        )
                        .service(
                            web::resource("/{image_id}")
                                .route(web::put().to(handlers::update_gallery_image))
                                .route(web::delete().to(handlers::delete_gallery_image)),
                        ),
                )
                .route("/friends", web::get().to(handlers::list_friends))
                .route("/about", web::get().to(handlers::get_about))
                .route("/quotes", web::get().to(handlers::list_quotes))
                .route("/home", web::get().to(handlers::get_home))
                .route("/stats", web::get().to(handlers::get_stats))
                .route("/drafts", web::post().to(handlers::generate_draft)),
        );
}
