//! Shared fixtures and collaborator fakes for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use blog_service::clients::{ClientError, DraftGenerator, GeneratedDraft, LikeApi};
use blog_service::content::ContentStore;
use blog_service::models::{AppData, Post};
use blog_service::services::AuthorDefaults;
use blog_service::{AppState, SiteSettings};

/// Four posts (one unpublished), two gallery images and reference records.
pub fn sample_data() -> AppData {
    serde_json::from_value(serde_json::json!({
        "posts": [
            {
                "id": 4, "title": "Draft ideas", "summary": "unfinished",
                "content": "### Idea\nlater", "publishDate": "2025-10-15",
                "tags": ["Rust"], "likes": 0, "published": false
            },
            {
                "id": 3, "title": "Async Rust in practice", "summary": "Tokio tips",
                "content": "### Getting Started\nhello\n\n### Going Further\n世界",
                "publishDate": "2025-10-02", "tags": ["Rust", "Async"], "likes": 10
            },
            {
                "id": 2, "title": "海边的周末", "summary": "面朝大海",
                "content": "春暖花开", "publishDate": "2025-09-20",
                "tags": ["生活"], "likes": 5
            },
            {
                "id": 1, "title": "Hello World", "summary": "first post",
                "content": "hello world", "publishDate": "2024-12-31",
                "tags": ["随笔"], "likes": 1
            }
        ],
        "gallery": [
            {"id": 2, "thumbSrc": "t2", "fullSrc": "f2", "title": "sunset", "description": ""},
            {"id": 1, "thumbSrc": "t1", "fullSrc": "f1", "title": "trail", "description": ""}
        ],
        "friends": [
            {"name": "Alice", "avatarUrl": "a.png", "description": "compilers", "link": "https://alice.dev"}
        ],
        "about": {"name": "TMOS", "title": "dev", "bio": "hi", "avatarUrl": "me.png", "links": []},
        "siteStats": {"totalVisits": 12345},
        "homePageConfig": {"heroTitle": "Hi", "heroSubtitle": "", "heroImageUrl": "", "featuredPostCount": 2},
        "quotes": [{"text": "面朝大海，春暖花开。", "author": "海子"}]
    }))
    .expect("sample document")
}

pub fn post_with_likes(id: i64, likes: u64) -> Post {
    serde_json::from_value(serde_json::json!({
        "id": id, "title": format!("post {}", id), "summary": "s", "likes": likes
    }))
    .expect("post")
}

pub fn app_state(drafts: Arc<dyn DraftGenerator>) -> AppState {
    app_state_with(sample_data(), drafts, 2)
}

pub fn app_state_with(data: AppData, drafts: Arc<dyn DraftGenerator>, page_size: usize) -> AppState {
    AppState::new(
        Arc::new(ContentStore::from_data(data)),
        drafts,
        SiteSettings {
            page_size,
            ..SiteSettings::default()
        },
        AuthorDefaults::default(),
    )
}

/// Draft generator with a scripted outcome.
pub enum FakeDrafts {
    Disabled,
    Failing,
    Returns(GeneratedDraft),
}

#[async_trait]
impl DraftGenerator for FakeDrafts {
    async fn generate(&self, _topic: &str) -> Result<GeneratedDraft, ClientError> {
        match self {
            FakeDrafts::Disabled => Err(ClientError::Unavailable(
                "AI Service is not available. Ensure API_KEY is configured.".into(),
            )),
            FakeDrafts::Failing => Err(ClientError::Status {
                status: 503,
                body: "overloaded".into(),
            }),
            FakeDrafts::Returns(draft) => Ok(draft.clone()),
        }
    }

    fn is_enabled(&self) -> bool {
        !matches!(self, FakeDrafts::Disabled)
    }
}

/// Like API whose responses are released one by one by the test.
pub struct GatedLikeApi {
    responses: Mutex<mpsc::UnboundedReceiver<Result<Post, ClientError>>>,
}

pub type LikeGate = mpsc::UnboundedSender<Result<Post, ClientError>>;

impl GatedLikeApi {
    pub fn new() -> (Arc<Self>, LikeGate) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                responses: Mutex::new(rx),
            }),
            tx,
        )
    }
}

#[async_trait]
impl LikeApi for GatedLikeApi {
    async fn like(&self, _post_id: i64) -> Result<Post, ClientError> {
        let mut responses = self.responses.lock().await;
        responses
            .recv()
            .await
            .unwrap_or_else(|| Err(ClientError::Transport("gate closed".into())))
    }
}
