/// Content Store
///
/// Loads the static content document once and exposes typed slices of it.
/// Posts and gallery images live in mutable collections; everything else is
/// read-only reference data.
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client as HttpClient;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::clients::{with_deadline, ClientError};
use crate::models::{AboutInfo, AppData, Friend, HomePageConfig, Quote, SiteStats};
use crate::store::{GalleryStore, PostStore};

#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self) -> Result<AppData, ClientError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Reads the document from the local filesystem.
pub struct FileContentSource {
    path: PathBuf,
}

impl FileContentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    async fn fetch(&self) -> Result<AppData, ClientError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ClientError::Transport(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&raw).map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the document over HTTP.
pub struct HttpContentSource {
    client: HttpClient,
    url: String,
    timeout: Duration,
}

impl HttpContentSource {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            client: HttpClient::new(),
            url: url.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self) -> Result<AppData, ClientError> {
        with_deadline(self.timeout, async {
            let response = self.client.get(&self.url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            response
                .json::<AppData>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()))
        })
        .await
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone, Default)]
struct ReferenceData {
    friends: Vec<Friend>,
    about: AboutInfo,
    site_stats: SiteStats,
    home_page_config: HomePageConfig,
    quotes: Vec<Quote>,
}

pub struct ContentStore {
    posts: Arc<PostStore>,
    gallery: Arc<GalleryStore>,
    reference: RwLock<Arc<ReferenceData>>,
    loaded: OnceCell<()>,
}

impl ContentStore {
    /// Empty store; every slice reports loading until [`ContentStore::load`] runs.
    pub fn new() -> Self {
        Self {
            posts: Arc::new(PostStore::new()),
            gallery: Arc::new(GalleryStore::new()),
            reference: RwLock::new(Arc::new(ReferenceData::default())),
            loaded: OnceCell::new(),
        }
    }

    /// Store populated from an in-memory document.
    pub fn from_data(data: AppData) -> Self {
        let store = Self::new();
        store.install(data);
        let _ = store.loaded.set(());
        store
    }

    /// Fetch the document from `source` exactly once.
    ///
    /// Concurrent callers share a single fetch; later calls are no-ops, so a
    /// second load never overwrites mutations made since the first. A failed
    /// fetch installs the empty document so the store still leaves the
    /// loading state; the failure is logged, never propagated.
    pub async fn load(&self, source: &dyn ContentSource) {
        if self.is_loaded() {
            debug!("content already loaded; skipping fetch");
            return;
        }

        self.loaded
            .get_or_init(|| async {
                match source.fetch().await {
                    Ok(data) => {
                        info!(
                            source = %source.describe(),
                            posts = data.posts.len(),
                            gallery = data.gallery.len(),
                            friends = data.friends.len(),
                            "content document loaded"
                        );
                        self.install(data);
                    }
                    Err(e) => {
                        error!(
                            source = %source.describe(),
                            "Failed to load content document, falling back to empty content: {}",
                            e
                        );
                        self.install(AppData::default());
                    }
                }
            })
            .await;
    }

    fn install(&self, data: AppData) {
        let AppData {
            posts,
            gallery,
            friends,
            about,
            site_stats,
            home_page_config,
            quotes,
        } = data;

        *self.reference.write() = Arc::new(ReferenceData {
            friends,
            about,
            site_stats,
            home_page_config,
            quotes,
        });
        self.posts.load(posts);
        self.gallery.load(gallery);
    }

    /// True once every slice has been installed.
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    pub fn posts(&self) -> Arc<PostStore> {
        self.posts.clone()
    }

    pub fn gallery(&self) -> Arc<GalleryStore> {
        self.gallery.clone()
    }

    pub fn friends(&self) -> Vec<Friend> {
        self.reference.read().friends.clone()
    }

    pub fn about(&self) -> AboutInfo {
        self.reference.read().about.clone()
    }

    pub fn site_stats(&self) -> SiteStats {
        self.reference.read().site_stats.clone()
    }

    pub fn home_page_config(&self) -> HomePageConfig {
        self.reference.read().home_page_config.clone()
    }

    pub fn quotes(&self) -> Vec<Quote> {
        self.reference.read().quotes.clone()
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}
