/// Data models for blog-service
///
/// This module defines structures for:
/// - Post: Articles with markdown content, tags and a like counter
/// - GalleryImage: Entries of the photo gallery
/// - Friend, AboutInfo, SiteStats, Quote, HomePageConfig: read-only reference data
/// - AppData: the whole content document, loaded once at startup
///
/// Field names follow the camelCase JSON layout of the content document.
use serde::{Deserialize, Serialize};

/// Anything stored in an id-keyed collection.
pub trait Identified {
    fn id(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Markdown source
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_avatar_url: String,
    /// ISO date (`YYYY-MM-DD` or full RFC 3339)
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    /// Documents written before the flag existed only held public posts.
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl Identified for Post {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Post {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Input for creating a post. Only title and summary are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub published: Option<bool>,
}

/// Partial update, shallow-merged over the stored post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub author_avatar_url: Option<String>,
    pub publish_date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub published: Option<bool>,
}

impl PostPatch {
    /// Apply every present field onto `post`. The id never changes.
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(summary) = &self.summary {
            post.summary = summary.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(image_url) = &self.image_url {
            post.image_url = image_url.clone();
        }
        if let Some(author) = &self.author {
            post.author = author.clone();
        }
        if let Some(avatar) = &self.author_avatar_url {
            post.author_avatar_url = avatar.clone();
        }
        if let Some(date) = &self.publish_date {
            post.publish_date = date.clone();
        }
        if let Some(tags) = &self.tags {
            post.tags = tags.clone();
        }
        if let Some(likes) = self.likes {
            post.likes = likes;
        }
        if let Some(comments) = self.comments {
            post.comments = comments;
        }
        if let Some(published) = self.published {
            post.published = published;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_avatar_url: String,
    /// ISO format string
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: i64,
    #[serde(default)]
    pub thumb_src: String,
    #[serde(default)]
    pub full_src: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Identified for GalleryImage {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumb_src: Option<String>,
    pub full_src: Option<String>,
}

impl GalleryPatch {
    pub fn apply_to(&self, image: &mut GalleryImage) {
        if let Some(title) = &self.title {
            image.title = title.clone();
        }
        if let Some(description) = &self.description {
            image.description = description.clone();
        }
        if let Some(thumb) = &self.thumb_src {
            image.thumb_src = thumb.clone();
        }
        if let Some(full) = &self.full_src {
            image.full_src = full.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    #[serde(default)]
    pub total_visits: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageConfig {
    #[serde(default)]
    pub hero_title: String,
    #[serde(default)]
    pub hero_subtitle: String,
    #[serde(default)]
    pub hero_image_url: String,
    #[serde(default)]
    pub featured_post_count: usize,
}

/// The static content document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
    #[serde(default)]
    pub friends: Vec<Friend>,
    #[serde(default)]
    pub about: AboutInfo,
    #[serde(default)]
    pub site_stats: SiteStats,
    #[serde(default)]
    pub home_page_config: HomePageConfig,
    #[serde(default)]
    pub quotes: Vec<Quote>,
}
