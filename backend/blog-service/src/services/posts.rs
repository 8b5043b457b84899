/// Post service - local create/update/delete and server-side like counting
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use super::{Confirmation, PostForm};
use crate::error::{AppError, Result};
use crate::metrics::POST_MUTATIONS_TOTAL;
use crate::models::{Post, PostDraft, PostPatch};
use crate::store::PostStore;

/// Tag given to new posts created without any.
pub const NEW_POST_TAG: &str = "新文章";

/// Author fields stamped on newly created posts.
#[derive(Debug, Clone)]
pub struct AuthorDefaults {
    pub author: String,
    pub avatar_url: String,
}

impl Default for AuthorDefaults {
    fn default() -> Self {
        Self {
            author: "TMOS".to_string(),
            avatar_url: "https://picsum.photos/seed/avatar1/40/40".to_string(),
        }
    }
}

pub struct PostService {
    store: Arc<PostStore>,
    defaults: AuthorDefaults,
}

impl PostService {
    pub fn new(store: Arc<PostStore>) -> Self {
        Self::with_defaults(store, AuthorDefaults::default())
    }

    pub fn with_defaults(store: Arc<PostStore>, defaults: AuthorDefaults) -> Self {
        Self { store, defaults }
    }

    pub fn store(&self) -> &Arc<PostStore> {
        &self.store
    }

    /// Create a new post at the head of the list.
    ///
    /// Title and summary must be non-blank; a rejected draft leaves the list
    /// untouched. New posts start unpublished unless the draft says otherwise.
    pub fn create_post(&self, draft: PostDraft) -> Result<Post> {
        if draft.title.trim().is_empty() || draft.summary.trim().is_empty() {
            return Err(AppError::Validation(
                "title and summary are required".to_string(),
            ));
        }

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let defaults = &self.defaults;
        let post = self.store.insert_with(|id| Post {
            id,
            title: draft.title,
            summary: draft.summary,
            content: draft.content,
            image_url: draft
                .image_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| format!("https://picsum.photos/seed/newpost{}/600/400", id)),
            author: defaults.author.clone(),
            author_avatar_url: defaults.avatar_url.clone(),
            publish_date: today,
            tags: draft
                .tags
                .filter(|tags| !tags.is_empty())
                .unwrap_or_else(|| vec![NEW_POST_TAG.to_string()]),
            likes: 0,
            comments: 0,
            published: draft.published.unwrap_or(false),
        });

        POST_MUTATIONS_TOTAL.with_label_values(&["create"]).inc();
        info!(post_id = post.id, "post created");
        Ok(post)
    }

    /// Shallow-merge `patch` over the stored post.
    ///
    /// A title or summary that is present but blank is rejected before the
    /// store is touched. Unknown ids are `NotFound`.
    pub fn update_post(&self, post_id: i64, patch: &PostPatch) -> Result<Post> {
        let blank = |field: &Option<String>| {
            field.as_deref().map_or(false, |value| value.trim().is_empty())
        };
        if blank(&patch.title) || blank(&patch.summary) {
            return Err(AppError::Validation(
                "title and summary are required".to_string(),
            ));
        }

        match self.store.update(post_id, |post| patch.apply_to(post)) {
            Some(post) => {
                POST_MUTATIONS_TOTAL.with_label_values(&["update"]).inc();
                info!(post_id, "post updated");
                Ok(post)
            }
            None => {
                debug!(post_id, "update ignored: no such post");
                Err(AppError::NotFound(format!("post {}", post_id)))
            }
        }
    }

    /// Remove a post after the viewer confirms. Declined or unknown ids are no-ops.
    pub fn delete_post(&self, post_id: i64, confirmation: &dyn Confirmation) -> Option<Post> {
        let post = self.store.get(post_id)?;
        let prompt = format!("您确定要删除文章 “{}” 吗？", post.title);
        if !confirmation.confirm(&prompt) {
            debug!(post_id, "delete declined");
            return None;
        }

        let removed = self.store.remove(post_id);
        if removed.is_some() {
            POST_MUTATIONS_TOTAL.with_label_values(&["delete"]).inc();
            info!(post_id, "post deleted");
        }
        removed
    }

    /// Create or update from a saved edit form.
    pub fn save(&self, form: PostForm) -> Result<Post> {
        form.validate()?;
        match form.id {
            Some(post_id) => self.update_post(post_id, &form.to_patch()),
            None => self.create_post(form.into_draft()),
        }
    }

    /// Record one like on behalf of a viewer and return the canonical post.
    ///
    /// Visibility is checked under the same lock as the increment, so a post
    /// unpublished concurrently is never liked by a visitor.
    pub fn register_like(&self, post_id: i64, admin: bool) -> Result<Post> {
        self.store
            .update_if(post_id, |post| admin || post.published, |post| post.likes += 1)
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::PreConfirmed;

    fn service() -> PostService {
        let posts = serde_json::from_value(serde_json::json!([
            {"id": 3, "title": "three", "summary": "s", "likes": 1},
            {"id": 1, "title": "one", "summary": "s", "published": false}
        ]))
        .unwrap();
        PostService::new(Arc::new(PostStore::with_items(posts)))
    }

    fn draft(title: &str, summary: &str) -> PostDraft {
        PostDraft {
            title: title.into(),
            summary: summary.into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_assigns_next_id_and_prepends_unpublished() {
        let service = service();
        let post = service.create_post(draft("Hello", "World")).unwrap();

        assert_eq!(post.id, 4);
        assert!(!post.published);
        assert_eq!(post.tags, vec![NEW_POST_TAG]);
        assert_eq!(post.image_url, "https://picsum.photos/seed/newpost4/600/400");
        assert_eq!(post.author, "TMOS");
        assert_eq!(post.publish_date.len(), 10);
        assert_eq!(service.store().snapshot()[0].id, 4);
    }

    #[test]
    fn blank_title_or_summary_is_rejected_without_mutation() {
        let service = service();
        let revision = service.store().revision();

        assert!(matches!(
            service.create_post(draft("   ", "World")),
            Err(AppError::Validation(_))
        ));
        assert!(service.create_post(draft("Hello", "")).is_err());
        assert_eq!(service.store().len(), 2);
        assert_eq!(service.store().revision(), revision);
    }

    #[test]
    fn update_merges_and_ignores_unknown_ids() {
        let service = service();
        let patch = PostPatch {
            summary: Some("new summary".into()),
            ..Default::default()
        };

        let updated = service.update_post(3, &patch).unwrap();
        assert_eq!(updated.title, "three");
        assert_eq!(updated.summary, "new summary");
        assert!(matches!(
            service.update_post(99, &patch),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn update_rejects_blanked_fields_without_mutation() {
        let service = service();
        let revision = service.store().revision();
        let patch = PostPatch {
            title: Some("   ".into()),
            summary: Some(String::new()),
            ..Default::default()
        };

        assert!(matches!(
            service.update_post(3, &patch),
            Err(AppError::Validation(_))
        ));
        let untouched = service.store().get(3).unwrap();
        assert_eq!(untouched.title, "three");
        assert_eq!(untouched.summary, "s");
        assert_eq!(service.store().revision(), revision);
    }

    #[test]
    fn delete_requires_confirmation() {
        let service = service();
        assert!(service.delete_post(3, &PreConfirmed(false)).is_none());
        assert_eq!(service.store().len(), 2);

        let prompts = std::cell::RefCell::new(Vec::new());
        let confirm = |prompt: &str| {
            prompts.borrow_mut().push(prompt.to_string());
            true
        };
        assert_eq!(service.delete_post(3, &confirm).map(|p| p.id), Some(3));
        assert!(prompts.borrow()[0].contains("three"));
        assert!(service.delete_post(3, &PreConfirmed(true)).is_none());
    }

    #[test]
    fn save_routes_new_and_existing_forms() {
        let service = service();
        let created = service
            .save(PostForm {
                title: "New".into(),
                summary: "S".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(created.id, 4);

        let mut form = PostForm::from_post(&service.store().get(3).unwrap());
        form.title = "renamed".into();
        assert_eq!(service.save(form).unwrap().title, "renamed");

        let stale = PostForm {
            id: Some(42),
            title: "x".into(),
            summary: "y".into(),
            ..Default::default()
        };
        assert!(matches!(service.save(stale), Err(AppError::NotFound(_))));
    }

    #[test]
    fn likes_respect_visibility() {
        let service = service();
        assert_eq!(service.register_like(3, false).unwrap().likes, 2);
        assert!(matches!(
            service.register_like(1, false),
            Err(AppError::NotFound(_))
        ));
        assert_eq!(service.register_like(1, true).unwrap().likes, 1);
        assert_eq!(service.store().get(1).unwrap().likes, 1);
        assert!(service.register_like(99, true).is_err());
    }

    #[test]
    fn hidden_post_like_leaves_count_and_revision() {
        let service = service();
        let revision = service.store().revision();
        assert!(service.register_like(1, false).is_err());
        assert_eq!(service.store().get(1).unwrap().likes, 0);
        assert_eq!(service.store().revision(), revision);
    }
}
