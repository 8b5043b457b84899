/// Optimistic likes.
///
/// A like is applied to the local post list immediately, then confirmed by
/// the server. On success the local post is replaced with the server's
/// canonical copy; on failure the exact inverse (one like removed) is
/// applied. Other mutations that landed in between are left alone.
use std::sync::Arc;
use tracing::{error, info};

use crate::clients::LikeApi;
use crate::error::{AppError, Result};
use crate::metrics::{LIKE_REQUESTS_TOTAL, LIKE_ROLLBACKS_TOTAL};
use crate::models::Post;
use crate::store::PostStore;

/// A local like waiting for server confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a pending like must be confirmed or rolled back"]
pub struct PendingLike {
    pub post_id: i64,
    /// Like count before the optimistic increment.
    pub prior_likes: u64,
}

pub struct OptimisticLikes {
    store: Arc<PostStore>,
    api: Arc<dyn LikeApi>,
}

impl OptimisticLikes {
    pub fn new(store: Arc<PostStore>, api: Arc<dyn LikeApi>) -> Self {
        Self { store, api }
    }

    /// Increment the local count synchronously.
    pub fn apply_local(&self, post_id: i64) -> Option<PendingLike> {
        let mut prior_likes = 0;
        self.store.update(post_id, |post| {
            prior_likes = post.likes;
            post.likes += 1;
        })?;
        Some(PendingLike {
            post_id,
            prior_likes,
        })
    }

    /// Undo one optimistic increment.
    pub fn rollback(&self, pending: PendingLike) {
        LIKE_ROLLBACKS_TOTAL.inc();
        if self
            .store
            .update(pending.post_id, |post| post.likes = post.likes.saturating_sub(1))
            .is_none()
        {
            info!(post_id = pending.post_id, "post removed before like rollback");
        }
    }

    /// Send the confirmation for `pending` and reconcile the outcome.
    pub async fn confirm(&self, pending: PendingLike) -> Result<Post> {
        match self.api.like(pending.post_id).await {
            Ok(canonical) => {
                LIKE_REQUESTS_TOTAL.with_label_values(&["success"]).inc();
                info!(post_id = pending.post_id, "Like request for post was successful");
                // A post deleted meanwhile stays deleted.
                self.store.replace(canonical.clone());
                Ok(canonical)
            }
            Err(e) => {
                LIKE_REQUESTS_TOTAL.with_label_values(&["error"]).inc();
                error!(
                    post_id = pending.post_id,
                    "Failed to like post. Reverting changes: {}", e
                );
                self.rollback(pending);
                Err(e.into())
            }
        }
    }

    /// Optimistic increment followed by server confirmation.
    pub async fn like(&self, post_id: i64) -> Result<Post> {
        let pending = self
            .apply_local(post_id)
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;
        self.confirm(pending).await
    }
}
