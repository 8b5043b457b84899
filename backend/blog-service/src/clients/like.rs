/// Like confirmation client.
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{with_deadline, ClientError};
use crate::models::Post;

/// Body returned by `POST /blog/like/{postId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub post: Post,
}

#[async_trait]
pub trait LikeApi: Send + Sync {
    /// Ask the server to record one like; returns the canonical post.
    async fn like(&self, post_id: i64) -> Result<Post, ClientError>;
}

pub struct HttpLikeClient {
    client: HttpClient,
    base_url: String,
    timeout: Duration,
}

impl HttpLikeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn like_url(&self, post_id: i64) -> String {
        format!("{}/blog/like/{}", self.base_url, post_id)
    }
}

#[async_trait]
impl LikeApi for HttpLikeClient {
    async fn like(&self, post_id: i64) -> Result<Post, ClientError> {
        let url = self.like_url(post_id);
        debug!(post_id, %url, "sending like confirmation");

        with_deadline(self.timeout, async {
            let response = self
                .client
                .post(&url)
                .json(&serde_json::json!({}))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let body: LikeResponse = response
                .json()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()))?;
            Ok(body.post)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_url_strips_trailing_slash() {
        let client = HttpLikeClient::new("http://localhost:8080/", Duration::from_secs(1));
        assert_eq!(client.like_url(12), "http://localhost:8080/blog/like/12");
    }
}
