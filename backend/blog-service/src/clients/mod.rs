//! Clients for the external collaborators of the blog.
//!
//! - `LikeApi`: server confirmation of a like (`POST /blog/like/{postId}`)
//! - `DraftGenerator`: AI-assisted title/summary drafting
//!
//! Both sit behind async traits so the optimistic layer and the edit modal
//! can be driven by fakes in tests.

pub mod gemini;
pub mod like;

use std::time::Duration;

pub use gemini::{DraftGenerator, GeminiConfig, GeminiDraftGenerator, GeneratedDraft};
pub use like::{HttpLikeClient, LikeApi, LikeResponse};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Run `future` with a deadline, folding the elapsed case into `ClientError`.
pub(crate) async fn with_deadline<F, T>(duration: Duration, future: F) -> Result<T, ClientError>
where
    F: std::future::Future<Output = Result<T, ClientError>>,
{
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(ClientError::Timeout(duration)),
    }
}
