/// Post edit-modal state with AI-assisted drafting
use tracing::{info, warn};

use crate::clients::{ClientError, DraftGenerator};
use crate::error::{AppError, Result};
use crate::metrics::DRAFT_REQUESTS_TOTAL;
use crate::models::{Post, PostDraft, PostPatch};

pub const GENERATION_FAILED: &str =
    "Failed to generate content. The AI might be busy. Please try again later.";

/// Editable fields of a post, new or existing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    /// `None` for a post that has not been created yet.
    pub id: Option<i64>,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub published: bool,
}

impl PostForm {
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: Some(post.id),
            title: post.title.clone(),
            summary: post.summary.clone(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            tags: post.tags.clone(),
            published: post.published,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.summary.trim().is_empty() {
            return Err(AppError::Validation(
                "title and summary are required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_draft(self) -> PostDraft {
        PostDraft {
            title: self.title,
            summary: self.summary,
            content: self.content,
            image_url: Some(self.image_url).filter(|url| !url.trim().is_empty()),
            tags: Some(self.tags).filter(|tags| !tags.is_empty()),
            published: Some(self.published),
        }
    }

    pub fn to_patch(&self) -> PostPatch {
        PostPatch {
            title: Some(self.title.clone()),
            summary: Some(self.summary.clone()),
            content: Some(self.content.clone()),
            image_url: Some(self.image_url.clone()),
            tags: Some(self.tags.clone()),
            published: Some(self.published),
            ..Default::default()
        }
    }
}

/// Edit modal: open/closed, the form being edited, and draft generation state.
#[derive(Debug, Default)]
pub struct DraftEditor {
    form: Option<PostForm>,
    generating: bool,
    error: Option<String>,
}

impl DraftEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with a copy of `post`, or an empty form for a new post.
    pub fn open(&mut self, post: Option<&Post>) {
        self.form = Some(post.map(PostForm::from_post).unwrap_or_default());
        self.generating = false;
        self.error = None;
    }

    pub fn close(&mut self) {
        self.form = None;
        self.generating = false;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Option<&PostForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut PostForm> {
        self.form.as_mut()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_title(&mut self, title: &str) {
        if let Some(form) = self.form.as_mut() {
            form.title = title.to_string();
        }
    }

    pub fn set_summary(&mut self, summary: &str) {
        if let Some(form) = self.form.as_mut() {
            form.summary = summary.to_string();
        }
    }

    pub fn set_content(&mut self, content: &str) {
        if let Some(form) = self.form.as_mut() {
            form.content = content.to_string();
        }
    }

    /// Validate and hand the form back, closing the modal. Invalid forms stay open.
    pub fn save(&mut self) -> Result<PostForm> {
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| AppError::BadRequest("editor is not open".to_string()))?;
        form.validate()?;
        let form = form.clone();
        self.close();
        Ok(form)
    }

    /// Ask `generator` for a title and summary. Other fields are never touched,
    /// and on failure neither are these.
    pub async fn generate(&mut self, generator: &dyn DraftGenerator, topic: &str) -> Result<()> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::Validation("topic is required".to_string()));
        }
        if self.form.is_none() {
            return Err(AppError::BadRequest("editor is not open".to_string()));
        }

        self.generating = true;
        self.error = None;
        let outcome = generator.generate(topic).await;
        self.generating = false;

        match outcome {
            Ok(draft) => {
                DRAFT_REQUESTS_TOTAL.with_label_values(&["success"]).inc();
                info!(topic, "draft generated");
                if let Some(form) = self.form.as_mut() {
                    form.title = draft.title;
                    form.summary = draft.summary;
                }
                Ok(())
            }
            Err(e) => {
                let message = match &e {
                    ClientError::Unavailable(msg) => {
                        DRAFT_REQUESTS_TOTAL.with_label_values(&["disabled"]).inc();
                        msg.clone()
                    }
                    _ => {
                        DRAFT_REQUESTS_TOTAL.with_label_values(&["error"]).inc();
                        GENERATION_FAILED.to_string()
                    }
                };
                warn!(topic, "draft generation failed: {}", e);
                self.error = Some(message);
                Err(e.into())
            }
        }
    }
}
