/// Business logic layer
///
/// - `posts`: create/update/delete against the in-memory post list
/// - `likes`: optimistic like with server reconciliation and rollback
/// - `gallery`: gallery image CRUD and page state
/// - `drafts`: edit-modal state with AI-assisted drafting
pub mod drafts;
pub mod gallery;
pub mod likes;
pub mod posts;

pub use drafts::{DraftEditor, PostForm};
pub use gallery::{GalleryForm, GalleryPage, GalleryService};
pub use likes::{OptimisticLikes, PendingLike};
pub use posts::{AuthorDefaults, PostService};

/// Blocking yes/no prompt shown before destructive actions.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirmation decided up front, e.g. from a request parameter.
#[derive(Debug, Clone, Copy)]
pub struct PreConfirmed(pub bool);

impl Confirmation for PreConfirmed {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
