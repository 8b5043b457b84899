/// HTTP handlers
///
/// Thin adapters from requests to the view and service layers. Every read
/// takes the viewer's admin flag into account; writes require it.
pub mod archive;
pub mod drafts;
pub mod gallery;
pub mod likes;
pub mod posts;
pub mod site;

pub use archive::*;
pub use drafts::*;
pub use gallery::*;
pub use likes::*;
pub use posts::*;
pub use site::*;

use serde::Deserialize;

/// `?confirm=true` on destructive requests stands in for the confirm dialog.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}
