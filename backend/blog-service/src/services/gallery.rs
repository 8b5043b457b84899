/// Gallery service - image CRUD on the gallery's own list, plus page state
use std::sync::Arc;
use tracing::{debug, info};

use super::Confirmation;
use crate::controllers::Lightbox;
use crate::error::{AppError, Result};
use crate::metrics::POST_MUTATIONS_TOTAL;
use crate::models::{GalleryDraft, GalleryImage, GalleryPatch};
use crate::store::GalleryStore;

pub fn thumb_src(id: i64) -> String {
    format!("https://picsum.photos/seed/gallery{}/400/400", id)
}

pub fn full_src(id: i64) -> String {
    format!("https://picsum.photos/seed/gallery{}/1200/800", id)
}

pub struct GalleryService {
    store: Arc<GalleryStore>,
}

impl GalleryService {
    pub fn new(store: Arc<GalleryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<GalleryStore> {
        &self.store
    }

    pub fn list(&self) -> Vec<GalleryImage> {
        self.store.snapshot()
    }

    /// Prepend a new image with placeholder sources seeded by its id.
    pub fn create_image(&self, draft: GalleryDraft) -> Result<GalleryImage> {
        if draft.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }

        let image = self.store.insert_with(|id| GalleryImage {
            id,
            thumb_src: thumb_src(id),
            full_src: full_src(id),
            title: draft.title,
            description: draft.description,
        });
        POST_MUTATIONS_TOTAL.with_label_values(&["gallery_create"]).inc();
        info!(image_id = image.id, "gallery image created");
        Ok(image)
    }

    pub fn update_image(&self, image_id: i64, patch: &GalleryPatch) -> Option<GalleryImage> {
        let updated = self.store.update(image_id, |image| patch.apply_to(image));
        if updated.is_some() {
            POST_MUTATIONS_TOTAL.with_label_values(&["gallery_update"]).inc();
        } else {
            debug!(image_id, "update ignored: no such image");
        }
        updated
    }

    pub fn delete_image(
        &self,
        image_id: i64,
        confirmation: &dyn Confirmation,
    ) -> Option<GalleryImage> {
        let image = self.store.get(image_id)?;
        let prompt = format!("您确定要删除图片 “{}” 吗？", image.title);
        if !confirmation.confirm(&prompt) {
            return None;
        }
        let removed = self.store.remove(image_id);
        if removed.is_some() {
            POST_MUTATIONS_TOTAL.with_label_values(&["gallery_delete"]).inc();
            info!(image_id, "gallery image deleted");
        }
        removed
    }
}

/// Form state of the gallery edit modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryForm {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
}

impl GalleryForm {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// State of the gallery page: lightbox selection and the edit modal.
pub struct GalleryPage {
    service: GalleryService,
    lightbox: Lightbox,
    editing: Option<GalleryForm>,
}

impl GalleryPage {
    pub fn new(service: GalleryService) -> Self {
        Self {
            service,
            lightbox: Lightbox::new(),
            editing: None,
        }
    }

    pub fn images(&self) -> Vec<GalleryImage> {
        self.service.list()
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn selected_image(&self) -> Option<GalleryImage> {
        let images = self.images();
        self.lightbox.selected(&images).cloned()
    }

    pub fn open_lightbox(&mut self, image_id: i64) {
        self.lightbox.open(image_id);
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox.close();
    }

    pub fn next_image(&mut self) -> Option<i64> {
        let images = self.images();
        self.lightbox.next(&images)
    }

    pub fn prev_image(&mut self) -> Option<i64> {
        let images = self.images();
        self.lightbox.prev(&images)
    }

    pub fn form(&self) -> Option<&GalleryForm> {
        self.editing.as_ref()
    }

    pub fn is_modal_open(&self) -> bool {
        self.editing.is_some()
    }

    /// Open the modal for an existing image, or for a new one with `None`.
    pub fn open_modal(&mut self, image_id: Option<i64>) {
        let form = image_id
            .and_then(|id| self.service.store().get(id))
            .map(|image| GalleryForm {
                id: Some(image.id),
                title: image.title,
                description: image.description,
            })
            .unwrap_or_default();
        self.editing = Some(form);
    }

    pub fn close_modal(&mut self) {
        self.editing = None;
    }

    pub fn set_title(&mut self, title: &str) {
        self.editing.get_or_insert_with(GalleryForm::default).title = title.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.editing
            .get_or_insert_with(GalleryForm::default)
            .description = description.to_string();
    }

    /// Save the modal. Blank titles keep the modal open and change nothing.
    pub fn save(&mut self) -> Option<GalleryImage> {
        let form = self.editing.clone()?;
        if form.title.trim().is_empty() {
            return None;
        }

        let saved = match form.id {
            None => self
                .service
                .create_image(GalleryDraft {
                    title: form.title,
                    description: form.description,
                })
                .ok(),
            Some(id) => self.service.update_image(
                id,
                &GalleryPatch {
                    title: Some(form.title),
                    description: Some(form.description),
                    ..Default::default()
                },
            ),
        };
        self.close_modal();
        saved
    }

    pub fn delete(&mut self, image_id: i64, confirmation: &dyn Confirmation) -> Option<GalleryImage> {
        self.service.delete_image(image_id, confirmation)
    }

    /// Escape closes the modal first, then the lightbox.
    pub fn on_escape(&mut self) {
        if self.is_modal_open() {
            self.close_modal();
        } else if self.lightbox.is_open() {
            self.close_lightbox();
        }
    }
}
