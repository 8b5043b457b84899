//! Lightbox navigation over an id-keyed list.

use crate::models::Identified;

/// Selected item, tracked by id so list edits do not shift the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    selected: Option<i64>,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, id: i64) {
        self.selected = Some(id);
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    /// Position of the selection in `items`, if it is still there.
    pub fn selected_index<T: Identified>(&self, items: &[T]) -> Option<usize> {
        let id = self.selected?;
        items.iter().position(|item| item.id() == id)
    }

    pub fn selected<'a, T: Identified>(&self, items: &'a [T]) -> Option<&'a T> {
        self.selected_index(items).map(|i| &items[i])
    }

    /// Advance with wrap-around. No-op when nothing valid is selected.
    pub fn next<T: Identified>(&mut self, items: &[T]) -> Option<i64> {
        let index = self.selected_index(items)?;
        let next = &items[(index + 1) % items.len()];
        self.selected = Some(next.id());
        self.selected
    }

    /// Step back with wrap-around.
    pub fn prev<T: Identified>(&mut self, items: &[T]) -> Option<i64> {
        let index = self.selected_index(items)?;
        let prev = &items[(index + items.len() - 1) % items.len()];
        self.selected = Some(prev.id());
        self.selected
    }
}
