/// In-memory, id-keyed collections with change notification.
///
/// Every mutation runs under one write lock and either applies completely or
/// not at all. Successful mutations bump a revision published on a
/// `tokio::sync::watch` channel so views can recompute.
use parking_lot::RwLock;
use tokio::sync::watch;

use crate::models::{GalleryImage, Identified, Post};

pub type PostStore = Collection<Post>;
pub type GalleryStore = Collection<GalleryImage>;

/// Outcome of looking up a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The content document has not been loaded yet
    Loading,
    NotFound,
    Found(T),
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(item) => Some(item),
            _ => None,
        }
    }
}

struct State<T> {
    items: Vec<T>,
    loaded: bool,
}

pub struct Collection<T> {
    state: RwLock<State<T>>,
    revision: watch::Sender<u64>,
}

impl<T: Identified + Clone> Collection<T> {
    /// Empty collection in the loading state.
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: RwLock::new(State {
                items: Vec::new(),
                loaded: false,
            }),
            revision,
        }
    }

    /// Collection that is already loaded with `items`.
    pub fn with_items(items: Vec<T>) -> Self {
        let store = Self::new();
        store.load(items);
        store
    }

    /// Replace the contents wholesale and mark the collection loaded.
    pub fn load(&self, items: Vec<T>) {
        {
            let mut state = self.state.write();
            state.items = items;
            state.loaded = true;
        }
        self.bump();
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().loaded
    }

    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    /// Clone of the current list, in stored order.
    pub fn snapshot(&self) -> Vec<T> {
        self.state.read().items.clone()
    }

    /// Run `f` against the current list without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let state = self.state.read();
        f(&state.items)
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.state
            .read()
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub fn lookup(&self, id: i64) -> Lookup<T> {
        let state = self.state.read();
        if !state.loaded {
            return Lookup::Loading;
        }
        match state.items.iter().find(|item| item.id() == id) {
            Some(item) => Lookup::Found(item.clone()),
            None => Lookup::NotFound,
        }
    }

    /// Build a new item with the next free id and prepend it.
    ///
    /// The id is `max(existing ids, 0) + 1`, computed under the same lock as
    /// the insert.
    pub fn insert_with(&self, build: impl FnOnce(i64) -> T) -> T {
        let item = {
            let mut state = self.state.write();
            let next_id = next_id(&state.items);
            let item = build(next_id);
            state.items.insert(0, item.clone());
            item
        };
        self.bump();
        item
    }

    /// Mutate the item with `id` in place. Returns the updated item, or
    /// `None` (and no notification) when the id is absent.
    pub fn update(&self, id: i64, f: impl FnOnce(&mut T)) -> Option<T> {
        let updated = {
            let mut state = self.state.write();
            let item = state.items.iter_mut().find(|item| item.id() == id)?;
            f(item);
            item.clone()
        };
        self.bump();
        Some(updated)
    }

    /// Like [`Collection::update`], but only when `allow` accepts the current
    /// item. The check and the mutation share one write lock; a rejected item
    /// is left untouched and no notification is sent.
    pub fn update_if(
        &self,
        id: i64,
        allow: impl FnOnce(&T) -> bool,
        f: impl FnOnce(&mut T),
    ) -> Option<T> {
        let updated = {
            let mut state = self.state.write();
            let item = state.items.iter_mut().find(|item| item.id() == id)?;
            if !allow(item) {
                return None;
            }
            f(item);
            item.clone()
        };
        self.bump();
        Some(updated)
    }

    /// Swap in `replacement` for the item with the same id.
    pub fn replace(&self, replacement: T) -> Option<T> {
        let id = replacement.id();
        self.update(id, move |item| *item = replacement)
    }

    pub fn remove(&self, id: i64) -> Option<T> {
        let removed = {
            let mut state = self.state.write();
            let index = state.items.iter().position(|item| item.id() == id)?;
            state.items.remove(index)
        };
        self.bump();
        Some(removed)
    }

    /// Current revision; increases on every applied mutation.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

impl<T: Identified + Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn next_id<T: Identified>(items: &[T]) -> i64 {
    items.iter().map(Identified::id).fold(0, i64::max) + 1
}
