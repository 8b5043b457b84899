//! Post detail lookup.

use serde::Serialize;

use super::toc::{extract_headings, Heading};
use crate::models::Post;
use crate::store::{Lookup, PostStore};

/// Route ids that are not positive integers never match a post.
pub fn parse_post_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Resolve a post for the viewer. Unpublished posts are reported as
/// missing to non-admin viewers.
pub fn lookup_post(store: &PostStore, id: i64, admin: bool) -> Lookup<Post> {
    match store.lookup(id) {
        Lookup::Found(post) if !admin && !post.published => Lookup::NotFound,
        other => other,
    }
}

/// Same as [`lookup_post`], starting from the raw route parameter.
pub fn lookup_post_param(store: &PostStore, raw: &str, admin: bool) -> Lookup<Post> {
    if !store.is_loaded() {
        return Lookup::Loading;
    }
    match parse_post_id(raw) {
        Some(id) => lookup_post(store, id, admin),
        None => Lookup::NotFound,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub toc: Vec<Heading>,
}

impl PostDetail {
    pub fn new(post: Post) -> Self {
        let toc = extract_headings(&post.content);
        Self { post, toc }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PostStore {
        let posts = serde_json::from_value(serde_json::json!([
            {"id": 1, "title": "public", "content": "### One\n### Two"},
            {"id": 2, "title": "draft", "published": false}
        ]))
        .unwrap();
        PostStore::with_items(posts)
    }

    #[test]
    fn route_ids_must_be_positive_integers() {
        assert_eq!(parse_post_id("12"), Some(12));
        assert_eq!(parse_post_id("0"), None);
        assert_eq!(parse_post_id("-3"), None);
        assert_eq!(parse_post_id("abc"), None);
    }

    #[test]
    fn drafts_are_hidden_from_visitors() {
        let store = store();
        assert_eq!(lookup_post(&store, 2, false), Lookup::NotFound);
        assert!(matches!(lookup_post(&store, 2, true), Lookup::Found(_)));
        assert_eq!(lookup_post_param(&store, "nope", true), Lookup::NotFound);
    }

    #[test]
    fn unloaded_store_reports_loading() {
        let store = PostStore::new();
        assert_eq!(lookup_post_param(&store, "1", false), Lookup::Loading);
    }

    #[test]
    fn detail_carries_table_of_contents() {
        let post = store().get(1).unwrap();
        let detail = PostDetail::new(post);
        assert_eq!(detail.toc.len(), 2);
        assert_eq!(detail.toc[1].id, "two-1");
    }
}
