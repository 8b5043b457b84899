//! Pure filters over the post list.

use std::collections::BTreeSet;

use crate::models::Post;

/// Published posts only, unless `admin` is set.
pub fn visible_posts(posts: &[Post], admin: bool) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| admin || p.published)
        .cloned()
        .collect()
}

/// Case-insensitive substring match on title or summary.
///
/// A missing or blank query returns the input unchanged.
pub fn search_posts(posts: Vec<Post>, query: Option<&str>) -> Vec<Post> {
    let query = match normalize_query(query) {
        Some(q) => q,
        None => return posts,
    };

    posts
        .into_iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&query) || p.summary.to_lowercase().contains(&query)
        })
        .collect()
}

/// All distinct tags, ascending.
pub fn collect_tags(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Keep posts carrying `tag`; `None` passes everything through.
pub fn filter_by_tag(posts: Vec<Post>, tag: Option<&str>) -> Vec<Post> {
    match tag {
        Some(tag) => posts.into_iter().filter(|p| p.has_tag(tag)).collect(),
        None => posts,
    }
}

/// Lower-cased, trimmed query, or `None` when nothing is left to match.
pub fn normalize_query(query: Option<&str>) -> Option<String> {
    let query = query?.trim().to_lowercase();
    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}

/// Value for the `q` route parameter after a search is submitted:
/// trimmed, and dropped entirely when blank.
pub fn search_param(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
