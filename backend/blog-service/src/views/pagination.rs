//! Page arithmetic and the article list view.

use serde::Serialize;

use super::filters::{filter_by_tag, search_posts, visible_posts};
use crate::models::Post;

/// Posts per page on the articles list.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// `ceil(count / page_size)`; zero items means zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    (count + page_size - 1) / page_size
}

/// Items of the 1-based `page`: `[(page-1)*size, page*size)` clipped to the list.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// One rendered page of the articles list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub posts: Vec<Post>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub query: Option<String>,
    pub tag: Option<String>,
}

/// View state behind the articles page: search query, optional tag and the
/// current page. Results are recomputed from the post list on every read.
#[derive(Debug, Clone)]
pub struct ArticleListView {
    page_size: usize,
    query: Option<String>,
    tag: Option<String>,
    current_page: usize,
}

impl ArticleListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            query: None,
            tag: None,
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Changing the query sends the view back to page 1.
    pub fn set_query(&mut self, query: Option<String>) {
        if self.query != query {
            self.query = query;
            self.current_page = 1;
        }
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        if self.tag != tag {
            self.tag = tag;
            self.current_page = 1;
        }
    }

    /// Filtered list before pagination.
    pub fn filtered(&self, posts: &[Post], admin: bool) -> Vec<Post> {
        let visible = visible_posts(posts, admin);
        let tagged = filter_by_tag(visible, self.tag.as_deref());
        search_posts(tagged, self.query.as_deref())
    }

    pub fn total_pages(&self, posts: &[Post], admin: bool) -> usize {
        total_pages(self.filtered(posts, admin).len(), self.page_size)
    }

    /// Move to `page` if it lies in `[1, total_pages]`; otherwise nothing changes.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page >= 1 && page <= total_pages {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self, total_pages: usize) -> bool {
        self.go_to_page(self.current_page + 1, total_pages)
    }

    pub fn prev_page(&mut self, total_pages: usize) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page, total_pages),
            None => false,
        }
    }

    pub fn compute(&self, posts: &[Post], admin: bool) -> ArticlePage {
        let filtered = self.filtered(posts, admin);
        let total_count = filtered.len();
        ArticlePage {
            posts: page_slice(&filtered, self.current_page, self.page_size).to_vec(),
            page: self.current_page,
            total_pages: total_pages(total_count, self.page_size),
            total_count,
            query: self.query.clone(),
            tag: self.tag.clone(),
        }
    }
}

impl Default for ArticleListView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
