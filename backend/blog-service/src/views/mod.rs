/// Derived View-State Engine
///
/// Pure functions and small view-state holders that turn the post list plus
/// UI inputs (query, tag, page, admin flag) into what the pages render.
/// Nothing here caches results; callers recompute on read, typically after
/// a store revision change.
pub mod archive;
pub mod detail;
pub mod filters;
pub mod pagination;
pub mod stats;
pub mod toc;
pub mod word_count;

pub use archive::{ArchivePage, ArchiveView, MonthBucket, YearBucket};
pub use detail::{lookup_post, lookup_post_param, parse_post_id, PostDetail};
pub use filters::{collect_tags, filter_by_tag, search_param, search_posts, visible_posts};
pub use pagination::{page_slice, total_pages, ArticleListView, ArticlePage, DEFAULT_PAGE_SIZE};
pub use stats::{site_overview, uptime_since, SiteOverview, Uptime};
pub use toc::{extract_headings, Heading};
pub use word_count::{count_words, total_word_count};
