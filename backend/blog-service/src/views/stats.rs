//! Home page figures: word count, visits and site uptime.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::filters::visible_posts;
use super::word_count::total_word_count;
use crate::models::{Post, SiteStats};

/// Elapsed time since launch, split for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Uptime {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Time from `launch` to `now`; zero when the launch is in the future.
pub fn uptime_since(launch: DateTime<Utc>, now: DateTime<Utc>) -> Uptime {
    let total = (now - launch).num_seconds();
    if total < 0 {
        return Uptime::default();
    }
    Uptime {
        days: total / 86_400,
        hours: (total % 86_400) / 3_600,
        minutes: (total % 3_600) / 60,
        seconds: total % 60,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteOverview {
    pub total_word_count: usize,
    pub total_visits: u64,
    pub post_count: usize,
    pub uptime: Uptime,
}

pub fn site_overview(
    posts: &[Post],
    stats: &SiteStats,
    admin: bool,
    launch: DateTime<Utc>,
    now: DateTime<Utc>,
) -> SiteOverview {
    let visible = visible_posts(posts, admin);
    SiteOverview {
        total_word_count: total_word_count(&visible),
        total_visits: stats.total_visits,
        post_count: visible.len(),
        uptime: uptime_since(launch, now),
    }
}
