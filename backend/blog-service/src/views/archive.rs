//! Date-bucketed archive of posts.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use super::filters::{collect_tags, filter_by_tag, visible_posts};
use crate::models::Post;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
    /// `YYYY-MM`
    pub month: String,
    pub label: String,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBucket {
    /// `YYYY`
    pub year: String,
    pub months: Vec<MonthBucket>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivePage {
    pub tags: Vec<String>,
    pub selected_tag: Option<String>,
    pub years: Vec<YearBucket>,
    /// Every month key, most recent first; drives the side navigation.
    pub months: Vec<String>,
    pub total_count: usize,
}

fn prefix(date: &str, chars: usize) -> String {
    date.chars().take(chars).collect()
}

/// Group by year (first 4 chars of `publishDate`) then month (first 7).
///
/// Years and months come out most recent first; posts keep their input
/// order inside a bucket.
pub fn group_by_month(posts: &[Post]) -> Vec<YearBucket> {
    let mut grouped: BTreeMap<String, BTreeMap<String, Vec<Post>>> = BTreeMap::new();
    for post in posts {
        grouped
            .entry(prefix(&post.publish_date, 4))
            .or_default()
            .entry(prefix(&post.publish_date, 7))
            .or_default()
            .push(post.clone());
    }

    grouped
        .into_iter()
        .rev()
        .map(|(year, months)| YearBucket {
            year,
            months: months
                .into_iter()
                .rev()
                .map(|(month, posts)| MonthBucket {
                    label: format_month(&month),
                    month,
                    posts,
                })
                .collect(),
        })
        .collect()
}

/// Month keys across all years, in display order.
pub fn sorted_months(years: &[YearBucket]) -> Vec<String> {
    years
        .iter()
        .flat_map(|y| y.months.iter().map(|m| m.month.clone()))
        .collect()
}

fn parse_month(month_key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-02", month_key), "%Y-%m-%d").ok()
}

/// `2025-09` -> `2025年9月`. Unparseable keys are returned as-is.
pub fn format_month(month_key: &str) -> String {
    match parse_month(month_key) {
        Some(date) => format!("{}年{}月", date.year(), date.month()),
        None => month_key.to_string(),
    }
}

/// `2025-09` -> `9月`.
pub fn format_month_only(month_key: &str) -> String {
    match parse_month(month_key) {
        Some(date) => format!("{}月", date.month()),
        None => month_key.to_string(),
    }
}

/// Day of month of an ISO date or timestamp.
pub fn day_of_month(date: &str) -> Option<u32> {
    NaiveDate::parse_from_str(&prefix(date, 10), "%Y-%m-%d")
        .ok()
        .map(|d| d.day())
}

/// View state behind the archive page.
#[derive(Debug, Clone, Default)]
pub struct ArchiveView {
    selected_tag: Option<String>,
}

impl ArchiveView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.selected_tag.as_deref()
    }

    pub fn select_tag(&mut self, tag: Option<String>) {
        self.selected_tag = tag;
    }

    pub fn compute(&self, posts: &[Post], admin: bool) -> ArchivePage {
        let visible = visible_posts(posts, admin);
        let tags = collect_tags(&visible);
        let filtered = filter_by_tag(visible, self.selected_tag.as_deref());
        let years = group_by_month(&filtered);
        ArchivePage {
            tags,
            selected_tag: self.selected_tag.clone(),
            months: sorted_months(&years),
            total_count: filtered.len(),
            years,
        }
    }
}
