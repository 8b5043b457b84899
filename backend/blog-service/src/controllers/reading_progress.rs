//! Scroll-linked indicators.

use serde::{Deserialize, Serialize};

/// Offset after which the scroll-to-top button appears, in pixels.
pub const SCROLL_TO_TOP_THRESHOLD: f64 = 400.0;

/// Geometry reported with a scroll event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }
}

/// Percentage of the article scrolled past, in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReadingProgress {
    percent: f64,
}

impl ReadingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> f64 {
        let scrollable = metrics.scroll_height - metrics.client_height;
        self.percent = if scrollable <= 0.0 {
            0.0
        } else {
            (metrics.scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
        };
        self.percent
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollToTop {
    visible: bool,
}

impl ScrollToTop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn on_scroll(&mut self, scroll_top: f64) -> bool {
        self.visible = scroll_top > SCROLL_TO_TOP_THRESHOLD;
        self.visible
    }
}
