//! Scroll, visibility and lightbox state machines driven by UI events.

pub mod lightbox;
pub mod reading_progress;
pub mod section_tracker;

pub use lightbox::Lightbox;
pub use reading_progress::{ReadingProgress, ScrollMetrics, ScrollToTop, SCROLL_TO_TOP_THRESHOLD};
pub use section_tracker::{IntersectionEntry, SectionTracker};
