//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`DetectionsDoc`], [`DetectionFilters`] - AI detection feed and its filters
//! - [`ClipsDoc`], [`GalleryCard`], [`Pager`] - Recorded clips and gallery cards
//! - [`CalendarModel`], [`CalendarState`] - Calendar indexing and navigation
//! - [`FeedItem`], [`FeedFilter`] - Activity feed
//! - [`RailStatus`] - Camera rail summary
//! - [`Route`] - Hash-based page navigation

mod calendar;
mod clip;
mod detection;
mod feed;
mod lenient;
mod rail;
mod route;

pub use calendar::{CalendarModel, CalendarState, CalendarView, WEEKDAYS, dots};
pub use clip::{Clip, ClipsDoc, Day, GalleryCard, GalleryView, Pager, filter_cards, flatten_clips};
pub use detection::{
    Alert, Detection, DetectionFilters, DetectionStats, DetectionsDoc, MemoryEntry, Sparkline,
    Zone, visible_detections,
};
pub use feed::{ActivityIcon, ActivityLog, FeedFilter, FeedItem, feed_items};
pub use rail::RailStatus;
pub use route::Route;
