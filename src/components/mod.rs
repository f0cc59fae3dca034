//! UI components built with Leptos.
//!
//! - [`router`] - Application routing (main entry point)
//! - [`nav`] - Navigation bar with rail status
//! - [`hooks`] - Store queries, persisted preferences, viewport observers
//! - [`icons`] - Centralized icon definitions (change theme here)
//! - [`detections`] - AI detection feed
//! - [`calendar`] - Month/week clip calendar
//! - [`gallery`] - Clip gallery
//! - [`feed`] - Activity feed

pub mod calendar;
pub mod detections;
pub mod feed;
pub mod gallery;
pub mod hooks;
pub mod icons;
pub mod nav;
pub mod router;

pub use router::AppRouter;
