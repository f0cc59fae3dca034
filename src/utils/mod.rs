//! Browser adapters and formatting helpers.
//!
//! Provides:
//! - [`BrowserFetcher`] - `window.fetch` with timeout, bypassing the HTTP cache
//! - [`BrowserStorage`] - `localStorage` key-value backend
//! - [`MicrotaskQueue`] - Deferred store callbacks on the microtask queue
//! - [`lazy`] - Viewport observers for lazy images and infinite scroll
//! - [`format`] - Percentages, dates and relative times
//! - [`log`] - Console logging (no-op off the browser)

pub mod dom;
mod fetch;
pub mod format;
pub mod lazy;
pub mod log;
mod microtask;
mod storage;

pub use fetch::BrowserFetcher;
pub use microtask::MicrotaskQueue;
pub use storage::BrowserStorage;
