//! Boundary traits between the store and the browser.
//!
//! The store never touches `web_sys` directly. It talks to the network,
//! to durable key-value storage and to the task scheduler through these
//! traits, so it can be instantiated with in-memory doubles in tests.
//!
//! None of the traits require `Send`: WASM is single-threaded and JS values
//! cannot cross threads.

use futures::future::LocalBoxFuture;
use serde_json::Value;

use crate::core::error::{FetchError, StorageError};

/// Fetches a JSON document by path.
///
/// Implementations must bypass any HTTP cache: the store does its own
/// caching and relies on `invalidate` meaning "go to the network".
pub trait Fetcher {
    fn fetch_json(&self, path: &str) -> LocalBoxFuture<'static, Result<Value, FetchError>>;
}

/// Durable string key-value storage (localStorage on the web).
pub trait KeyValueStorage {
    /// Returns `Ok(None)` if the key doesn't exist.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Returns `Ok(())` even if the key didn't exist.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Deferred task scheduling.
///
/// `defer` must run the task after the current synchronous call stack
/// unwinds and before any further I/O completes (a microtask on the web).
pub trait TaskQueue {
    fn defer(&self, task: Box<dyn FnOnce()>);
}
