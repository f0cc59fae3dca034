//! In-memory doubles for the store's browser boundary.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde_json::Value;

use super::backend::{Fetcher, KeyValueStorage, TaskQueue};
use crate::core::error::{FetchError, StorageError};

/// localStorage stand-in with a switch to simulate a disabled store.
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryStorage {
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing.get() {
            return Err(StorageError::ReadFailed);
        }
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::SaveFailed);
        }
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::RemoveFailed);
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Fetcher serving canned documents and counting requests per path.
///
/// Every response is delayed by one scheduler turn so concurrent callers
/// overlap the way real network requests do.
#[derive(Default)]
pub struct MockFetcher {
    responses: RefCell<HashMap<String, Result<Value, FetchError>>>,
    calls: RefCell<HashMap<String, usize>>,
}

impl MockFetcher {
    pub fn respond(&self, path: &str, response: Result<Value, FetchError>) {
        self.responses
            .borrow_mut()
            .insert(path.to_string(), response);
    }

    pub fn calls(&self, path: &str) -> usize {
        self.calls.borrow().get(path).copied().unwrap_or(0)
    }
}

impl Fetcher for MockFetcher {
    fn fetch_json(&self, path: &str) -> LocalBoxFuture<'static, Result<Value, FetchError>> {
        *self.calls.borrow_mut().entry(path.to_string()).or_default() += 1;
        let response = self
            .responses
            .borrow()
            .get(path)
            .cloned()
            .unwrap_or(Err(FetchError::HttpError(404)));
        async move {
            YieldOnce::default().await;
            response
        }
        .boxed_local()
    }
}

/// Microtask queue drained explicitly by the test.
#[derive(Default)]
pub struct ManualQueue {
    tasks: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl ManualQueue {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run queued tasks until the queue is empty.
    pub fn drain(&self) {
        loop {
            let batch: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            if batch.is_empty() {
                break;
            }
            for task in batch {
                task();
            }
        }
    }
}

impl TaskQueue for ManualQueue {
    fn defer(&self, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push(task);
    }
}

/// Future that is pending on its first poll and ready on the second.
#[derive(Default)]
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
