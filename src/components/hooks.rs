//! Shared hooks connecting views to the store.
//!
//! - [`use_store_query`] / [`use_resource`] - Reactive store reads, refreshed on notifications
//! - [`use_persisted`] - Signal backed by a namespaced localStorage preference
//! - [`use_lazy_images`] / [`use_sentinel`] - Viewport observers bound to rendered nodes

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::config::lazy_load;
use crate::core::store::Store;
use crate::utils::lazy::{LAZY_IMAGE_SELECTOR, ViewportObserver, lazy_image_observer};
use crate::utils::log;

fn app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext must be provided at root")
}

/// The application store.
pub fn use_store() -> Store {
    app_context().store.get_value()
}

// ============================================================================
// Query Versioning
// ============================================================================

/// Request token for async view queries.
///
/// Each query takes a fresh token before awaiting; only the holder of the
/// latest token may publish its result, so a slow earlier query can't
/// overwrite a newer one.
#[derive(Clone, Debug, Default)]
pub struct QueryVersion(Rc<Cell<u64>>);

impl QueryVersion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new query, superseding all earlier ones.
    pub fn next(&self) -> u64 {
        let token = self.0.get() + 1;
        self.0.set(token);
        token
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.0.get() == token
    }
}

// ============================================================================
// Store Queries
// ============================================================================

/// Result of [`use_store_query`].
pub struct StoreQuery<T: 'static> {
    /// `None` until the first query resolves.
    pub data: ReadSignal<Option<T>>,
    /// Invalidate the resource and query it again.
    pub refresh: Callback<()>,
}

impl<T: 'static> Clone for StoreQuery<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for StoreQuery<T> {}

/// Run `query` against the store now and again whenever `name` is
/// (re)loaded. Unsubscribes when the owning component is disposed.
pub fn use_store_query<T, F, Fut>(name: &'static str, query: F) -> StoreQuery<T>
where
    T: Send + Sync + 'static,
    F: Fn(Store) -> Fut + 'static,
    Fut: Future<Output = T> + 'static,
{
    let ctx = app_context();
    let store = ctx.store.get_value();
    let (data, set_data) = signal(None::<T>);
    let version = QueryVersion::new();

    let run: Rc<dyn Fn()> = {
        let store = store.clone();
        Rc::new(move || {
            let token = version.next();
            let version = version.clone();
            let pending = query(store.clone());
            spawn_local(async move {
                let value = pending.await;
                if version.is_current(token) {
                    let _ = set_data.try_set(Some(value));
                }
            });
        })
    };

    let subscription = {
        let run = Rc::clone(&run);
        match store.subscribe(name, move |_| run()) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                log::error(&err.to_string());
                None
            }
        }
    };
    run();

    let subscription = StoredValue::new_local(subscription);
    on_cleanup(move || {
        subscription.try_update_value(|slot| {
            if let Some(subscription) = slot.take() {
                subscription.unsubscribe();
            }
        });
    });

    let runner = StoredValue::new_local(run);
    let store_handle = ctx.store;
    let refresh = Callback::new(move |_| {
        store_handle.with_value(|store| store.invalidate(Some(name)));
        runner.with_value(|run| run());
    });

    StoreQuery { data, refresh }
}

/// Raw document for `name` (degraded resources yield `{}`).
pub fn use_resource(name: &'static str) -> StoreQuery<Value> {
    use_store_query(name, move |store| async move {
        store.resource(name).await.unwrap_or_else(|err| {
            log::error(&err.to_string());
            Value::Null
        })
    })
}

// ============================================================================
// Persisted Preferences
// ============================================================================

/// Signal initialized from `read_local(key, default)` that writes every
/// later change back with `save_local`. Returning to `default` clears the key.
pub fn use_persisted<T>(key: &'static str, default: T) -> RwSignal<T>
where
    T: Serialize + DeserializeOwned + PartialEq + Clone + Send + Sync + 'static,
{
    let store = app_context().store;
    let initial = store.with_value(|s| s.read_local(key, default.clone()));
    let value = RwSignal::new(initial);

    Effect::new(move |previous: Option<()>| {
        value.with(|current| {
            // first run only registers the dependency
            if previous.is_none() {
                return;
            }
            store.with_value(|s| {
                if *current == default {
                    s.remove_local(key);
                } else {
                    s.save_local(key, current);
                }
            });
        });
    });

    value
}

// ============================================================================
// Viewport Observers
// ============================================================================

/// Lazy-load `img[data-src]` under `container` each time `track` changes.
pub fn use_lazy_images(container: NodeRef<html::Div>, track: impl Fn() + 'static) {
    let observer = StoredValue::new_local(None::<ViewportObserver>);

    Effect::new(move |_| {
        track();
        let Some(element) = container.get() else {
            return;
        };
        // wait for the list to render its new items
        request_animation_frame(move || {
            observer.update_value(|slot| {
                if slot.is_none() {
                    *slot = lazy_image_observer();
                }
                if let Some(observer) = slot {
                    observer.observe_all(&element, LAZY_IMAGE_SELECTOR);
                }
            });
        });
    });
}

/// Call `on_visible` whenever `sentinel` scrolls into view.
pub fn use_sentinel(sentinel: NodeRef<html::Div>, on_visible: impl Fn() + 'static) {
    let on_visible = Rc::new(on_visible);
    let observer = StoredValue::new_local(None::<ViewportObserver>);

    Effect::new(move |_| {
        let Some(element) = sentinel.get() else {
            return;
        };
        let on_visible = Rc::clone(&on_visible);
        observer.update_value(|slot| {
            *slot = ViewportObserver::new(
                lazy_load::SENTINEL_ROOT_MARGIN,
                lazy_load::SENTINEL_THRESHOLD,
                move |_, _| on_visible(),
            );
            if let Some(observer) = slot {
                observer.observe(&element);
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_version_supersedes_earlier_tokens() {
        let version = QueryVersion::new();
        let first = version.next();
        let shared = version.clone();
        let second = shared.next();

        assert!(!version.is_current(first));
        assert!(version.is_current(second));
        assert!(shared.is_current(second));
    }
}
