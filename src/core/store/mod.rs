//! Client-side resource store.
//!
//! A [`Store`] caches named JSON resources fetched once from static
//! endpoints, notifies subscribers when a resource is (re)loaded, and
//! answers `list`/`get`/`filter` queries over the cached value.
//!
//! # Architecture
//!
//! - [`descriptor`] - Which resources exist and how to reshape them
//! - [`query`] - Selectors and predicates used by the query façade
//! - [`bus`] - Per-resource subscriber registry
//! - [`persist`] - Namespaced localStorage preferences
//! - [`backend`] - Traits the store uses to reach the browser
//!
//! # Guarantees
//!
//! - Every value handed out is an independent clone of the cached value.
//! - Concurrent requests for an uncached resource share one fetch.
//! - Fetch and parse failures degrade into an empty, well-typed value and
//!   are still announced to subscribers. Only unknown resource names fail.
//! - Entries never expire; [`Store::invalidate`] is the only eviction.

pub mod backend;
pub mod bus;
pub mod descriptor;
pub mod persist;
pub mod query;

#[cfg(test)]
pub(crate) mod testing;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared, join_all};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::core::error::{FetchError, StoreError};
use crate::utils::log;

pub use backend::{Fetcher, KeyValueStorage, TaskQueue};
pub use bus::{Listener, Subscription, SubscriptionBus};
pub use descriptor::{DescriptorRegistry, ResourceDescriptor};
pub use persist::LocalPrefs;
pub use query::{Predicate, Selector};

// =============================================================================
// Cache Entry
// =============================================================================

/// One cached resource.
///
/// Entries are replaced wholesale, never mutated in place.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Document as fetched (`{}` for degraded entries).
    pub raw: Value,
    /// Result of the descriptor's unwrap.
    pub hydrated: Value,
    pub loaded_at: DateTime<Utc>,
    /// Set when the fetch failed and this entry is a degraded fallback.
    pub error: Option<FetchError>,
}

impl CacheEntry {
    fn loaded(descriptor: &ResourceDescriptor, raw: Value) -> Self {
        let hydrated = descriptor.hydrate(&raw);
        Self {
            raw,
            hydrated,
            loaded_at: Utc::now(),
            error: None,
        }
    }

    fn degraded(descriptor: &ResourceDescriptor, error: FetchError) -> Self {
        let raw = Value::Object(Default::default());
        let hydrated = descriptor.hydrate(&raw);
        Self {
            raw,
            hydrated,
            loaded_at: Utc::now(),
            error: Some(error),
        }
    }
}

type InFlight = Shared<LocalBoxFuture<'static, Rc<CacheEntry>>>;

// =============================================================================
// Store
// =============================================================================

struct StoreInner {
    registry: DescriptorRegistry,
    fetcher: Rc<dyn Fetcher>,
    tasks: Rc<dyn TaskQueue>,
    prefs: LocalPrefs,
    bus: SubscriptionBus,
    cache: RefCell<HashMap<String, Rc<CacheEntry>>>,
    in_flight: RefCell<HashMap<String, InFlight>>,
    /// Bumped on invalidation so a fetch started earlier cannot repopulate
    /// the cache after it was cleared.
    generations: RefCell<HashMap<String, u64>>,
}

/// Resource cache, subscription bus and query façade in one handle.
///
/// Cloning is cheap and every clone shares the same state. Create one per
/// application context and hand it to views through context.
#[derive(Clone)]
pub struct Store {
    inner: Rc<StoreInner>,
}

impl Store {
    pub fn new(
        registry: DescriptorRegistry,
        fetcher: Rc<dyn Fetcher>,
        storage: Rc<dyn KeyValueStorage>,
        tasks: Rc<dyn TaskQueue>,
    ) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                registry,
                fetcher,
                tasks,
                prefs: LocalPrefs::new(storage),
                bus: SubscriptionBus::new(),
                cache: RefCell::new(HashMap::new()),
                in_flight: RefCell::new(HashMap::new()),
                generations: RefCell::new(HashMap::new()),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Resource cache
    // -------------------------------------------------------------------------

    /// Return the cached entry for `name`, fetching it if necessary.
    async fn fetch_entry(&self, name: &str) -> Result<Rc<CacheEntry>, StoreError> {
        let descriptor = self.inner.registry.get(name)?;

        if let Some(entry) = self.cached(name) {
            return Ok(entry);
        }

        let pending = self.in_flight(descriptor.clone());
        Ok(pending.await)
    }

    fn cached(&self, name: &str) -> Option<Rc<CacheEntry>> {
        self.inner.cache.borrow().get(name).cloned()
    }

    fn generation(&self, name: &str) -> u64 {
        self.inner
            .generations
            .borrow()
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    /// Join the fetch already running for this resource, or start one.
    fn in_flight(&self, descriptor: ResourceDescriptor) -> InFlight {
        if let Some(pending) = self.inner.in_flight.borrow().get(descriptor.name) {
            return pending.clone();
        }

        let store = self.clone();
        let generation = self.generation(descriptor.name);
        let name = descriptor.name;
        let pending = async move { store.load(descriptor, generation).await }
            .boxed_local()
            .shared();

        self.inner
            .in_flight
            .borrow_mut()
            .insert(name.to_string(), pending.clone());
        pending
    }

    async fn load(&self, descriptor: ResourceDescriptor, generation: u64) -> Rc<CacheEntry> {
        let entry = match self.inner.fetcher.fetch_json(&descriptor.path).await {
            Ok(raw) => CacheEntry::loaded(&descriptor, raw),
            Err(err) => {
                log::warn(&format!(
                    "store: failed to load {}: {}",
                    descriptor.name, err
                ));
                CacheEntry::degraded(&descriptor, err)
            }
        };
        let entry = Rc::new(entry);

        // Invalidated while the request was out: answer our own callers
        // but leave the cache and in-flight slot to the next fetch.
        if self.generation(descriptor.name) != generation {
            return entry;
        }

        self.inner
            .cache
            .borrow_mut()
            .insert(descriptor.name.to_string(), Rc::clone(&entry));
        self.inner.in_flight.borrow_mut().remove(descriptor.name);

        self.inner.bus.notify(descriptor.name, &entry.hydrated);
        entry
    }

    /// Deep clone of the raw (pre-unwrap) document.
    pub async fn resource(&self, name: &str) -> Result<Value, StoreError> {
        Ok(self.fetch_entry(name).await?.raw.clone())
    }

    /// Raw document deserialized into `T`.
    ///
    /// A document that doesn't match `T` is logged and yields
    /// `T::default()`, like any other degraded resource.
    pub async fn resource_as<T>(&self, name: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let raw = self.resource(name).await?;
        Ok(decode_or_default(name, raw))
    }

    /// Error recorded on the cached entry, if the last fetch failed.
    pub fn last_error(&self, name: &str) -> Option<FetchError> {
        self.cached(name).and_then(|entry| entry.error.clone())
    }

    /// Whether `name` currently has a cache entry.
    pub fn is_cached(&self, name: &str) -> bool {
        self.inner.cache.borrow().contains_key(name)
    }

    // -------------------------------------------------------------------------
    // Query façade
    // -------------------------------------------------------------------------

    /// Clone of the hydrated value, optionally narrowed by `selector`.
    pub async fn list(&self, name: &str, selector: Option<&Selector>) -> Result<Value, StoreError> {
        let entry = self.fetch_entry(name).await?;
        Ok(match selector {
            Some(selector) => selector.select(&entry.hydrated),
            None => entry.hydrated.clone(),
        })
    }

    /// Hydrated (and selected) value deserialized into `T`.
    pub async fn list_as<T>(&self, name: &str, selector: Option<&Selector>) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let value = self.list(name, selector).await?;
        Ok(decode_or_default(name, value))
    }

    /// Item whose id field equals `id`, or `None`.
    ///
    /// Scans linearly; no index is kept.
    pub async fn get(
        &self,
        name: &str,
        id: &Value,
        selector: Option<&Selector>,
    ) -> Result<Option<Value>, StoreError> {
        let id_key = self.inner.registry.get(name)?.id_key;
        let entry = self.fetch_entry(name).await?;
        let source = query::collection(&entry.hydrated, selector);
        Ok(query::find_by_id(&source, id_key, id))
    }

    /// Items matching `predicate`. Non-array sources yield no items.
    pub async fn filter(
        &self,
        name: &str,
        predicate: &Predicate,
        selector: Option<&Selector>,
    ) -> Result<Vec<Value>, StoreError> {
        let entry = self.fetch_entry(name).await?;
        let source = query::collection(&entry.hydrated, selector);
        Ok(query::filter_items(&source, predicate))
    }

    /// Fetch several resources concurrently.
    ///
    /// All names are validated before any request starts.
    pub async fn prefetch(&self, names: &[&str]) -> Result<(), StoreError> {
        for name in names {
            self.inner.registry.get(name)?;
        }
        let results = join_all(names.iter().map(|name| self.fetch_entry(name))).await;
        results.into_iter().try_for_each(|r| r.map(|_| ()))
    }

    /// Drop one cached entry, or all of them when `name` is `None`.
    ///
    /// Nothing is re-fetched or re-announced; the next accessor does that.
    pub fn invalidate(&self, name: Option<&str>) {
        let names: Vec<String> = match name {
            Some(name) => vec![name.to_string()],
            None => self.inner.registry.names().map(String::from).collect(),
        };

        let mut generations = self.inner.generations.borrow_mut();
        for name in &names {
            *generations.entry(name.clone()).or_default() += 1;
        }
        drop(generations);

        match name {
            Some(name) => {
                self.inner.cache.borrow_mut().remove(name);
                self.inner.in_flight.borrow_mut().remove(name);
            }
            None => {
                self.inner.cache.borrow_mut().clear();
                self.inner.in_flight.borrow_mut().clear();
            }
        }
    }

    // -------------------------------------------------------------------------
    // Subscription bus
    // -------------------------------------------------------------------------

    /// Listen for (re)loads of `name`.
    ///
    /// If the resource is already cached, `callback` also receives the
    /// current snapshot on the next microtask.
    pub fn subscribe<F>(&self, name: &str, callback: F) -> Result<Subscription, StoreError>
    where
        F: Fn(Value) + 'static,
    {
        self.try_subscribe(name, move |value| {
            callback(value);
            Ok::<(), String>(())
        })
    }

    /// Like [`Store::subscribe`] for callbacks that can fail.
    ///
    /// A failing callback is logged; other subscribers still run.
    pub fn try_subscribe<F, E>(&self, name: &str, callback: F) -> Result<Subscription, StoreError>
    where
        F: Fn(Value) -> Result<(), E> + 'static,
        E: Display,
    {
        self.inner.registry.get(name)?;

        let listener: Listener =
            Rc::new(move |value: Value| callback(value).map_err(|e| e.to_string()));
        let subscription = self.inner.bus.add(name, Rc::clone(&listener));

        if let Some(entry) = self.cached(name) {
            let bus = self.inner.bus.clone();
            let name = name.to_string();
            let id = subscription.id();
            self.inner.tasks.defer(Box::new(move || {
                if !bus.contains(&name, id) {
                    return;
                }
                if let Err(err) = listener(entry.hydrated.clone()) {
                    log::warn(&format!(
                        "store: subscriber callback for \"{}\" failed: {}",
                        name, err
                    ));
                }
            }));
        }

        Ok(subscription)
    }

    // -------------------------------------------------------------------------
    // Local persistence
    // -------------------------------------------------------------------------

    /// Persist a view preference. Best-effort.
    pub fn save_local<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        self.inner.prefs.save(key, value);
    }

    /// Read a view preference, or `fallback`.
    pub fn read_local<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.inner.prefs.read(key, fallback)
    }

    pub fn remove_local(&self, key: &str) {
        self.inner.prefs.remove(key);
    }
}

fn decode_or_default<T: DeserializeOwned + Default>(name: &str, value: Value) -> T {
    serde_json::from_value(value).unwrap_or_else(|err| {
        log::warn(&format!("store: unexpected shape for \"{}\": {}", name, err));
        T::default()
    })
}

// =============================================================================
// Tests
// =============================================================================
