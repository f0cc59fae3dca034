//! Viewport-intersection helpers.
//!
//! Provides:
//! - [`ViewportObserver`] - Runs a callback when observed elements scroll into view
//! - [`lazy_image_observer`] - Swaps `data-src` into `src` for offscreen images
//!
//! These sit on top of the rendered DOM and know nothing about the store.

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{
    Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::config::lazy_load;

type EntryCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Wrapper around `IntersectionObserver` that owns its JS callback.
///
/// The observer is disconnected when dropped.
pub struct ViewportObserver {
    observer: IntersectionObserver,
    _callback: EntryCallback,
}

impl ViewportObserver {
    /// Create an observer calling `on_enter` for every element that becomes
    /// visible. The callback also receives the observer so it can
    /// `unobserve` one-shot targets.
    ///
    /// Returns `None` when the browser has no `IntersectionObserver`.
    pub fn new<F>(root_margin: &str, threshold: f64, mut on_enter: F) -> Option<Self>
    where
        F: FnMut(Element, &IntersectionObserver) + 'static,
    {
        let callback: EntryCallback = Closure::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        on_enter(entry.target(), &observer);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_root_margin(root_margin);
        options.set_threshold(&threshold.into());

        let observer = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .ok()?;

        Some(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    /// Observe every element under `container` matching `selector`.
    pub fn observe_all(&self, container: &Element, selector: &str) {
        let Ok(nodes) = container.query_selector_all(selector) else {
            return;
        };
        for i in 0..nodes.length() {
            if let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                self.observer.observe(&element);
            }
        }
    }
}

impl Drop for ViewportObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Observer that loads `img[data-src]` elements as they approach the viewport.
///
/// Each image is loaded once and then unobserved.
pub fn lazy_image_observer() -> Option<ViewportObserver> {
    ViewportObserver::new(
        lazy_load::IMAGE_ROOT_MARGIN,
        lazy_load::IMAGE_THRESHOLD,
        |element, observer| {
            if let Ok(img) = element.clone().dyn_into::<HtmlImageElement>()
                && let Some(src) = img.get_attribute("data-src")
            {
                img.set_src(&src);
                let _ = img.remove_attribute("data-src");
            }
            observer.unobserve(&element);
        },
    )
}

/// CSS selector for images still waiting to be loaded.
pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
