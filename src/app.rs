//! Root application module.
//!
//! Contains the main App component, AppContext definition, and
//! application-level setup logic following Leptos conventions.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::AppRouter;
use crate::config::{resource_registry, resources};
use crate::core::store::Store;
use crate::utils::{BrowserFetcher, BrowserStorage, MicrotaskQueue, log};

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Note
///
/// The [`Store`] is single-threaded (`Rc`), so it lives in a local
/// [`StoredValue`]. The handle itself is `Copy` and can be captured by
/// any view closure.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Resource cache, subscription bus and preferences.
    pub store: StoredValue<Store, LocalStorage>,
}

impl AppContext {
    /// Creates the context around a store wired to the browser.
    pub fn new() -> Self {
        let store = Store::new(
            resource_registry(),
            Rc::new(BrowserFetcher),
            Rc::new(BrowserStorage),
            Rc::new(MicrotaskQueue),
        );
        Self {
            store: StoredValue::new_local(store),
        }
    }

    /// Warm the static documents shared by several pages.
    pub fn prefetch(&self) {
        let store = self.store.get_value();
        spawn_local(async move {
            let names = [resources::DETECTIONS, resources::CLIPS, resources::RAIL];
            if let Err(err) = store.prefetch(&names).await {
                log::error(&err.to_string());
            }
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Starts fetching the static documents
/// - Wraps the app in an ErrorBoundary for graceful error handling
/// - Renders the router
#[component]
pub fn App() -> impl IntoView {
    // Create and provide application context
    let ctx = AppContext::new();
    provide_context(ctx);
    ctx.prefetch();

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #0b1120;
                    color: #e2e8f0;
                    font-family: system-ui, sans-serif;
                ">
                    <div style="
                        max-width: 600px;
                        text-align: center;
                    ">
                        <h1 style="color: #f87171; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #94a3b8; margin-bottom: 2rem;">
                            "An unexpected error occurred. Please try reloading the page."
                        </p>
                        <details style="
                            text-align: left;
                            background: #111827;
                            padding: 1rem;
                            border-radius: 4px;
                            margin-bottom: 1rem;
                        ">
                            <summary style="cursor: pointer; color: #64748b;">
                                "Error details"
                            </summary>
                            <ul style="
                                margin: 1rem 0 0 0;
                                padding-left: 1.5rem;
                                color: #f87171;
                                font-size: 0.9rem;
                            ">
                                {move || errors.get()
                                    .into_iter()
                                    .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                    .collect::<Vec<_>>()
                                }
                            </ul>
                        </details>
                        <button
                            on:click=move |_| {
                                if let Some(window) = web_sys::window() {
                                    let _ = window.location().reload();
                                }
                            }
                            style="
                                background: #4f46e5;
                                color: white;
                                border: none;
                                padding: 0.75rem 2rem;
                                border-radius: 4px;
                                cursor: pointer;
                                font-size: 1rem;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <AppRouter />
        </ErrorBoundary>
    }
}
