//! Application router component.
//!
//! Handles URL-based routing with hash history.
//! Uses native hashchange events instead of leptos_router for true hash routing.
//!
//! # Architecture
//!
//! - **URL hash is the source of truth**: The page is derived from `#/page`
//! - **Nav never re-renders on navigation**: only the page slot swaps
//! - **hashchange events**: Browser back/forward buttons work automatically

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::components::calendar::CalendarPage;
use crate::components::detections::DetectionsPage;
use crate::components::feed::FeedPage;
use crate::components::gallery::GalleryPage;
use crate::components::nav::NavBar;
use crate::models::Route;

stylance::import_crate_style!(css, "src/components/router.module.css");

/// Main application router.
///
/// - `#/ai` → AI detections
/// - `#/calendar` → Calendar
/// - `#/gallery` (and anything unknown) → Gallery
/// - `#/feed` → Activity feed
#[component]
pub fn AppRouter() -> impl IntoView {
    // Create route signal from current URL hash
    let route = RwSignal::new(Route::current());

    // Set up hashchange event listener (runs once on mount)
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let closure = Closure::wrap(Box::new(move || {
            route.set(Route::current());
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }

    let route_memo = Memo::new(move |_| route.get());

    view! {
        <div class=css::layout>
            <NavBar route=route_memo />
            <main class=css::content>
                {move || match route_memo.get() {
                    Route::Detections => view! { <DetectionsPage /> }.into_any(),
                    Route::Calendar => view! { <CalendarPage /> }.into_any(),
                    Route::Gallery => view! { <GalleryPage /> }.into_any(),
                    Route::Feed => view! { <FeedPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}
