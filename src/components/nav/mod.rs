//! Navigation bar.
//!
//! Page links plus a compact status readout for the camera rail.

use icondata::Icon as IconData;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::hooks::use_store_query;
use crate::components::icons as ic;
use crate::config::{APP_NAME, resources};
use crate::models::{RailStatus, Route};

stylance::import_crate_style!(css, "src/components/nav/nav.module.css");

fn route_icon(route: Route) -> IconData {
    match route {
        Route::Detections => ic::DETECTIONS,
        Route::Calendar => ic::CALENDAR,
        Route::Gallery => ic::GALLERY,
        Route::Feed => ic::ACTIVITY,
    }
}

#[component]
pub fn NavBar(route: Memo<Route>) -> impl IntoView {
    view! {
        <header class=css::bar>
            <span class=css::brand>{APP_NAME}</span>
            <nav class=css::links>
                {Route::ALL
                    .into_iter()
                    .map(|target| {
                        let current = move || (route.get() == target).then_some("page");
                        view! {
                            <a
                                class=css::link
                                href=target.to_hash()
                                aria-current=current
                                data-active=move || (route.get() == target).to_string()
                            >
                                <Icon icon=route_icon(target) />
                                <span class=css::linkText>{target.title()}</span>
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
            <RailIndicator />
        </header>
    }
}

/// Rail name and camera health from the `rail` resource.
#[component]
fn RailIndicator() -> impl IntoView {
    let rail = use_store_query(resources::RAIL, |store| async move {
        store
            .resource_as::<RailStatus>(resources::RAIL)
            .await
            .unwrap_or_default()
    });

    view! {
        {move || {
            rail.data.get().filter(|r| !r.name.is_empty()).map(|rail| view! {
                <span class=css::rail data-online=rail.is_online().to_string()>
                    <span class=css::railDot></span>
                    <span>{rail.name.clone()}</span>
                    <span class=css::railMeta>{rail.camera_summary()}</span>
                </span>
            })
        }}
    }
}
