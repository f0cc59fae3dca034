//! Activity feed (`#/feed`).

use chrono::Utc;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::hooks::use_store_query;
use crate::components::icons as ic;
use crate::config::resources;
use crate::models::{ActivityLog, FeedFilter, FeedItem, feed_items};

stylance::import_crate_style!(css, "src/components/feed/feed.module.css");

/// Feed items plus whether the last fetch failed.
#[derive(Clone, Debug, Default, PartialEq)]
struct FeedLoad {
    items: Vec<FeedItem>,
    failed: bool,
}

#[component]
pub fn FeedPage() -> impl IntoView {
    let feed = use_store_query(resources::ACTIVITY, |store| async move {
        let logs = store
            .list_as::<Vec<ActivityLog>>(resources::ACTIVITY, None)
            .await
            .unwrap_or_default();
        FeedLoad {
            items: feed_items(&logs),
            failed: store.last_error(resources::ACTIVITY).is_some(),
        }
    });
    let filter = RwSignal::new(FeedFilter::All);

    let shown = Memo::new(move |_| {
        let filter = filter.get();
        feed.data.with(|load| {
            load.iter()
                .flat_map(|load| load.items.iter())
                .filter(|item| filter.matches(item))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    let empty_message = move || {
        feed.data.with(|load| match load {
            None => None,
            Some(load) if load.failed => Some("Unable to load activity feed"),
            Some(load) if load.items.is_empty() => Some("No activity found"),
            Some(_) if shown.with(Vec::is_empty) => Some("No activity found for this filter."),
            Some(_) => None,
        })
    };

    view! {
        <section class=css::page>
            <header class=css::header>
                <h1>"Activity"</h1>
                <button
                    class=css::refresh
                    title="Refresh"
                    on:click=move |_| feed.refresh.run(())
                >
                    <Icon icon=ic::REFRESH />
                </button>
            </header>

            <div class=css::filters role="group" aria-label="Filter activity">
                {FeedFilter::ALL
                    .into_iter()
                    .map(|option| {
                        let active = move || (filter.get() == option).to_string();
                        view! {
                            <button
                                class=css::filterButton
                                data-active=active
                                aria-pressed=active
                                on:click=move |_| filter.set(option)
                            >
                                {option.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <ul class=css::list>
                <For
                    each=move || shown.get()
                    key=|item| item.id.clone()
                    children=move |item| view! { <FeedRow item=item /> }
                />
                {move || empty_message().map(|message| view! { <li class=css::empty>{message}</li> })}
            </ul>
        </section>
    }
}

#[component]
fn FeedRow(item: FeedItem) -> impl IntoView {
    let when = item.when(Utc::now());

    view! {
        <li class=css::item data-category=item.category.as_str()>
            <div class=css::icon>
                <Icon icon=ic::activity(item.icon) />
            </div>
            <div class=css::content>
                <div class=css::title>{item.title}</div>
                <div class=css::description>{item.description}</div>
                <div class=css::time>{when}</div>
            </div>
        </li>
    }
}
