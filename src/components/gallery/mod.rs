//! Clip gallery (`#/gallery`).
//!
//! Every recorded clip as a card, newest first, revealed in chunks as the
//! sentinel below the grid scrolls into view.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::hooks::{use_lazy_images, use_persisted, use_sentinel, use_store_query};
use crate::components::icons as ic;
use crate::config::{pref_keys, resources};
use crate::models::{Day, GalleryCard, GalleryView, Pager, filter_cards, flatten_clips};

stylance::import_crate_style!(css, "src/components/gallery/gallery.module.css");

#[component]
pub fn GalleryPage() -> impl IntoView {
    let cards = use_store_query(resources::CLIPS, |store| async move {
        let days = store
            .list_as::<Vec<Day>>(resources::CLIPS, None)
            .await
            .unwrap_or_default();
        flatten_clips(&days)
    });
    let filter = use_persisted(pref_keys::GALLERY_FILTER, "all".to_string());
    let layout = use_persisted(pref_keys::GALLERY_VIEW, GalleryView::Grid);

    let labels = Memo::new(move |_| {
        cards.data.with(|cards| {
            let mut labels: Vec<String> = cards
                .iter()
                .flatten()
                .map(|card| card.label.clone())
                .collect();
            labels.sort();
            labels.dedup();
            labels
        })
    });
    let filtered = Memo::new(move |_| {
        cards.data.with(|cards| {
            let cards = cards.as_deref().unwrap_or_default();
            filter.with(|f| filter_cards(cards, f).into_iter().cloned().collect::<Vec<_>>())
        })
    });

    let pager = RwSignal::new(Pager::default());
    Effect::new(move |_| {
        let total = filtered.with(Vec::len);
        pager.update(|p| p.reset(total));
    });

    let shown = Memo::new(move |_| {
        let cursor = pager.with(|p| p.cursor);
        filtered.with(|cards| cards.iter().take(cursor).cloned().collect::<Vec<_>>())
    });

    let grid_ref = NodeRef::<leptos::html::Div>::new();
    let sentinel_ref = NodeRef::<leptos::html::Div>::new();
    use_lazy_images(grid_ref, move || shown.track());
    use_sentinel(sentinel_ref, move || {
        let total = filtered.with_untracked(Vec::len);
        if pager.with_untracked(|p| p.has_more(total)) {
            pager.update(|p| {
                p.load_more(total);
            });
        }
    });

    let filter_chip = move |value: String| {
        let text = if value == "all" { "All".to_string() } else { value.clone() };
        let active = {
            let value = value.clone();
            move || filter.with(|f| *f == value).to_string()
        };
        view! {
            <button
                class=css::chip
                data-active=active.clone()
                aria-pressed=active
                on:click=move |_| {
                    if filter.with_untracked(|f| *f != value) {
                        filter.set(value.clone());
                    }
                }
            >
                {text}
            </button>
        }
    };

    let view_chip = move |view: GalleryView| {
        let active = move || (layout.get() == view).to_string();
        let icon = match view {
            GalleryView::Grid => ic::GRID,
            GalleryView::List => ic::LIST,
        };
        view! {
            <button
                class=css::chip
                data-view=view.as_str()
                data-active=active
                aria-pressed=active
                title=view.as_str()
                on:click=move |_| layout.set(view)
            >
                <Icon icon=icon />
            </button>
        }
    };

    view! {
        <section class=css::page>
            <header class=css::header>
                <h1>"Gallery"</h1>
                <div class=css::chipRow role="group" aria-label="Filter clips">
                    {filter_chip("all".to_string())}
                    {move || labels.get().into_iter().map(filter_chip).collect_view()}
                </div>
                <div class=css::chipRow role="group" aria-label="Layout">
                    {view_chip(GalleryView::Grid)}
                    {view_chip(GalleryView::List)}
                </div>
            </header>

            <div class=css::grid data-view=move || layout.get().as_str() node_ref=grid_ref>
                <For
                    each=move || shown.get()
                    key=|card| card.id.clone()
                    children=move |card| view! { <Card card=card /> }
                />
            </div>
            <Show when=move || filtered.with(Vec::is_empty)>
                <p class=css::empty>"No clips"</p>
            </Show>
            <div class=css::sentinel node_ref=sentinel_ref aria-hidden="true"></div>
        </section>
    }
}

#[component]
fn Card(card: GalleryCard) -> impl IntoView {
    view! {
        <article class=css::card tabindex="0">
            <img data-src=card.thumbnail.clone() alt=format!("{} clip thumbnail", card.label) loading="lazy" />
            <div class=css::cardBody>
                <div class=css::meta>
                    <span>{card.time.clone()}</span>
                    <span class=css::miniLabel>{format!("{}s • {}%", card.duration, card.confidence)}</span>
                </div>
                <div class=css::meta>
                    <strong>{card.label.clone()}</strong>
                    <span>{card.date.clone()}</span>
                </div>
                <p>{card.summary.clone()}</p>
            </div>
            <div class=css::quickActions role="group" aria-label="Clip actions">
                <button type="button" aria-label=format!("Play {}", card.id)>
                    <Icon icon=ic::PLAY />
                    " Play"
                </button>
                <button type="button" aria-label=format!("Download {}", card.id)>
                    <Icon icon=ic::DOWNLOAD />
                    " Save"
                </button>
                <button type="button" aria-label=format!("Bookmark {}", card.id)>
                    <Icon icon=ic::BOOKMARK />
                    " Keep"
                </button>
            </div>
        </article>
    }
}
