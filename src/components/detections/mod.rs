//! AI detections page (`#/ai`).
//!
//! Filterable detection grid plus summary widgets: headline stats, an
//! events-per-hour sparkline, zones, alert rules and the memory log.

use chrono::Utc;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::hooks::{use_lazy_images, use_persisted, use_store_query};
use crate::components::icons as ic;
use crate::config::{pref_keys, resources};
use crate::models::{
    Alert, Detection, DetectionFilters, DetectionStats, DetectionsDoc, MemoryEntry, Sparkline,
    Zone, visible_detections,
};
use crate::utils::format::{clock_label, percent};

stylance::import_crate_style!(css, "src/components/detections/detections.module.css");

/// Time-window chips, in hours.
const RANGE_OPTIONS: [u32; 4] = [6, 24, 72, 168];

#[component]
pub fn DetectionsPage() -> impl IntoView {
    let doc = use_store_query(resources::DETECTIONS, |store| async move {
        store
            .resource_as::<DetectionsDoc>(resources::DETECTIONS)
            .await
            .unwrap_or_default()
    });
    let filters = use_persisted(pref_keys::AI_FILTERS, DetectionFilters::default());
    let memory_collapsed = use_persisted(pref_keys::AI_MEMORY_COLLAPSED, false);

    let visible = Memo::new(move |_| {
        doc.data.with(|doc| match doc {
            Some(doc) => filters.with(|f| visible_detections(doc, f, Utc::now())),
            None => Vec::new(),
        })
    });
    let labels = Memo::new(move |_| {
        doc.data
            .with(|doc| doc.as_ref().map(DetectionsDoc::labels).unwrap_or_default())
    });
    let stats = Memo::new(move |_| {
        doc.data.with(|doc| DetectionStats::from_doc(doc.as_ref().unwrap_or(&DetectionsDoc::default())))
    });
    let sparkline = Memo::new(move |_| {
        doc.data
            .with(|doc| doc.as_ref().and_then(|d| Sparkline::from_events(&d.events_per_hour)))
    });

    let grid_ref = NodeRef::<leptos::html::Div>::new();
    use_lazy_images(grid_ref, move || visible.track());

    view! {
        <section class=css::page>
            <header class=css::header>
                <h1>"AI Detections"</h1>
                <p class=css::activeFilters>{move || filters.with(DetectionFilters::summary)}</p>
            </header>

            <FilterBar filters=filters labels=labels />

            <div class=css::stats>
                <Stat label="Detections" value=Signal::derive(move || stats.get().detections.to_string()) />
                <Stat label="Alert rules" value=Signal::derive(move || stats.get().rules.to_string()) />
                <Stat
                    label="Median confidence"
                    value=Signal::derive(move || format!("{}%", stats.get().median_confidence))
                />
            </div>

            <div class=css::layout>
                <div class=css::main>
                    <div class=css::gridHeader>
                        <h2>"Detections"</h2>
                        <span class=css::count>{move || format!("{} shown", visible.with(Vec::len))}</span>
                    </div>
                    <div class=css::grid node_ref=grid_ref>
                        <For
                            each=move || visible.get()
                            key=Detection::key
                            children=move |detection| view! { <DetectionCard detection=detection /> }
                        />
                    </div>
                    <Show when=move || visible.with(Vec::is_empty)>
                        <p class=css::empty>"No detections match these filters."</p>
                    </Show>
                </div>

                <aside class=css::side>
                    <SparklinePanel sparkline=sparkline />
                    <ZoneList zones=Signal::derive(move || doc.data.with(|d| d.as_ref().map(|d| d.zones.clone()).unwrap_or_default())) />
                    <AlertList alerts=Signal::derive(move || doc.data.with(|d| d.as_ref().map(|d| d.alerts.clone()).unwrap_or_default())) />
                    <MemoryLog
                        entries=Signal::derive(move || doc.data.with(|d| d.as_ref().map(|d| d.memory.clone()).unwrap_or_default()))
                        collapsed=memory_collapsed
                    />
                </aside>
            </div>
        </section>
    }
}

// ============================================================================
// Filters
// ============================================================================

#[component]
fn FilterBar(filters: RwSignal<DetectionFilters>, labels: Memo<Vec<String>>) -> impl IntoView {
    // Slider position while dragging; committed on `change`.
    let draft = RwSignal::new(filters.get_untracked().confidence);

    let label_chip = move |label: String, text: String| {
        let active = {
            let label = label.clone();
            move || filters.with(|f| f.label == label).to_string()
        };
        view! {
            <button
                class=css::chip
                data-active=active.clone()
                aria-pressed=active
                on:click=move |_| filters.update(|f| f.label = label.clone())
            >
                {text}
            </button>
        }
    };

    view! {
        <div class=css::filters>
            <div class=css::chipRow role="group" aria-label="Label filter">
                {label_chip("all".to_string(), "All".to_string())}
                {move || {
                    labels
                        .get()
                        .into_iter()
                        .map(|label| label_chip(label.clone(), label))
                        .collect_view()
                }}
            </div>

            <div class=css::chipRow role="group" aria-label="Time window">
                {RANGE_OPTIONS
                    .into_iter()
                    .map(|hours| {
                        let active = move || filters.with(|f| f.range == hours).to_string();
                        view! {
                            <button
                                class=css::chip
                                data-active=active
                                aria-pressed=active
                                on:click=move |_| filters.update(|f| f.range = hours)
                            >
                                {format!("{}h", hours)}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <label class=css::confidence>
                <span>"Min confidence"</span>
                <input
                    type="range"
                    min="0"
                    max="1"
                    step="0.05"
                    prop:value=move || draft.get().to_string()
                    aria-valuenow=move || draft.get().to_string()
                    on:input=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse::<f64>() {
                            draft.set(value);
                        }
                    }
                    on:change=move |_| filters.update(|f| f.confidence = draft.get_untracked())
                />
                <span class=css::confidenceValue>{move || format!("{}%", percent(draft.get()))}</span>
            </label>

            <Show when=move || filters.with(|f| *f != DetectionFilters::default())>
                <button
                    class=css::reset
                    on:click=move |_| {
                        let defaults = DetectionFilters::default();
                        draft.set(defaults.confidence);
                        filters.set(defaults);
                    }
                >
                    <Icon icon=ic::CLOSE />
                    <span>"Reset"</span>
                </button>
            </Show>
        </div>
    }
}

// ============================================================================
// Detection Grid
// ============================================================================

#[component]
fn DetectionCard(detection: Detection) -> impl IntoView {
    let label = detection.label.clone().unwrap_or_else(|| "—".to_string());
    let zone = detection.zone.clone().unwrap_or_else(|| "Unmapped zone".to_string());
    let summary = detection
        .summary
        .clone()
        .unwrap_or_else(|| "No summary provided.".to_string());

    view! {
        <article class=css::card tabindex="0">
            <img
                data-src=detection.thumbnail.clone().unwrap_or_default()
                alt=format!("{} detection thumbnail", label)
                loading="lazy"
            />
            <div class=css::cardMeta>
                <span class=css::badge>{format!("{}%", percent(detection.confidence()))}</span>
                <span>{clock_label(detection.time.as_deref())}</span>
            </div>
            <div class=css::miniLabel>{format!("{} in {}", label, zone)}</div>
            <p>{summary}</p>
        </article>
    }
}

#[component]
fn Stat(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class=css::stat>
            <span class=css::statValue>{value}</span>
            <span class=css::miniLabel>{label}</span>
        </div>
    }
}

// ============================================================================
// Side Panels
// ============================================================================

#[component]
fn SparklinePanel(sparkline: Memo<Option<Sparkline>>) -> impl IntoView {
    view! {
        <div class=css::panel>
            <h3>"Events per hour"</h3>
            {move || match sparkline.get() {
                Some(spark) => view! {
                    <svg class=css::sparkline viewBox="0 0 100 100" preserveAspectRatio="none">
                        <polyline points=spark.points fill="none" stroke="currentColor" stroke-width="2" />
                    </svg>
                    <span class=css::miniLabel>{spark.summary}</span>
                }
                .into_any(),
                None => view! {
                    <p class=css::empty>"No events recorded."</p>
                    <span class=css::miniLabel>"No activity"</span>
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
fn ZoneList(zones: Signal<Vec<Zone>>) -> impl IntoView {
    view! {
        <div class=css::panel>
            <h3>"Zones"</h3>
            {move || {
                zones
                    .get()
                    .into_iter()
                    .map(|zone| view! {
                        <div class=css::row>
                            <strong>{zone.name}</strong>
                            <span>{zone.schedule}</span>
                            <span class=css::miniLabel>{format!("State: {}", zone.state)}</span>
                        </div>
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn AlertList(alerts: Signal<Vec<Alert>>) -> impl IntoView {
    view! {
        <div class=css::panel>
            <h3>"Alert rules"</h3>
            {move || {
                let alerts = alerts.get();
                if alerts.is_empty() {
                    return view! { <p class=css::empty>"No alerts triggered."</p> }.into_any();
                }
                alerts
                    .into_iter()
                    .map(|alert| view! {
                        <div class=css::row data-severity=alert.severity.clone()>
                            <strong>{alert.rule.clone()}</strong>
                            <span>{alert.message.clone()}</span>
                            <span class=css::miniLabel>
                                {format!("{} • {}", clock_label(alert.triggered_at.as_deref()), alert.state)}
                            </span>
                        </div>
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn MemoryLog(entries: Signal<Vec<MemoryEntry>>, collapsed: RwSignal<bool>) -> impl IntoView {
    view! {
        <div class=css::panel>
            <div class=css::panelHeader>
                <h3>"Memory"</h3>
                <button
                    class=css::iconButton
                    aria-pressed=move || collapsed.get().to_string()
                    data-active=move || collapsed.get().to_string()
                    title=move || if collapsed.get() { "Expand" } else { "Collapse" }
                    on:click=move |_| collapsed.update(|c| *c = !*c)
                >
                    {move || if collapsed.get() {
                        view! { <Icon icon=ic::CHEVRON_DOWN /> }.into_any()
                    } else {
                        view! { <Icon icon=ic::CHEVRON_UP /> }.into_any()
                    }}
                </button>
            </div>
            <div hidden=move || collapsed.get()>
                {move || {
                    let entries = entries.get();
                    if entries.is_empty() {
                        return view! { <p class=css::empty>"Memory log is quiet."</p> }.into_any();
                    }
                    entries
                        .into_iter()
                        .map(|entry| view! {
                            <div class=css::row>
                                <strong>{entry.summary}</strong>
                                <span>{clock_label(entry.time.as_deref())}</span>
                                <span>{entry.detail}</span>
                            </div>
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </div>
    }
}
