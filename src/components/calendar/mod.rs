//! Calendar clip browser (`#/calendar`).
//!
//! A month or week grid of recorded days and a drawer listing the clips of
//! the selected day. View, selection and drawer state survive reloads.

use chrono::Datelike;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::hooks::{use_lazy_images, use_persisted, use_store_query};
use crate::components::icons as ic;
use crate::config::{pref_keys, resources};
use crate::models::{CalendarModel, CalendarState, CalendarView, Clip, ClipsDoc, WEEKDAYS, dots};
use crate::utils::format::{format_weekday_date, parse_date};

stylance::import_crate_style!(css, "src/components/calendar/calendar.module.css");

#[component]
pub fn CalendarPage() -> impl IntoView {
    let model = use_store_query(resources::CLIPS, |store| async move {
        let doc = store
            .resource_as::<ClipsDoc>(resources::CLIPS)
            .await
            .unwrap_or_default();
        CalendarModel::new(doc)
    });
    let view_pref = use_persisted(pref_keys::CALENDAR_VIEW, CalendarView::Month);
    let selected_pref = use_persisted(pref_keys::CALENDAR_SELECTED, None::<String>);
    let drawer_collapsed = use_persisted(pref_keys::CALENDAR_DRAWER_COLLAPSED, false);

    let nav = RwSignal::new(CalendarState::default());

    // Re-position whenever the document (re)loads.
    Effect::new(move |_| {
        model.data.with(|model| {
            if let Some(model) = model {
                nav.set(CalendarState::new(
                    model,
                    view_pref.get_untracked(),
                    selected_pref.get_untracked(),
                ));
            }
        });
    });

    let select_day = move |date: String| {
        nav.update(|state| state.selection = Some(date.clone()));
        selected_pref.set(Some(date));
    };

    let set_view = move |view: CalendarView| {
        if nav.with_untracked(|state| state.view == view) {
            return;
        }
        nav.update(|state| state.view = view);
        view_pref.set(view);
    };

    let shift = move |direction: isize| {
        model.data.with_untracked(|model| {
            let Some(model) = model else {
                return;
            };
            let mut state = nav.get_untracked();
            let selected = state.shift(model, direction);
            nav.set(state);
            if let Some(date) = selected {
                selected_pref.set(Some(date));
            }
        });
    };

    let title = Memo::new(move |_| {
        model.data.with(|model| {
            let model = model.as_ref()?;
            let state = nav.get();
            Some(match state.view {
                CalendarView::Month => state
                    .current_month(model)
                    .map(CalendarModel::month_title)
                    .unwrap_or_else(|| "No calendar data".to_string()),
                CalendarView::Week => state
                    .current_week(model)
                    .map(CalendarModel::week_title)
                    .unwrap_or_else(|| "No weeks available".to_string()),
            })
        })
    });

    let cells = Memo::new(move |_| {
        model.data.with(|model| {
            let Some(model) = model else {
                return Vec::new();
            };
            let state = nav.get();
            match state.view {
                CalendarView::Month => state
                    .current_month(model)
                    .map(|month| model.month_cells(month))
                    .unwrap_or_default(),
                CalendarView::Week => state
                    .current_week(model)
                    .map(|week| CalendarModel::week_cells(week).to_vec())
                    .unwrap_or_default(),
            }
        })
    });

    let view_toggle = move |view: CalendarView, label: &'static str| {
        let active = move || nav.with(|state| state.view == view).to_string();
        view! {
            <button
                class=css::pill
                data-active=active
                aria-pressed=active
                on:click=move |_| set_view(view)
            >
                {label}
            </button>
        }
    };

    view! {
        <section class=css::page>
            <div class=css::calendar>
                <header class=css::toolbar>
                    <button class=css::navButton aria-label="Previous" on:click=move |_| shift(-1)>
                        <Icon icon=ic::CHEVRON_LEFT />
                    </button>
                    <h1 class=css::title>{move || title.get().unwrap_or_default()}</h1>
                    <button class=css::navButton aria-label="Next" on:click=move |_| shift(1)>
                        <Icon icon=ic::CHEVRON_RIGHT />
                    </button>
                    <div class=css::viewToggle role="group" aria-label="Calendar view">
                        {view_toggle(CalendarView::Month, "Month")}
                        {view_toggle(CalendarView::Week, "Week")}
                    </div>
                </header>

                <div class=css::grid role="grid">
                    {WEEKDAYS
                        .iter()
                        .map(|day| view! { <div class=css::weekday role="columnheader">{*day}</div> })
                        .collect_view()}
                    {move || {
                        cells
                            .get()
                            .into_iter()
                            .map(|date| match date {
                                Some(date) => {
                                    let count = model.data.with_untracked(|m| {
                                        m.as_ref().map_or(0, |m| m.clip_count(&date))
                                    });
                                    view! {
                                        <DayCell
                                            date=date
                                            count=count
                                            selection=Signal::derive(move || nav.with(|s| s.selection.clone()))
                                            on_select=Callback::new(select_day)
                                        />
                                    }
                                    .into_any()
                                }
                                None => view! { <div class=css::dayCell aria-hidden="true"></div> }.into_any(),
                            })
                            .collect_view()
                    }}
                </div>
            </div>

            <ClipDrawer model=model.data nav=nav collapsed=drawer_collapsed />
        </section>
    }
}

#[component]
fn DayCell(
    date: String,
    count: u32,
    selection: Signal<Option<String>>,
    on_select: Callback<String>,
) -> impl IntoView {
    let (dot_count, overflow) = dots(count);
    let label = if count > 0 {
        format!("{} {} clips", date, count)
    } else {
        format!("{} No clips", date)
    };
    let day_number = parse_date(&date)
        .map(|d| d.day().to_string())
        .unwrap_or_default();
    let selected = {
        let date = date.clone();
        move || selection.with(|s| s.as_deref() == Some(date.as_str())).to_string()
    };

    view! {
        <div class=css::dayCell role="gridcell" data-selected=selected data-has=(count > 0).to_string()>
            <button type="button" aria-label=label on:click=move |_| on_select.run(date.clone())>
                <span class=css::dayNumber>{day_number}</span>
                <div class=css::dotList>
                    {(0..dot_count).map(|_| view! { <span class=css::dot></span> }).collect_view()}
                    {overflow.map(|n| view! { <span class=css::miniLabel>{format!("+{}", n)}</span> })}
                </div>
            </button>
        </div>
    }
}

// ============================================================================
// Drawer
// ============================================================================

#[component]
fn ClipDrawer(
    model: ReadSignal<Option<CalendarModel>>,
    nav: RwSignal<CalendarState>,
    collapsed: RwSignal<bool>,
) -> impl IntoView {
    let selection = Memo::new(move |_| nav.with(|s| s.selection.clone()));

    let title = move || match selection.get() {
        Some(date) => parse_date(&date).map(format_weekday_date).unwrap_or(date),
        None => "Select a day".to_string(),
    };
    let meta = move || match selection.get() {
        Some(date) => model.with(|m| {
            m.as_ref()
                .and_then(|m| m.day(&date))
                .map(|day| day.meta())
                .unwrap_or_else(|| "No recorded clips".to_string())
        }),
        None => "Clips appear here instantly.".to_string(),
    };
    let clips = Memo::new(move |_| {
        let Some(date) = selection.get() else {
            return Vec::new();
        };
        model.with(|m| {
            m.as_ref()
                .and_then(|m| m.day(&date))
                .map(|day| day.clips.clone())
                .unwrap_or_default()
        })
    });

    let list_ref = NodeRef::<leptos::html::Div>::new();
    use_lazy_images(list_ref, move || clips.track());

    view! {
        <aside class=css::drawer>
            <header class=css::drawerHeader>
                <div>
                    <h2>{title}</h2>
                    <p class=css::miniLabel>{meta}</p>
                </div>
                <button
                    class=css::navButton
                    aria-pressed=move || collapsed.get().to_string()
                    data-active=move || collapsed.get().to_string()
                    title=move || if collapsed.get() { "Show clips" } else { "Hide clips" }
                    on:click=move |_| collapsed.update(|c| *c = !*c)
                >
                    <Icon icon=ic::CLOSE />
                </button>
            </header>
            <div class=css::clipList node_ref=list_ref hidden=move || collapsed.get()>
                <For
                    each=move || clips.get()
                    key=|clip| clip.id.clone()
                    children=move |clip| view! { <ClipCard clip=clip /> }
                />
            </div>
            <Show when=move || !collapsed.get() && clips.with(Vec::is_empty)>
                <p class=css::empty>"No clips for this day."</p>
            </Show>
        </aside>
    }
}

#[component]
fn ClipCard(clip: Clip) -> impl IntoView {
    let duration = clip
        .duration
        .map(|d| format!("{}s", d))
        .unwrap_or_default();

    view! {
        <div class=css::clipCard>
            <img
                data-src=clip.thumbnail.clone().unwrap_or_default()
                alt=format!("Clip preview {}", clip.id)
                loading="lazy"
            />
            <div class=css::clipMeta>
                <span>{clip.label.clone().unwrap_or_else(|| "Event".to_string())}</span>
                <span class=css::miniLabel>{clip.clock()}</span>
            </div>
            <div class=css::clipMeta>
                <span class=css::miniLabel>{format!("{}% confidence", clip.confidence_percent())}</span>
                <span class=css::miniLabel>{duration}</span>
            </div>
            <div class=css::clipActions>
                <button type="button" aria-label=format!("Play clip {}", clip.id)>
                    <Icon icon=ic::PLAY />
                    " Play"
                </button>
                <button type="button" aria-label=format!("Download clip {}", clip.id)>
                    <Icon icon=ic::DOWNLOAD />
                    " Save"
                </button>
            </div>
        </div>
    }
}
