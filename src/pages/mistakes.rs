//! Mistake notebook: browse, filter, delete, and re-practise wrong answers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server files a mistake whenever a submitted answer is wrong. Selected
//! mistakes can be turned into a fresh exercise set, which opens in the
//! practice detail page.

#[cfg(test)]
#[path = "mistakes_test.rs"]
mod mistakes_test;

use std::collections::BTreeSet;
use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::practice::practice_detail_path;
use crate::components::header::AppHeader;
use crate::net::api::{self, ErrorRecordQuery};
use crate::net::http::HttpClient;
use crate::net::types::{Difficulty, ErrorRecord};
use crate::state::AppSession;
use crate::util::format::{format_number, total_pages};

/// Mistake ids picked for a practice run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Selection(BTreeSet<i64>);

impl Selection {
    pub(crate) fn toggle(&mut self, id: i64) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    pub(crate) fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    /// Drop ids no longer present in `items`.
    pub(crate) fn retain_present(&mut self, items: &[ErrorRecord]) {
        self.0.retain(|id| items.iter().any(|item| item.id == *id));
    }

    pub(crate) fn ids(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub(crate) fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Simple => "simple",
        Difficulty::Medium => "medium",
        Difficulty::Hard => "hard",
    }
}

/// Blank date inputs mean "no bound".
pub(crate) fn date_filter(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_owned())
}

#[component]
pub fn MistakesPage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let client = expect_context::<HttpClient>();
    let navigate = use_navigate();

    let query = RwSignal::new(ErrorRecordQuery::default());
    let search = RwSignal::new(String::new());
    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());
    let items = RwSignal::new(Vec::<ErrorRecord>::new());
    let total = RwSignal::new(0_i64);
    let selection = RwSignal::new(Selection::default());
    let info = RwSignal::new(String::new());
    // Bumped to re-run the fetch after a delete.
    let reload = RwSignal::new(0_u32);

    let user_id = session.user().user_id().unwrap_or_default();

    let fetch_client = client.clone();
    let fetch_user = user_id.clone();
    Effect::new(move || {
        let current = query.get();
        reload.track();
        if fetch_user.is_empty() {
            return;
        }
        let client = fetch_client.clone();
        let user_id = fetch_user.clone();
        leptos::task::spawn_local(async move {
            match api::fetch_error_records(&client, &user_id, &current).await {
                Ok(page) => {
                    selection.update(|s| s.retain_present(&page.items));
                    total.set(page.total);
                    items.set(page.items);
                }
                Err(e) => info.set(e.user_message()),
            }
        });
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        query.update(|q| {
            q.page = 1;
            q.search = search.get_untracked();
            q.start_date = date_filter(&start_date.get_untracked());
            q.end_date = date_filter(&end_date.get_untracked());
        });
    };

    let delete_client = client.clone();
    let on_delete = move |id: i64| {
        let client = delete_client.clone();
        leptos::task::spawn_local(async move {
            match api::delete_error_record(&client, id).await {
                Ok(_) => reload.update(|n| *n = n.wrapping_add(1)),
                Err(e) => info.set(e.user_message()),
            }
        });
    };

    let on_practice = move |_: leptos::ev::MouseEvent| {
        let ids = selection.get_untracked().ids();
        let client = client.clone();
        let user_id = user_id.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::practice_from_mistakes(&client, &user_id, &ids).await {
                Ok(created) => navigate(&practice_detail_path(created.exercise_set_id), NavigateOptions::default()),
                Err(e) => info.set(e.user_message()),
            }
        });
    };

    let last_page = move || total_pages(total.get(), query.get().per_page);
    let go_to = move |target: u32| {
        query.update(|q| q.page = target.clamp(1, total_pages(total.get_untracked(), q.per_page)));
    };

    view! {
        <AppHeader/>
        <section class="mistakes-page">
            <h1>"Mistakes"</h1>
            <form class="mistakes-filter" on:submit=on_search>
                <input
                    type="search"
                    placeholder="Search expressions"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <input type="date" prop:value=move || start_date.get() on:input=move |ev| start_date.set(event_target_value(&ev))/>
                <input type="date" prop:value=move || end_date.get() on:input=move |ev| end_date.set(event_target_value(&ev))/>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || query.get().show_exported
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            query.update(|q| {
                                q.page = 1;
                                q.show_exported = checked;
                            });
                        }
                    />
                    "Show exported"
                </label>
                <button class="btn" type="submit">"Filter"</button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="mistakes-page__error">{move || info.get()}</p>
            </Show>
            <ul class="mistakes-list">
                <For
                    each=move || items.get()
                    key=|item| item.id
                    children=move |item: ErrorRecord| {
                        let id = item.id;
                        let on_delete = on_delete.clone();
                        view! {
                            <li class="mistakes-list__item">
                                <input
                                    type="checkbox"
                                    prop:checked=move || selection.get().contains(id)
                                    on:change=move |_| selection.update(|s| s.toggle(id))
                                />
                                <span class="mistakes-list__expr">
                                    {format!(
                                        "{} = {} (you answered {})",
                                        item.expression,
                                        format_number(item.correct_answer),
                                        format_number(item.user_answer),
                                    )}
                                </span>
                                <span class="mistakes-list__meta">
                                    {format!("{} x{}", difficulty_label(item.difficulty), item.error_count)}
                                </span>
                                <button class="btn" on:click=move |_| on_delete(id)>"Delete"</button>
                            </li>
                        }
                    }
                />
            </ul>
            <div class="pager">
                <button class="btn" disabled=move || query.get().page <= 1 on:click=move |_| go_to(query.get_untracked().page.saturating_sub(1))>
                    "Previous"
                </button>
                <span class="pager__label">{move || format!("Page {} of {}", query.get().page, last_page())}</span>
                <button class="btn" disabled=move || query.get().page >= last_page() on:click=move |_| go_to(query.get_untracked().page + 1)>
                    "Next"
                </button>
            </div>
            <button class="btn" disabled=move || selection.get().is_empty() on:click=on_practice>
                "Practise selected"
            </button>
        </section>
    }
}
