//! Paged practice history, newest first.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::components::header::AppHeader;
use crate::net::api::{self, DEFAULT_RECORDS_PAGE_SIZE};
use crate::net::http::HttpClient;
use crate::net::types::{PracticeRecord, parse_accuracy, split_operators};
use crate::state::AppSession;
use crate::util::format::{format_duration, total_pages};

/// One rendered history row.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HistoryRow {
    pub id: i64,
    pub completed_at: String,
    pub settings: String,
    pub score: String,
    pub accuracy: String,
    pub duration: String,
    pub timed_out: bool,
}

impl From<&PracticeRecord> for HistoryRow {
    fn from(record: &PracticeRecord) -> Self {
        let accuracy = parse_accuracy(&record.accuracy).map_or_else(|| record.accuracy.clone(), |a| format!("{a:.1}%"));
        Self {
            id: record.id,
            completed_at: record.completion_time.clone(),
            settings: format!(
                "{} questions, {} in {}..{}",
                record.total_expressions,
                split_operators(&record.operators).join(" "),
                record.min_number,
                record.max_number,
            ),
            score: format!("{} / {}", record.correct_count, record.total_count),
            accuracy,
            duration: format_duration(record.duration),
            timed_out: record.is_timeout,
        }
    }
}

/// Clamp a requested page into `1..=last`.
pub(crate) fn clamp_page(page: u32, total: i64, size: u32) -> u32 {
    page.clamp(1, total_pages(total, size))
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let client = expect_context::<HttpClient>();

    let page = RwSignal::new(1_u32);
    let total = RwSignal::new(0_i64);
    let rows = RwSignal::new(Vec::<HistoryRow>::new());
    let info = RwSignal::new(String::new());

    Effect::new(move || {
        let current = page.get();
        let Some(user_id) = session.user().user_id() else {
            return;
        };
        let client = client.clone();
        leptos::task::spawn_local(async move {
            match api::fetch_practice_records(&client, &user_id, current, DEFAULT_RECORDS_PAGE_SIZE).await {
                Ok(resp) => {
                    total.set(resp.total);
                    rows.set(resp.records.iter().map(HistoryRow::from).collect());
                    info.set(String::new());
                }
                Err(e) => info.set(e.user_message()),
            }
        });
    });

    let last_page = move || total_pages(total.get(), DEFAULT_RECORDS_PAGE_SIZE);
    let go_to = move |target: u32| page.set(clamp_page(target, total.get_untracked(), DEFAULT_RECORDS_PAGE_SIZE));

    view! {
        <AppHeader/>
        <section class="history-page">
            <h1>"Practice history"</h1>
            <Show when=move || !info.get().is_empty()>
                <p class="history-page__error">{move || info.get()}</p>
            </Show>
            <table class="history-table">
                <thead>
                    <tr>
                        <th>"Completed"</th>
                        <th>"Settings"</th>
                        <th>"Score"</th>
                        <th>"Accuracy"</th>
                        <th>"Time"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|row| row.id
                        children=move |row: HistoryRow| {
                            let class = if row.timed_out { "history-table__timeout" } else { "" };
                            view! {
                                <tr class=class>
                                    <td>{row.completed_at}</td>
                                    <td>{row.settings}</td>
                                    <td>{row.score}</td>
                                    <td>{row.accuracy}</td>
                                    <td>{row.duration}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <div class="pager">
                <button class="btn" disabled=move || page.get() <= 1 on:click=move |_| go_to(page.get_untracked().saturating_sub(1))>
                    "Previous"
                </button>
                <span class="pager__label">{move || format!("Page {} of {}", page.get(), last_page())}</span>
                <button class="btn" disabled=move || page.get() >= last_page() on:click=move |_| go_to(page.get_untracked() + 1)>
                    "Next"
                </button>
            </div>
        </section>
    }
}
