//! Answer sheet for one exercise set.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each answer is submitted as soon as it is entered; the server grades it
//! and files mistakes. Finishing the sheet records a practice entry for the
//! history page.

#[cfg(test)]
#[path = "practice_detail_test.rs"]
mod practice_detail_test;

use std::collections::HashMap;
use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::header::AppHeader;
use crate::net::api;
use crate::net::http::HttpClient;
use crate::net::types::{
    AnswerResult, AnswerStatistics, AnswerSubmission, ExerciseSet, Expression, PracticeRecordRequest,
    split_operators,
};
use crate::state::AppSession;
use crate::util::clock::{elapsed_since, now_secs};

pub(crate) fn parse_set_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok().filter(|id| *id > 0)
}

/// Answers must be whole numbers; the server grades on integers.
pub(crate) fn parse_answer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Expressions of a set and the graded answers received so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct AnswerSheet {
    pub expressions: Vec<Expression>,
    pub results: HashMap<i64, AnswerResult>,
}

impl AnswerSheet {
    pub(crate) fn new(expressions: Vec<Expression>) -> Self {
        Self { expressions, results: HashMap::new() }
    }

    pub(crate) fn record(&mut self, expression_id: i64, result: AnswerResult) {
        self.results.insert(expression_id, result);
    }

    pub(crate) fn answered(&self) -> usize {
        self.results.len()
    }

    pub(crate) fn correct(&self) -> usize {
        self.results.values().filter(|r| r.is_correct).count()
    }

    pub(crate) fn is_complete(&self) -> bool {
        !self.expressions.is_empty() && self.expressions.iter().all(|e| self.results.contains_key(&e.expression_id))
    }
}

/// One-line score from the server's graded review of a set.
pub(crate) fn review_summary(stats: &AnswerStatistics) -> String {
    format!("{} of {} correct ({})", stats.correct, stats.total, stats.accuracy)
}

/// Practice-record body for a finished (or abandoned) sheet.
pub(crate) fn practice_record_for(
    user_id: &str,
    set_id: i64,
    set: &ExerciseSet,
    elapsed_secs: f64,
    complete: bool,
) -> PracticeRecordRequest {
    #[allow(clippy::cast_possible_truncation)]
    let duration = elapsed_secs.max(0.0).round() as i64;
    PracticeRecordRequest {
        user_id: user_id.to_owned(),
        exercise_set_id: set_id,
        duration,
        is_timeout: !complete && duration >= set.time_limit * 60,
        total_expressions: set.total_expressions,
        bracket_expressions: set.bracket_expressions,
        time_limit: set.time_limit,
        operators: set.operator_list().into_iter().map(str::to_owned).collect(),
        operator_count: set.operator_count,
        min_number: set.min_number,
        max_number: set.max_number,
    }
}

#[component]
pub fn PracticeDetailPage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let client = expect_context::<HttpClient>();
    let navigate = use_navigate();
    let params = use_params_map();
    let set_id = move || params.read().get("id").and_then(|raw| parse_set_id(&raw));

    let sheet = RwSignal::new(AnswerSheet::default());
    let set_info = RwSignal::new(None::<ExerciseSet>);
    let drafts = RwSignal::new(HashMap::<i64, String>::new());
    let info = RwSignal::new(String::new());
    let review = RwSignal::new(None::<String>);
    let started = RwSignal::new(now_secs());
    let last_answer_at = RwSignal::new(now_secs());

    let load_client = client.clone();
    Effect::new(move || {
        let Some(id) = set_id() else {
            info.set("Unknown exercise set.".to_owned());
            return;
        };
        let client = load_client.clone();
        leptos::task::spawn_local(async move {
            match api::fetch_expressions(&client, id).await {
                Ok(expressions) => {
                    sheet.set(AnswerSheet::new(expressions));
                    started.set(now_secs());
                    last_answer_at.set(now_secs());
                }
                Err(e) => info.set(e.user_message()),
            }
            match api::fetch_exercise_set(&client, id).await {
                Ok(set) => set_info.set(Some(set)),
                Err(e) => log::warn!("exercise set {id} details unavailable: {e}"),
            }
        });
    });

    // Once every expression is graded, fetch the server's review of the set.
    let review_client = client.clone();
    Effect::new(move || {
        let (Some(id), true) = (set_id(), sheet.with(AnswerSheet::is_complete)) else {
            return;
        };
        let client = review_client.clone();
        leptos::task::spawn_local(async move {
            match api::fetch_exercise_set_answers(&client, id).await {
                Ok(answers) => review.set(Some(review_summary(&answers.statistics))),
                Err(e) => log::warn!("review for exercise set {id} unavailable: {e}"),
            }
        });
    });

    let submit_client = client.clone();
    let submit = move |expression_id: i64| {
        let raw = drafts.get().get(&expression_id).cloned().unwrap_or_default();
        let Some(user_answer) = parse_answer(&raw) else {
            info.set("Answers must be whole numbers.".to_owned());
            return;
        };
        let submission = AnswerSubmission {
            expression_id,
            user_answer,
            answer_time: elapsed_since(last_answer_at.get_untracked()),
            total_time: Some(elapsed_since(started.get_untracked())),
        };
        last_answer_at.set(now_secs());
        let client = submit_client.clone();
        leptos::task::spawn_local(async move {
            match api::submit_answer(&client, &submission).await {
                Ok(result) => {
                    info.set(String::new());
                    sheet.update(|s| s.record(expression_id, result));
                }
                Err(e) => info.set(e.user_message()),
            }
        });
    };

    let on_finish = move |_: leptos::ev::MouseEvent| {
        let (Some(id), Some(set)) = (set_id(), set_info.get()) else {
            return;
        };
        let user_id = session.user().user_id().unwrap_or_default();
        let record = practice_record_for(&user_id, id, &set, elapsed_since(started.get_untracked()), sheet.get().is_complete());
        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::create_practice_record(&client, &record).await {
                Ok(_) => navigate("/history", NavigateOptions::default()),
                Err(e) => info.set(e.user_message()),
            }
        });
    };

    view! {
        <AppHeader/>
        <section class="practice-detail">
            <h1>"Exercise set " {move || set_id().map(|id| id.to_string()).unwrap_or_default()}</h1>
            <p class="practice-detail__operators">
                {move || {
                    set_info
                        .get()
                        .map(|s| split_operators(&s.operators).join(" "))
                        .unwrap_or_default()
                }}
            </p>
            <p class="practice-detail__progress">
                {move || {
                    let s = sheet.get();
                    format!("{} / {} answered, {} correct", s.answered(), s.expressions.len(), s.correct())
                }}
            </p>
            <ol class="practice-detail__list">
                <For
                    each=move || sheet.get().expressions
                    key=|expr| expr.expression_id
                    children=move |expr: Expression| {
                        let id = expr.expression_id;
                        let submit = submit.clone();
                        let result = move || sheet.get().results.get(&id).cloned();
                        view! {
                            <li class="practice-detail__item">
                                <span class="practice-detail__expr">{expr.expression_text.clone()} " = "</span>
                                <input
                                    type="number"
                                    prop:value=move || drafts.get().get(&id).cloned().unwrap_or_default()
                                    prop:disabled=move || result().is_some()
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        drafts.update(|d| {
                                            d.insert(id, value);
                                        });
                                    }
                                />
                                <button
                                    class="btn"
                                    disabled=move || result().is_some()
                                    on:click=move |_| submit(id)
                                >
                                    "Check"
                                </button>
                                <span class="practice-detail__result">
                                    {move || match result() {
                                        Some(r) if r.is_correct => "correct".to_owned(),
                                        Some(r) => format!("wrong, answer {}", r.correct_answer),
                                        None => String::new(),
                                    }}
                                </span>
                            </li>
                        }
                    }
                />
            </ol>
            <Show when=move || review.get().is_some()>
                <p class="practice-detail__review">{move || review.get().unwrap_or_default()}</p>
            </Show>
            <button class="btn" on:click=on_finish>
                "Finish"
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="practice-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}
