//! Practice setup: choose parameters and generate an exercise set.

#[cfg(test)]
#[path = "practice_test.rs"]
mod practice_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::header::AppHeader;
use crate::error::ApiError;
use crate::net::api;
use crate::net::http::HttpClient;
use crate::net::types::ExerciseSetRequest;
use crate::state::AppSession;

pub(crate) const OPERATORS: [&str; 4] = ["+", "-", "*", "/"];

/// Path of the detail page for an exercise set.
pub(crate) fn practice_detail_path(set_id: i64) -> String {
    format!("/practice/{set_id}")
}

/// Form values as typed, before parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PracticeForm {
    pub total_expressions: String,
    pub bracket_expressions: String,
    pub time_limit: String,
    pub operators: Vec<String>,
    pub operator_count: String,
    pub min_number: String,
    pub max_number: String,
}

impl Default for PracticeForm {
    fn default() -> Self {
        Self {
            total_expressions: "10".into(),
            bracket_expressions: "0".into(),
            time_limit: "5".into(),
            operators: vec!["+".into(), "-".into()],
            operator_count: "1".into(),
            min_number: "1".into(),
            max_number: "20".into(),
        }
    }
}

fn parse_field(raw: &str, message: &'static str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::Invalid(message))
}

impl PracticeForm {
    pub(crate) fn toggle_operator(&mut self, op: &str) {
        if let Some(pos) = self.operators.iter().position(|o| o == op) {
            self.operators.remove(pos);
        } else {
            self.operators.push(op.to_owned());
        }
    }

    /// Parse and validate into a request for `user_id`.
    pub(crate) fn to_request(&self, user_id: &str) -> Result<ExerciseSetRequest, ApiError> {
        let req = ExerciseSetRequest {
            user_id: user_id.to_owned(),
            total_expressions: parse_field(&self.total_expressions, "Question count must be a number.")?,
            bracket_expressions: parse_field(&self.bracket_expressions, "Bracket questions must be a number.")?,
            time_limit: parse_field(&self.time_limit, "Time limit must be a number.")?,
            operators: OPERATORS
                .iter()
                .filter(|op| self.operators.iter().any(|o| o == *op))
                .map(|op| (*op).to_owned())
                .collect(),
            operator_count: parse_field(&self.operator_count, "Operators per question must be a number.")?,
            min_number: parse_field(&self.min_number, "Minimum must be a number.")?,
            max_number: parse_field(&self.max_number, "Maximum must be a number.")?,
        };
        api::validate_exercise_set(&req)?;
        Ok(req)
    }
}

#[component]
pub fn PracticePage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let client = expect_context::<HttpClient>();
    let navigate = use_navigate();

    let form = RwSignal::new(PracticeForm::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let user_id = session.user().user_id().unwrap_or_default();
        let req = match form.get().to_request(&user_id) {
            Ok(req) => req,
            Err(e) => {
                info.set(e.user_message());
                return;
            }
        };
        busy.set(true);
        info.set("Generating questions...".to_owned());

        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::create_exercise_set(&client, &req).await {
                Ok(created) => {
                    info.set(String::new());
                    navigate(&practice_detail_path(created.exercise_set_id), NavigateOptions::default());
                }
                Err(e) => info.set(e.user_message()),
            }
            busy.set(false);
        });
    };

    let number_field = move |label: &'static str, get: fn(&PracticeForm) -> String, set: fn(&mut PracticeForm, String)| {
        view! {
            <label class="practice-field">
                <span>{label}</span>
                <input
                    type="number"
                    prop:value=move || get(&form.get())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <AppHeader/>
        <section class="practice-page">
            <h1>"New practice"</h1>
            <form class="practice-form" on:submit=on_submit>
                {number_field("Questions", |f| f.total_expressions.clone(), |f, v| f.total_expressions = v)}
                {number_field("With brackets", |f| f.bracket_expressions.clone(), |f, v| f.bracket_expressions = v)}
                {number_field("Time limit (minutes)", |f| f.time_limit.clone(), |f, v| f.time_limit = v)}
                {number_field("Operators per question", |f| f.operator_count.clone(), |f, v| f.operator_count = v)}
                {number_field("Smallest number", |f| f.min_number.clone(), |f, v| f.min_number = v)}
                {number_field("Largest number", |f| f.max_number.clone(), |f, v| f.max_number = v)}
                <fieldset class="practice-operators">
                    <legend>"Operators"</legend>
                    {OPERATORS
                        .iter()
                        .map(|op| {
                            let op = *op;
                            view! {
                                <label>
                                    <input
                                        type="checkbox"
                                        prop:checked=move || form.get().operators.iter().any(|o| o == op)
                                        on:change=move |_| form.update(|f| f.toggle_operator(op))
                                    />
                                    {op}
                                </label>
                            }
                        })
                        .collect_view()}
                </fieldset>
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Start"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="practice-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}
