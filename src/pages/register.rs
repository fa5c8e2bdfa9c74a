//! Registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api;
use crate::net::http::HttpClient;
use crate::net::types::RegisterRequest;
use crate::router::routes::LOGIN_PATH;

/// Raw form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RegisterForm {
    pub user_id: String,
    pub name: String,
    pub id_card: String,
    pub grade: String,
    pub password: String,
    pub confirm: String,
    pub phone: String,
}

impl RegisterForm {
    /// Convert form input into a request body.
    pub(crate) fn to_request(&self) -> Result<RegisterRequest, &'static str> {
        let grade = self
            .grade
            .trim()
            .parse::<i64>()
            .map_err(|_| "Grade must be a number.")?;
        if self.password != self.confirm {
            return Err("Passwords do not match.");
        }
        let phone = self.phone.trim();
        Ok(RegisterRequest {
            user_id: self.user_id.trim().to_owned(),
            name: self.name.trim().to_owned(),
            id_card: self.id_card.trim().to_owned(),
            grade,
            password: self.password.clone(),
            phone: (!phone.is_empty()).then(|| phone.to_owned()),
        })
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let client = expect_context::<HttpClient>();
    let navigate = use_navigate();

    let form = RwSignal::new(RegisterForm::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let req = match form.get().to_request() {
            Ok(req) => req,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);

        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::register(&client, &req).await {
                Ok(_) => navigate(LOGIN_PATH, NavigateOptions::default()),
                Err(e) => info.set(e.user_message()),
            }
            busy.set(false);
        });
    };

    let field = move |label: &'static str, kind: &'static str, get: fn(&RegisterForm) -> String, set: fn(&mut RegisterForm, String)| {
        view! {
            <label class="register-field">
                <span>{label}</span>
                <input
                    type=kind
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
        <div class="register-page">
            <h1>"Create an account"</h1>
            <form class="register-form" on:submit=on_submit>
                {field("User ID", "text", |f| f.user_id.clone(), |f, v| f.user_id = v)}
                {field("Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                {field("ID card", "text", |f| f.id_card.clone(), |f, v| f.id_card = v)}
                {field("Grade", "number", |f| f.grade.clone(), |f, v| f.grade = v)}
                {field("Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                {field("Confirm password", "password", |f| f.confirm.clone(), |f, v| f.confirm = v)}
                {field("Phone (optional)", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Register"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="register-message">{move || info.get()}</p>
            </Show>
            <a href="/login">"Back to sign in"</a>
        </div>
    }
}
