//! Landing page after sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the one place the token is re-verified against the server; a
//! failed verify signs the user out and sends them back to `/login`.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use serde_json::Value;

use crate::components::header::AppHeader;
use crate::net::api;
use crate::net::http::HttpClient;
use crate::router::routes::LOGIN_PATH;
use crate::state::AppSession;
use crate::state::auth::AuthState;

/// Flatten the scalar top-level fields of a statistics payload for display.
pub(crate) fn summarize_statistics(stats: &Value) -> Vec<(String, String)> {
    let Some(map) = stats.as_object() else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Number(n) => n.to_string(),
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key.replace('_', " "), text))
        })
        .collect()
}

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let client = expect_context::<HttpClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let stats = RwSignal::new(Vec::<(String, String)>::new());

    auth.update(|a| a.loading = true);
    leptos::task::spawn_local(async move {
        let valid = session.verify().await;
        auth.set(AuthState::from_session(&session.snapshot()));
        if !valid {
            navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
            return;
        }
        let Some(user_id) = session.user().user_id() else {
            return;
        };
        match api::fetch_statistics(&client, &user_id).await {
            Ok(value) => stats.set(summarize_statistics(&value)),
            Err(e) => log::warn!("statistics unavailable: {e}"),
        }
    });

    view! {
        <AppHeader/>
        <section class="home-page">
            <h1>"Welcome, " {move || auth.get().display_name()}</h1>
            <ul class="home-stats">
                <For
                    each=move || stats.get()
                    key=|(label, _)| label.clone()
                    children=move |(label, value)| {
                        view! {
                            <li>
                                <span class="home-stats__label">{label}</span>
                                <span class="home-stats__value">{value}</span>
                            </li>
                        }
                    }
                />
            </ul>
            <a class="btn" href="/practice">"Start practising"</a>
        </section>
    }
}
