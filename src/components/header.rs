//! Top navigation bar shared by all signed-in pages.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::router::routes::LOGIN_PATH;
use crate::state::AppSession;
use crate::state::auth::AuthState;

#[component]
pub fn AppHeader() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let on_logout = move |_: leptos::ev::MouseEvent| {
        session.logout();
        auth.set(AuthState::default());
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <header class="app-header">
            <nav class="app-header__nav">
                <a href="/home">"Home"</a>
                <a href="/practice">"Practice"</a>
                <a href="/history">"History"</a>
                <a href="/mistakes">"Mistakes"</a>
                <a href="/profile">"Profile"</a>
            </nav>
            <span class="app-header__user">{move || auth.get().display_name()}</span>
            <button class="btn app-header__logout" on:click=on_logout>
                "Log out"
            </button>
        </header>
    }
}
