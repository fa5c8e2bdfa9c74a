//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ProtectedRoute, Redirect, Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::net::http::HttpClient;
use crate::pages::{
    history::HistoryPage, home::HomePage, login::LoginPage, mistakes::MistakesPage, practice::PracticePage,
    practice_detail::PracticeDetailPage, profile::ProfilePage, register::RegisterPage,
};
use crate::router::routes::{LOGIN_PATH, View};
use crate::state::AppSession;
use crate::state::auth::AuthState;
use crate::storage::LocalStorage;
use crate::util::auth::{guard_redirect, route_guard};

/// Root application component.
///
/// Builds the transport and session store once, provides them as context,
/// and mounts the route table. Authenticated routes are `ProtectedRoute`s so
/// the guard decides before the page component runs.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let client = HttpClient::new(ClientConfig::from_build_env());
    let session = Arc::new(AppSession::new(client.clone(), LocalStorage));
    let auth = RwSignal::new(AuthState::from_session(&session.snapshot()));

    provide_context(client);
    provide_context(session);
    provide_context(auth);

    view! {
        <Title text="Arithmetic Practice"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=LOGIN_PATH/> }/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <ProtectedRoute
                    path=StaticSegment("home")
                    view=HomePage
                    condition=route_guard(View::Home)
                    redirect_path=guard_redirect
                />
                <ProtectedRoute
                    path=StaticSegment("practice")
                    view=PracticePage
                    condition=route_guard(View::Practice)
                    redirect_path=guard_redirect
                />
                <ProtectedRoute
                    path=(StaticSegment("practice"), ParamSegment("id"))
                    view=PracticeDetailPage
                    condition=route_guard(View::PracticeDetail)
                    redirect_path=guard_redirect
                />
                <ProtectedRoute
                    path=StaticSegment("history")
                    view=HistoryPage
                    condition=route_guard(View::History)
                    redirect_path=guard_redirect
                />
                <ProtectedRoute
                    path=StaticSegment("mistakes")
                    view=MistakesPage
                    condition=route_guard(View::Mistakes)
                    redirect_path=guard_redirect
                />
                <ProtectedRoute
                    path=StaticSegment("profile")
                    view=ProfilePage
                    condition=route_guard(View::Profile)
                    redirect_path=guard_redirect
                />
            </Routes>
        </Router>
    }
}
