//! Profile view and edit form.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::header::AppHeader;
use crate::net::api;
use crate::net::http::HttpClient;
use crate::net::types::{UserProfile, UserUpdate};
use crate::router::routes::LOGIN_PATH;
use crate::state::AppSession;
use crate::state::auth::AuthState;

/// Editable profile fields as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ProfileForm {
    pub name: String,
    pub grade: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl ProfileForm {
    pub(crate) fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            grade: profile.grade.to_string(),
            phone: profile.phone.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Only fields that differ from `current` are sent.
    pub(crate) fn to_update(&self, current: &UserProfile) -> Result<UserUpdate, &'static str> {
        let mut update = UserUpdate::default();

        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name cannot be empty.");
        }
        if name != current.name {
            update.name = Some(name.to_owned());
        }

        let grade: i64 = self.grade.trim().parse().map_err(|_| "Grade must be a number.")?;
        if grade <= 0 {
            return Err("Grade must be a positive number.");
        }
        if grade != current.grade {
            update.grade = Some(grade);
        }

        let phone = self.phone.trim();
        if phone != current.phone.as_deref().unwrap_or_default() {
            update.phone = Some(phone.to_owned());
        }

        if !self.password.is_empty() {
            if self.password != self.confirm_password {
                return Err("Passwords do not match.");
            }
            update.password = Some(self.password.clone());
        }

        Ok(update)
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let client = expect_context::<HttpClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let profile = RwSignal::new(None::<UserProfile>);
    let form = RwSignal::new(ProfileForm::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let user_id = session.user().user_id().unwrap_or_default();

    let load = {
        let client = client.clone();
        let user_id = user_id.clone();
        move || {
            let client = client.clone();
            let user_id = user_id.clone();
            leptos::task::spawn_local(async move {
                match api::fetch_user(&client, &user_id).await {
                    Ok(p) => {
                        form.set(ProfileForm::from_profile(&p));
                        profile.set(Some(p));
                    }
                    Err(e) => info.set(e.user_message()),
                }
            });
        }
    };
    if !user_id.is_empty() {
        load();
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let Some(current) = profile.get_untracked() else {
            return;
        };
        let update = match form.get_untracked().to_update(&current) {
            Ok(update) if update.is_empty() => {
                info.set("No changes to save.".to_owned());
                return;
            }
            Ok(update) => update,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        let client = client.clone();
        let user_id = user_id.clone();
        let load = load.clone();
        leptos::task::spawn_local(async move {
            match api::update_user(&client, &user_id, &update).await {
                Ok(_) => {
                    info.set("Profile updated.".to_owned());
                    load();
                }
                Err(e) => info.set(e.user_message()),
            }
            busy.set(false);
        });
    };

    let logout_session = session.clone();
    let on_logout = move |_: leptos::ev::MouseEvent| {
        logout_session.logout();
        auth.set(AuthState::default());
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <AppHeader/>
        <section class="profile-page">
            <h1>"Profile"</h1>
            <p class="profile-page__id">{move || profile.get().map(|p| format!("User ID: {}", p.user_id)).unwrap_or_default()}</p>
            <form class="profile-form" on:submit=on_submit>
                <label>
                    "Name"
                    <input
                        type="text"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Grade"
                    <input
                        type="number"
                        prop:value=move || form.get().grade
                        on:input=move |ev| form.update(|f| f.grade = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Phone"
                    <input
                        type="tel"
                        prop:value=move || form.get().phone
                        on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                    />
                </label>
                <label>
                    "New password"
                    <input
                        type="password"
                        prop:value=move || form.get().password
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Confirm password"
                    <input
                        type="password"
                        prop:value=move || form.get().confirm_password
                        on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                    />
                </label>
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Save"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="profile-page__message">{move || info.get()}</p>
            </Show>
            <button class="btn profile-page__logout" on:click=on_logout>
                "Log out"
            </button>
        </section>
    }
}
