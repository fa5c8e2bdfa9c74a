//! Static route table.
//!
//! Paths use `:name` for a single dynamic segment. The table is fixed at
//! build time and mirrored by the `<Routes>` in `app`, where `/` redirects to
//! `/login`. Route guarding reads `requires_auth` from here.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/home";

/// Screens reachable by navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Register,
    Home,
    Practice,
    PracticeDetail,
    History,
    Mistakes,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub requires_auth: bool,
}

const fn route(path: &'static str, name: &'static str, view: View, requires_auth: bool) -> RouteDef {
    RouteDef { path, name, view, requires_auth }
}

pub const ROUTES: &[RouteDef] = &[
    route("/login", "Login", View::Login, false),
    route("/register", "Register", View::Register, false),
    route("/home", "Home", View::Home, true),
    route("/practice", "Practice", View::Practice, true),
    route("/practice/:id", "PracticeDetail", View::PracticeDetail, true),
    route("/history", "History", View::History, true),
    route("/mistakes", "Mistakes", View::Mistakes, true),
    route("/profile", "Profile", View::Profile, true),
];

/// The table entry for `view`.
pub fn route_for(view: View) -> &'static RouteDef {
    ROUTES
        .iter()
        .find(|r| r.view == view)
        .unwrap_or(&ROUTES[0])
}
