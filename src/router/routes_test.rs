use super::*;

// =============================================================
// Table
// =============================================================

#[test]
fn only_login_and_register_are_public() {
    let public: Vec<&str> = ROUTES.iter().filter(|r| !r.requires_auth).map(|r| r.path).collect();
    assert_eq!(public, vec!["/login", "/register"]);
}

#[test]
fn every_view_has_exactly_one_route() {
    for route in ROUTES {
        assert_eq!(ROUTES.iter().filter(|r| r.view == route.view).count(), 1, "{}", route.path);
        assert_eq!(route_for(route.view), route);
    }
}

#[test]
fn detail_route_is_protected_with_id_param() {
    let detail = route_for(View::PracticeDetail);
    assert_eq!(detail.path, "/practice/:id");
    assert!(detail.requires_auth);
}

#[test]
fn login_path_constant_matches_table() {
    assert_eq!(route_for(View::Login).path, LOGIN_PATH);
    assert_eq!(route_for(View::Home).path, HOME_PATH);
}
