use super::*;

fn profile() -> UserProfile {
    UserProfile {
        user_id: "u1".into(),
        name: "Alice".into(),
        grade: 3,
        id_card: "X123".into(),
        phone: Some("555".into()),
    }
}

#[test]
fn from_profile_prefills_editable_fields() {
    let form = ProfileForm::from_profile(&profile());
    assert_eq!(form.name, "Alice");
    assert_eq!(form.grade, "3");
    assert_eq!(form.phone, "555");
    assert!(form.password.is_empty());
}

#[test]
fn unchanged_form_yields_empty_update() {
    let update = ProfileForm::from_profile(&profile()).to_update(&profile()).unwrap();
    assert!(update.is_empty());
}

#[test]
fn only_changed_fields_are_sent() {
    let mut form = ProfileForm::from_profile(&profile());
    form.grade = "4".into();
    let update = form.to_update(&profile()).unwrap();
    assert_eq!(update, UserUpdate { grade: Some(4), ..UserUpdate::default() });
}

#[test]
fn password_requires_matching_confirmation() {
    let mut form = ProfileForm::from_profile(&profile());
    form.password = "new".into();
    form.confirm_password = "other".into();
    assert_eq!(form.to_update(&profile()), Err("Passwords do not match."));

    form.confirm_password = "new".into();
    assert_eq!(form.to_update(&profile()).unwrap().password.as_deref(), Some("new"));
}

#[test]
fn blank_name_is_rejected() {
    let mut form = ProfileForm::from_profile(&profile());
    form.name = "  ".into();
    assert_eq!(form.to_update(&profile()), Err("Name cannot be empty."));
}

#[test]
fn non_numeric_grade_is_rejected() {
    let mut form = ProfileForm::from_profile(&profile());
    form.grade = "three".into();
    assert_eq!(form.to_update(&profile()), Err("Grade must be a number."));
}

#[test]
fn clearing_phone_sends_empty_string() {
    let mut form = ProfileForm::from_profile(&profile());
    form.phone = String::new();
    assert_eq!(form.to_update(&profile()).unwrap().phone.as_deref(), Some(""));
}
