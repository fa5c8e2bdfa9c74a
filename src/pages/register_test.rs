use super::*;

fn filled() -> RegisterForm {
    RegisterForm {
        user_id: " s001 ".into(),
        name: "Alice".into(),
        id_card: "110101200001011234".into(),
        grade: " 3 ".into(),
        password: "pw".into(),
        confirm: "pw".into(),
        phone: String::new(),
    }
}

#[test]
fn to_request_trims_and_parses_grade() {
    let req = filled().to_request().unwrap();
    assert_eq!(req.user_id, "s001");
    assert_eq!(req.grade, 3);
    assert_eq!(req.phone, None);
}

#[test]
fn to_request_keeps_phone_when_present() {
    let form = RegisterForm { phone: " 13800000000 ".into(), ..filled() };
    assert_eq!(form.to_request().unwrap().phone.as_deref(), Some("13800000000"));
}

#[test]
fn to_request_rejects_non_numeric_grade() {
    let form = RegisterForm { grade: "three".into(), ..filled() };
    assert_eq!(form.to_request(), Err("Grade must be a number."));
}

#[test]
fn to_request_rejects_mismatched_passwords() {
    let form = RegisterForm { confirm: "other".into(), ..filled() };
    assert_eq!(form.to_request(), Err("Passwords do not match."));
}
