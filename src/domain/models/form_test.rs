use super::AuthForm;

#[test]
fn it_types_into_the_focused_field() {
    let mut form = AuthForm::login();
    form.input_char('m');
    form.input_char('@');
    form.backspace();

    assert_eq!(form.fields()[0].value, "m");
}

#[test]
fn it_cycles_focus_through_fields() {
    let mut form = AuthForm::signup();
    assert_eq!(form.focused(), 0);

    form.focus_next();
    form.focus_next();
    assert_eq!(form.focused(), 2);

    form.focus_next();
    assert_eq!(form.focused(), 0);
}

#[test]
fn it_masks_password_display() {
    let mut form = AuthForm::login();
    form.focus_next();
    form.input_char('a');
    form.input_char('b');

    assert_eq!(form.fields()[1].display_value(), "**");
    assert_eq!(form.fields()[1].value, "ab");
}

#[test]
fn it_builds_credentials_with_confirmation_only_on_signup() {
    let login = AuthForm::login().credentials();
    assert!(login.password_confirm.is_none());

    let signup = AuthForm::signup().credentials();
    assert_eq!(signup.password_confirm, Some("".to_string()));
}

#[test]
fn it_keeps_fields_on_error_and_clears_on_success() {
    let mut form = AuthForm::login();
    form.input_char('m');
    form.set_error("Invalid email or password");

    assert_eq!(form.fields()[0].value, "m");
    assert_eq!(form.error(), Some("Invalid email or password"));

    form.clear();
    assert_eq!(form.fields()[0].value, "");
    assert!(form.error().is_none());
}
