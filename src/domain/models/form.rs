#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

use super::Credentials;

#[derive(Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl FormField {
    fn new(label: &'static str, masked: bool) -> FormField {
        return FormField {
            label,
            value: String::new(),
            masked,
        };
    }

    pub fn display_value(&self) -> String {
        if self.masked {
            return "*".repeat(self.value.chars().count());
        }

        return self.value.to_string();
    }
}

/// Controlled inputs for the login and sign-up pages. Submission is handled
/// by the page; the form only owns field contents, focus, and the last error
/// string. On a failed submit the fields are deliberately left as-is so the
/// user can correct and resubmit.
pub struct AuthForm {
    fields: Vec<FormField>,
    focus: usize,
    error: Option<String>,
}

impl AuthForm {
    pub fn login() -> AuthForm {
        return AuthForm {
            fields: vec![
                FormField::new("Email", false),
                FormField::new("Password", true),
            ],
            focus: 0,
            error: None,
        };
    }

    pub fn signup() -> AuthForm {
        return AuthForm {
            fields: vec![
                FormField::new("Email", false),
                FormField::new("Password", true),
                FormField::new("Verify Password", true),
            ],
            focus: 0,
            error: None,
        };
    }

    pub fn fields(&self) -> &[FormField] {
        return &self.fields;
    }

    pub fn focused(&self) -> usize {
        return self.focus;
    }

    pub fn error(&self) -> Option<&str> {
        return self.error.as_deref();
    }

    pub fn set_error(&mut self, error: &str) {
        self.error = Some(error.to_string());
    }

    pub fn input_char(&mut self, c: char) {
        self.fields[self.focus].value.push(c);
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus].value.pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn credentials(&self) -> Credentials {
        let mut password_confirm = None;
        if self.fields.len() > 2 {
            password_confirm = Some(self.fields[2].value.to_string());
        }

        return Credentials {
            email: self.fields[0].value.to_string(),
            password: self.fields[1].value.to_string(),
            password_confirm,
        };
    }

    /// Called only after a successful submit.
    pub fn clear(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.clear();
        }
        self.focus = 0;
        self.error = None;
    }
}
