//! Shared state for the email/password auth forms
//!
//! Sign-in and sign-up present the same two fields with the same schema:
//! a well-formed email and a password of at least six characters. Field
//! errors surface inline under the field that failed; the `loading` flag
//! keeps at most one submission in flight and is cleared on every outcome.

use regex::Regex;
use std::sync::OnceLock;

pub const MIN_PASSWORD_LEN: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

/// Which input currently receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

/// Form state shared by the sign-in and sign-up screens
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    /// Service-level error, shown under the form
    pub error: Option<String>,
    /// True while a submission is outstanding; blocks further submits
    pub loading: bool,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: AuthField::Email,
            email_error: None,
            password_error: None,
            error: None,
            loading: false,
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            AuthField::Email => self.email.push(c),
            AuthField::Password => self.password.push(c),
        }
        self.clear_field_errors();
    }

    pub fn input_backspace(&mut self) {
        match self.focus {
            AuthField::Email => self.email.pop(),
            AuthField::Password => self.password.pop(),
        };
        self.clear_field_errors();
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    /// Both fields non-empty; mirrors the submit button enabling
    pub fn filled(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }

    /// Schema check; populates the inline field errors on failure
    pub fn validate(&mut self) -> bool {
        self.email_error = None;
        self.password_error = None;

        if !email_regex().is_match(self.email.trim()) {
            self.email_error = Some("Enter a valid email address".to_string());
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            self.password_error = Some(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }

        self.email_error.is_none() && self.password_error.is_none()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn clear_field_errors(&mut self) {
        self.email_error = None;
        self.password_error = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(email: &str, password: &str) -> AuthForm {
        let mut form = AuthForm::new();
        form.email = email.to_string();
        form.password = password.to_string();
        form
    }

    #[test]
    fn test_valid_credentials_pass() {
        let mut form = form_with("romain@pixamp.xyz", "secret123");
        assert!(form.validate());
        assert!(form.email_error.is_none());
        assert!(form.password_error.is_none());
    }

    #[test]
    fn test_malformed_email_is_flagged_inline() {
        for email in ["", "plain", "a@b", "two@@at.com", "spa ce@x.com"] {
            let mut form = form_with(email, "secret123");
            assert!(!form.validate(), "{:?} should fail", email);
            assert!(form.email_error.is_some());
            assert!(form.password_error.is_none());
        }
    }

    #[test]
    fn test_short_password_is_flagged_inline() {
        let mut form = form_with("romain@pixamp.xyz", "12345");
        assert!(!form.validate());
        assert!(form.password_error.is_some());
        assert!(form.email_error.is_none());
    }

    #[test]
    fn test_typing_clears_stale_errors() {
        let mut form = form_with("bad", "12345");
        form.validate();
        assert!(form.email_error.is_some());

        form.input_char('x');
        assert!(form.email_error.is_none());
        assert!(form.password_error.is_none());
    }

    #[test]
    fn test_focus_cycles_between_the_two_fields() {
        let mut form = AuthForm::new();
        assert_eq!(form.focus, AuthField::Email);
        form.next_field();
        assert_eq!(form.focus, AuthField::Password);
        form.next_field();
        assert_eq!(form.focus, AuthField::Email);
    }
}
