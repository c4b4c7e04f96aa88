//! Login screen state.
//!
//! # Responsibility
//! - Hold transient field values, inline errors and overlay visibility.
//! - Reveal the confirmation overlay only after a fully valid submission.
//!
//! # Invariants
//! - The confirmation never carries the password.
//! - Nothing here is persisted; state is dropped with the screen.

use crate::validation::login::{validate_login, LoginErrors, LoginForm, LoginValidation};
use log::info;

/// Read-only values shown in the confirmation overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfirmation {
    pub username: String,
    pub email: String,
    pub phone: String,
}

impl From<&LoginForm> for LoginConfirmation {
    fn from(form: &LoginForm) -> Self {
        Self {
            username: form.username.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
        }
    }
}

/// Mutable state behind the login screen.
#[derive(Debug, Clone, Default)]
pub struct LoginFormState {
    form: LoginForm,
    errors: LoginErrors,
    confirmation_open: bool,
    password_visible: bool,
}

impl LoginFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.form.username = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.form.password = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.form.email = value.into();
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.form.phone = value.into();
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    /// Inline messages from the last submission.
    pub fn errors(&self) -> &LoginErrors {
        &self.errors
    }

    /// Validates all fields, replaces inline errors and opens the overlay
    /// when everything passes.
    pub fn submit(&mut self) -> LoginValidation {
        let validation = validate_login(&self.form);
        self.errors = validation.errors.clone();
        if validation.is_valid {
            self.confirmation_open = true;
            info!("event=login_submit module=login status=ok");
        } else {
            info!(
                "event=login_submit module=login status=invalid invalid_fields={}",
                self.errors.invalid_fields().len()
            );
        }
        validation
    }

    /// Overlay content while it is open.
    pub fn confirmation(&self) -> Option<LoginConfirmation> {
        self.confirmation_open
            .then(|| LoginConfirmation::from(&self.form))
    }

    /// Closes the overlay; entered values stay in place.
    pub fn dismiss_confirmation(&mut self) {
        self.confirmation_open = false;
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    /// Whether the password field renders in clear text. Starts hidden.
    pub fn password_visible(&self) -> bool {
        self.password_visible
    }
}

#[cfg(test)]
mod tests {
    use super::LoginFormState;

    #[test]
    fn password_starts_hidden_and_toggles() {
        let mut state = LoginFormState::new();
        assert!(!state.password_visible());
        state.toggle_password_visibility();
        assert!(state.password_visible());
        state.toggle_password_visibility();
        assert!(!state.password_visible());
    }

    #[test]
    fn invalid_submit_keeps_overlay_closed() {
        let mut state = LoginFormState::new();
        state.set_username("a");
        let validation = state.submit();
        assert!(!validation.is_valid);
        assert!(state.confirmation().is_none());
        assert_eq!(
            state.errors().username,
            "Username can't be less than two characters."
        );
    }
}
