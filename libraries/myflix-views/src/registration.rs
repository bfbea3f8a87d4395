//! Account registration view.

use crate::dialog::{DialogRef, DialogResult};
use crate::notify::{Notification, Notifier};
use myflix_client::{parse_birthday, MyFlixClient, Registration};
use std::sync::Arc;
use tracing::debug;

pub const FILL_ALL_FIELDS: &str = "Please fill all fields";
pub const INVALID_BIRTHDAY: &str = "Please enter a valid birthday (YYYY-MM-DD)";
pub const REGISTRATION_SUCCESSFUL: &str = "Registration successful";

/// Fields of the registration form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub email: String,
    /// Calendar date, `YYYY-MM-DD`
    pub birthday: String,
}

impl RegistrationForm {
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty()
            && !self.password.is_empty()
            && !self.email.is_empty()
            && !self.birthday.is_empty()
    }
}

/// Collects a [`RegistrationForm`] and submits it to the API.
pub struct RegistrationView {
    client: MyFlixClient,
    notifier: Arc<dyn Notifier>,
    dialog: DialogRef,
    pub form: RegistrationForm,
}

impl RegistrationView {
    pub fn new(client: MyFlixClient, notifier: Arc<dyn Notifier>, dialog: DialogRef) -> Self {
        Self {
            client,
            notifier,
            dialog,
            form: RegistrationForm::default(),
        }
    }

    pub fn dialog(&self) -> &DialogRef {
        &self.dialog
    }

    pub fn cancel(&mut self) {
        self.dialog.close(DialogResult::Cancelled);
    }

    /// Submit the form.
    ///
    /// Incomplete forms and unparseable birthdays are rejected locally. On
    /// success the dialog closes; on failure it stays open for another try.
    pub async fn register_user(&mut self) {
        if !self.dialog.is_open() {
            debug!("Registration submitted on a closed dialog");
            return;
        }

        if !self.form.is_complete() {
            self.notify(FILL_ALL_FIELDS);
            return;
        }

        let Some(birthday) = parse_birthday(&self.form.birthday) else {
            self.notify(INVALID_BIRTHDAY);
            return;
        };

        let registration = Registration {
            username: self.form.username.clone(),
            password: self.form.password.clone(),
            email: self.form.email.clone(),
            birthday: Some(birthday),
        };

        match self.client.register(&registration).await {
            Ok(_) => {
                self.dialog.close(DialogResult::Closed);
                self.notify(REGISTRATION_SUCCESSFUL);
            }
            Err(e) => {
                self.notify(format!("Registration failed: {}", e.message()));
            }
        }
    }

    fn notify(&self, message: impl Into<String>) {
        self.notifier.notify(Notification::new(message));
    }
}
