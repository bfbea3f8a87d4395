//! Login view.

use crate::dialog::{DialogRef, DialogResult};
use crate::notify::{Notification, Notifier};
use myflix_client::MyFlixClient;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fields of the login form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Collects credentials, logs in, and stores the resulting session.
pub struct LoginView {
    client: MyFlixClient,
    notifier: Arc<dyn Notifier>,
    dialog: DialogRef,
    pub form: LoginForm,
}

impl LoginView {
    pub fn new(client: MyFlixClient, notifier: Arc<dyn Notifier>, dialog: DialogRef) -> Self {
        Self {
            client,
            notifier,
            dialog,
            form: LoginForm::default(),
        }
    }

    pub fn dialog(&self) -> &DialogRef {
        &self.dialog
    }

    pub fn cancel(&mut self) {
        self.dialog.close(DialogResult::Cancelled);
    }

    /// Submit the credentials.
    ///
    /// On success the returned user and token are written to the session and
    /// the dialog closes with [`DialogResult::Authenticated`]. On failure the
    /// session is left alone and the dialog stays open.
    pub async fn login_user(&mut self) {
        if !self.dialog.is_open() {
            debug!("Login submitted on a closed dialog");
            return;
        }

        let login = match self
            .client
            .login(&self.form.username, &self.form.password)
            .await
        {
            Ok(login) => login,
            Err(e) => {
                self.notify(format!("Login failed: {}", e.message()));
                return;
            }
        };

        if let Err(e) = self.client.session().establish(&login) {
            warn!(error = %e, "Could not store session after login");
            self.notify(format!("Login failed: {}", e.message()));
            return;
        }

        self.notify(format!("Login Successful, Hello {}", login.user.username));
        self.dialog.close(DialogResult::Authenticated);
    }

    fn notify(&self, message: impl Into<String>) {
        self.notifier.notify(Notification::new(message));
    }
}
