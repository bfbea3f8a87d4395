//! Application shell: opens the registration and login dialogs.

use crate::dialog::{DialogRef, DialogResult};
use crate::login::{LoginForm, LoginView};
use crate::notify::Notifier;
use crate::registration::{RegistrationForm, RegistrationView};
use myflix_client::MyFlixClient;
use std::sync::Arc;
use tracing::info;

/// Source of form submissions for open dialogs.
///
/// Returning `None` means the user dismissed the dialog.
pub trait FormInput {
    fn registration_form(&mut self) -> Option<RegistrationForm>;
    fn login_form(&mut self) -> Option<LoginForm>;
}

/// Top-level container tracking whether the user has logged in.
pub struct AppShell {
    client: MyFlixClient,
    notifier: Arc<dyn Notifier>,
    logged_in: bool,
}

impl AppShell {
    pub fn new(client: MyFlixClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            logged_in: false,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn client(&self) -> &MyFlixClient {
        &self.client
    }

    /// Run the registration dialog until it closes.
    pub async fn open_registration_dialog<I>(&mut self, input: &mut I) -> DialogResult
    where
        I: FormInput + ?Sized,
    {
        let (dialog, after_closed) = DialogRef::open();
        let mut view =
            RegistrationView::new(self.client.clone(), Arc::clone(&self.notifier), dialog);

        while view.dialog().is_open() {
            match input.registration_form() {
                Some(form) => {
                    view.form = form;
                    view.register_user().await;
                }
                None => view.cancel(),
            }
        }
        drop(view);

        after_closed.await
    }

    /// Run the login dialog until it closes.
    ///
    /// The logged-in flag is set only when the dialog reports
    /// [`DialogResult::Authenticated`].
    pub async fn open_login_dialog<I>(&mut self, input: &mut I) -> DialogResult
    where
        I: FormInput + ?Sized,
    {
        let (dialog, after_closed) = DialogRef::open();
        let mut view = LoginView::new(self.client.clone(), Arc::clone(&self.notifier), dialog);

        while view.dialog().is_open() {
            match input.login_form() {
                Some(form) => {
                    view.form = form;
                    view.login_user().await;
                }
                None => view.cancel(),
            }
        }
        drop(view);

        let result = after_closed.await;
        if result == DialogResult::Authenticated {
            self.logged_in = true;
            info!("Logged in");
        }
        result
    }
}
