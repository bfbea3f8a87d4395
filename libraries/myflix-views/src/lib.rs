//! myFlix Views
//!
//! Headless registration and login views plus the application shell that
//! hosts them as dialogs. Rendering is left to the host: it supplies form
//! input through [`FormInput`] and shows messages through [`Notifier`].
//!
//! # Example
//!
//! ```ignore
//! use myflix_views::{AppShell, DialogResult};
//!
//! let mut shell = AppShell::new(client, notifier);
//! if shell.open_login_dialog(&mut input).await == DialogResult::Authenticated {
//!     assert!(shell.is_logged_in());
//! }
//! ```

pub mod dialog;
pub mod login;
pub mod notify;
pub mod registration;
pub mod shell;

pub use dialog::{AfterClosed, DialogRef, DialogResult};
pub use login::{LoginForm, LoginView};
pub use notify::{Notification, Notifier};
pub use registration::{RegistrationForm, RegistrationView};
pub use shell::{AppShell, FormInput};
