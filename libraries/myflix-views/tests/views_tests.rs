//! Tests for the registration and login views and the shell that hosts them.
//!
//! HTTP goes to a wiremock server; notifications go to a mockall mock.

use mockall::mock;
use myflix_client::{
    ClientConfig, ClientError, MemorySessionStore, MyFlixClient, Session, SessionStore,
};
use myflix_views::{
    AppShell, DialogRef, DialogResult, FormInput, LoginForm, LoginView, Notification, Notifier,
    RegistrationForm, RegistrationView,
};
use std::collections::VecDeque;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mock! {
    pub Notifier {}

    impl Notifier for Notifier {
        fn notify(&self, notification: Notification);
    }
}

/// Notifier expecting exactly one notification with `message`.
fn expect_once(notifier: &mut MockNotifier, message: &'static str) {
    notifier
        .expect_notify()
        .withf(move |n: &Notification| n.message == message && n.action == "OK")
        .times(1)
        .return_const(());
}

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "_id": "u1",
        "Username": "alice",
        "Email": "a@example.com",
        "Birthday": "2000-01-01T00:00:00.000Z",
        "FavoriteMovies": []
    })
}

fn alice() -> RegistrationForm {
    RegistrationForm {
        username: "alice".into(),
        password: "p1".into(),
        email: "a@example.com".into(),
        birthday: "2000-01-01".into(),
    }
}

fn client(server: &MockServer, session: Session) -> MyFlixClient {
    MyFlixClient::new(ClientConfig::new(server.uri()), session).unwrap()
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(serde_json::json!({ "Username": "alice", "Password": "p1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": user_json(),
            "token": "jwt-123"
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(serde_json::json!({ "Username": "alice", "Password": "wrong" })))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "Incorrect username or password.",
            "user": false
        })))
        .mount(server)
        .await;
}

/// Memory store whose writes fail once they touch the token key.
#[derive(Default)]
struct FullDiskStore {
    inner: MemorySessionStore,
}

impl FullDiskStore {
    fn check(keys: &[&str]) -> myflix_client::Result<()> {
        if keys.contains(&"token") {
            return Err(ClientError::Session("disk full".into()));
        }
        Ok(())
    }
}

impl SessionStore for FullDiskStore {
    fn get(&self, key: &str) -> myflix_client::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> myflix_client::Result<()> {
        Self::check(&[key])?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> myflix_client::Result<()> {
        Self::check(&[key])?;
        self.inner.remove(key)
    }

    fn set_entries(&self, entries: &[(&str, &str)]) -> myflix_client::Result<()> {
        let keys: Vec<&str> = entries.iter().map(|(key, _)| *key).collect();
        Self::check(&keys)?;
        self.inner.set_entries(entries)
    }

    fn remove_entries(&self, keys: &[&str]) -> myflix_client::Result<()> {
        Self::check(keys)?;
        self.inner.remove_entries(keys)
    }
}

/// Hands out queued forms, then dismisses the dialog.
#[derive(Default)]
struct ScriptedInput {
    registrations: VecDeque<RegistrationForm>,
    logins: VecDeque<LoginForm>,
}

impl FormInput for ScriptedInput {
    fn registration_form(&mut self) -> Option<RegistrationForm> {
        self.registrations.pop_front()
    }

    fn login_form(&mut self) -> Option<LoginForm> {
        self.logins.pop_front()
    }
}

// =============================================================================
// Registration View Tests
// =============================================================================

mod registration_view {
    use super::*;

    #[tokio::test]
    async fn test_any_empty_field_blocks_submission() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let blanks: [fn(&mut RegistrationForm); 4] = [
            |f: &mut RegistrationForm| f.username.clear(),
            |f: &mut RegistrationForm| f.password.clear(),
            |f: &mut RegistrationForm| f.email.clear(),
            |f: &mut RegistrationForm| f.birthday.clear(),
        ];

        for blank in blanks {
            let mut notifier = MockNotifier::new();
            expect_once(&mut notifier, "Please fill all fields");

            let (dialog, _after_closed) = DialogRef::open();
            let mut view = RegistrationView::new(
                client(&mock_server, Session::in_memory()),
                Arc::new(notifier),
                dialog,
            );
            view.form = alice();
            blank(&mut view.form);

            view.register_user().await;
            assert!(view.dialog().is_open());
        }
    }

    #[tokio::test]
    async fn test_success_closes_dialog() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(serde_json::json!({
                "Username": "alice",
                "Password": "p1",
                "Email": "a@example.com",
                "Birthday": "2000-01-01T00:00:00Z"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut notifier = MockNotifier::new();
        expect_once(&mut notifier, "Registration successful");

        let (dialog, after_closed) = DialogRef::open();
        let mut view = RegistrationView::new(
            client(&mock_server, Session::in_memory()),
            Arc::new(notifier),
            dialog,
        );
        view.form = alice();

        view.register_user().await;

        assert!(!view.dialog().is_open());
        assert_eq!(after_closed.await, DialogResult::Closed);
    }

    #[tokio::test]
    async fn test_failure_keeps_dialog_open_with_server_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(400).set_body_string("alice already exists"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut notifier = MockNotifier::new();
        expect_once(&mut notifier, "Registration failed: alice already exists");

        let (dialog, _after_closed) = DialogRef::open();
        let mut view = RegistrationView::new(
            client(&mock_server, Session::in_memory()),
            Arc::new(notifier),
            dialog,
        );
        view.form = alice();

        view.register_user().await;
        assert!(view.dialog().is_open());
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_fallback() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let mut notifier = MockNotifier::new();
        expect_once(
            &mut notifier,
            "Registration failed: Something went wrong; please try again later.",
        );

        let (dialog, _after_closed) = DialogRef::open();
        let mut view = RegistrationView::new(
            client(&mock_server, Session::in_memory()),
            Arc::new(notifier),
            dialog,
        );
        view.form = alice();

        view.register_user().await;
        assert!(view.dialog().is_open());
    }

    #[tokio::test]
    async fn test_unparseable_birthday_blocks_submission() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut notifier = MockNotifier::new();
        expect_once(&mut notifier, "Please enter a valid birthday (YYYY-MM-DD)");

        let (dialog, _after_closed) = DialogRef::open();
        let mut view = RegistrationView::new(
            client(&mock_server, Session::in_memory()),
            Arc::new(notifier),
            dialog,
        );
        view.form = RegistrationForm {
            birthday: "yesterday".into(),
            ..alice()
        };

        view.register_user().await;
        assert!(view.dialog().is_open());
    }
}

// =============================================================================
// Login View Tests
// =============================================================================

mod login_view {
    use super::*;

    #[tokio::test]
    async fn test_success_stores_exactly_the_returned_session() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        let dir = tempfile::tempdir().unwrap();
        let session_path = dir.path().join("session.json");
        let session = Session::file(&session_path);

        let mut notifier = MockNotifier::new();
        expect_once(&mut notifier, "Login Successful, Hello alice");

        let (dialog, after_closed) = DialogRef::open();
        let mut view = LoginView::new(
            client(&mock_server, session.clone()),
            Arc::new(notifier),
            dialog,
        );
        view.form = LoginForm {
            username: "alice".into(),
            password: "p1".into(),
        };

        view.login_user().await;

        assert_eq!(after_closed.await, DialogResult::Authenticated);
        assert_eq!(session.token().unwrap().as_deref(), Some("jwt-123"));

        let stored = session.current_user().unwrap().unwrap();
        let expected: myflix_client::User = serde_json::from_value(user_json()).unwrap();
        assert_eq!(stored, expected);

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&session_path).unwrap()).unwrap();
        let keys: Vec<&String> = on_disk.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["token", "user"]);
    }

    #[tokio::test]
    async fn test_failure_leaves_session_untouched() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        let dir = tempfile::tempdir().unwrap();
        let session_path = dir.path().join("session.json");
        let session = Session::file(&session_path);

        let mut notifier = MockNotifier::new();
        expect_once(&mut notifier, "Login failed: Incorrect username or password.");

        let (dialog, _after_closed) = DialogRef::open();
        let mut view = LoginView::new(
            client(&mock_server, session.clone()),
            Arc::new(notifier),
            dialog,
        );
        view.form = LoginForm {
            username: "alice".into(),
            password: "wrong".into(),
        };

        view.login_user().await;

        assert!(view.dialog().is_open());
        assert!(!session_path.exists());
        assert!(!session.is_active().unwrap());
    }

    #[tokio::test]
    async fn test_session_write_failure_keeps_previous_session() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        let store = Arc::new(FullDiskStore::default());
        store
            .inner
            .set_entries(&[
                ("user", r#"{"_id":"u2","Username":"bob"}"#),
                ("token", "bob-token"),
            ])
            .unwrap();
        let session = Session::new(store);

        let mut notifier = MockNotifier::new();
        expect_once(&mut notifier, "Login failed: Session storage error: disk full");

        let (dialog, _after_closed) = DialogRef::open();
        let mut view = LoginView::new(
            client(&mock_server, session.clone()),
            Arc::new(notifier),
            dialog,
        );
        view.form = LoginForm {
            username: "alice".into(),
            password: "p1".into(),
        };

        view.login_user().await;

        assert!(view.dialog().is_open());
        assert_eq!(session.token().unwrap().as_deref(), Some("bob-token"));
        let stored = session.current_user().unwrap().unwrap();
        assert_eq!(stored.id, "u2");
        assert_eq!(stored.username, "bob");
    }
}

// =============================================================================
// Shell Tests
// =============================================================================

mod shell {
    use super::*;

    #[tokio::test]
    async fn test_login_retry_then_success_flips_flag() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        let mut notifier = MockNotifier::new();
        expect_once(&mut notifier, "Login failed: Incorrect username or password.");
        expect_once(&mut notifier, "Login Successful, Hello alice");

        let mut shell = AppShell::new(
            client(&mock_server, Session::in_memory()),
            Arc::new(notifier),
        );
        assert!(!shell.is_logged_in());

        let mut input = ScriptedInput::default();
        input.logins.push_back(LoginForm {
            username: "alice".into(),
            password: "wrong".into(),
        });
        input.logins.push_back(LoginForm {
            username: "alice".into(),
            password: "p1".into(),
        });

        let result = shell.open_login_dialog(&mut input).await;

        assert_eq!(result, DialogResult::Authenticated);
        assert!(shell.is_logged_in());
        assert!(shell.client().session().is_active().unwrap());
    }

    #[tokio::test]
    async fn test_dismissed_login_keeps_flag_false() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        let mut notifier = MockNotifier::new();
        expect_once(&mut notifier, "Login failed: Incorrect username or password.");

        let mut shell = AppShell::new(
            client(&mock_server, Session::in_memory()),
            Arc::new(notifier),
        );

        let mut input = ScriptedInput::default();
        input.logins.push_back(LoginForm {
            username: "alice".into(),
            password: "wrong".into(),
        });

        let result = shell.open_login_dialog(&mut input).await;

        assert_eq!(result, DialogResult::Cancelled);
        assert!(!shell.is_logged_in());
    }

    #[tokio::test]
    async fn test_registration_does_not_log_in() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut notifier = MockNotifier::new();
        expect_once(&mut notifier, "Please fill all fields");
        expect_once(&mut notifier, "Registration successful");

        let mut shell = AppShell::new(
            client(&mock_server, Session::in_memory()),
            Arc::new(notifier),
        );

        let mut input = ScriptedInput::default();
        input.registrations.push_back(RegistrationForm {
            email: String::new(),
            ..alice()
        });
        input.registrations.push_back(alice());

        let result = shell.open_registration_dialog(&mut input).await;

        assert_eq!(result, DialogResult::Closed);
        assert!(!shell.is_logged_in());
    }
}
