//! Registration and login, the two unauthenticated endpoints.

use crate::error::Result;
use crate::http::{endpoint, json, send};
use crate::types::{LoginRequest, LoginResponse, Registration, User};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Authentication client for the myFlix API.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url) -> Self {
        Self { http, base_url }
    }

    /// Register a new account.
    pub async fn register(&self, registration: &Registration) -> Result<User> {
        let url = endpoint(self.base_url, &["users"])?;
        debug!(url = %url, username = %registration.username, "Registering user");

        let response = send(self.http.post(url).json(registration)).await?;
        let user: User = json(response, "registration response").await?;

        info!(username = %user.username, user_id = %user.id, "Registration successful");
        Ok(user)
    }

    /// Exchange credentials for a user record and bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = endpoint(self.base_url, &["login"])?;
        debug!(url = %url, username = %username, "Attempting login");

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = send(self.http.post(url).json(&request)).await?;
        let login: LoginResponse = json(response, "login response").await?;

        info!(
            username = %login.user.username,
            user_id = %login.user.id,
            "Login successful"
        );
        Ok(login)
    }
}
