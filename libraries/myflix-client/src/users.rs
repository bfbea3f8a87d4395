//! User accounts and favorites.

use crate::error::Result;
use crate::http::{endpoint, json, send};
use crate::types::{DeleteUserRequest, User, UserUpdate};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// User client for the myFlix API.
pub struct UserClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    access_token: &'a str,
}

impl<'a> UserClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    pub async fn get_user_list(&self) -> Result<Vec<User>> {
        let url = endpoint(self.base_url, &["users"])?;
        debug!(url = %url, "Fetching users");

        let response = send(self.http.get(url).bearer_auth(self.access_token)).await?;
        json(response, "user list").await
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<User> {
        let url = endpoint(self.base_url, &["user", user_id])?;
        debug!(url = %url, user_id = %user_id, "Fetching user");

        let response = send(self.http.get(url).bearer_auth(self.access_token)).await?;
        json(response, "user").await
    }

    /// Add a movie to the user's favorites; returns the updated user.
    pub async fn add_favorite_movie(&self, user_id: &str, title: &str) -> Result<User> {
        let url = endpoint(self.base_url, &["user", user_id, title])?;
        debug!(url = %url, user_id = %user_id, title = %title, "Adding favorite");

        let response = send(
            self.http
                .post(url)
                .bearer_auth(self.access_token)
                .json(&serde_json::json!({})),
        )
        .await?;
        json(response, "user").await
    }

    /// Remove a movie from the user's favorites; returns the updated user.
    pub async fn delete_favorite_movie(&self, user_id: &str, title: &str) -> Result<User> {
        let url = endpoint(self.base_url, &["user", user_id, title])?;
        debug!(url = %url, user_id = %user_id, title = %title, "Removing favorite");

        let response = send(self.http.delete(url).bearer_auth(self.access_token)).await?;
        json(response, "user").await
    }

    pub async fn edit_user(&self, user_id: &str, update: &UserUpdate) -> Result<User> {
        let url = endpoint(self.base_url, &["user", user_id])?;
        debug!(url = %url, user_id = %user_id, "Updating user");

        let response = send(
            self.http
                .put(url)
                .bearer_auth(self.access_token)
                .json(update),
        )
        .await?;
        json(response, "user").await
    }

    /// Delete the account; returns the server's confirmation text.
    pub async fn delete_user(&self, user_id: &str) -> Result<String> {
        let url = endpoint(self.base_url, &["user"])?;
        debug!(url = %url, user_id = %user_id, "Deleting user");

        let request = DeleteUserRequest {
            id: user_id.to_string(),
        };
        let response = send(
            self.http
                .delete(url)
                .bearer_auth(self.access_token)
                .json(&request),
        )
        .await?;

        let text = response.text().await?;
        // The API answers with either plain text or a JSON string.
        let confirmation = serde_json::from_str::<String>(&text).unwrap_or(text);

        info!(user_id = %user_id, "User deleted");
        Ok(confirmation)
    }
}
