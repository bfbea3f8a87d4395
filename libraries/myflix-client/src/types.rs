//! Types for myFlix API requests and responses.
//!
//! Field names on the wire follow the API's PascalCase documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base URL of the hosted myFlix API.
pub const DEFAULT_API_URL: &str = "https://movie-api-c3t5.onrender.com";

/// Configuration for connecting to a myFlix API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://movie-api-c3t5.onrender.com")
    pub url: String,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

// =============================================================================
// Domain Types
// =============================================================================

/// A registered user as returned by the API.
///
/// The password is write-only: it is sent in [`Registration`] and [`UserUpdate`]
/// but never kept on this type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(
        rename = "Birthday",
        default,
        deserialize_with = "lenient_date::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthday: Option<DateTime<Utc>>,
    #[serde(rename = "FavoriteMovies", default)]
    pub favorite_movies: Vec<String>,
    #[serde(rename = "Token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// A movie in the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Genre")]
    pub genre: Genre,
    #[serde(rename = "Director")]
    pub director: MovieDirector,
    #[serde(rename = "Actors", default)]
    pub actors: Vec<String>,
    #[serde(rename = "ImagePath", default)]
    pub image_path: String,
    #[serde(rename = "Featured", default)]
    pub featured: bool,
}

/// Genre of a movie, either a bare name or the embedded genre record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Genre {
    Name(String),
    Record {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Description", default)]
        description: String,
    },
}

impl Genre {
    pub fn name(&self) -> &str {
        match self {
            Genre::Name(name) | Genre::Record { name, .. } => name,
        }
    }
}

/// Director reference on a movie, either a bare name or the embedded record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MovieDirector {
    Name(String),
    Record(Director),
}

impl MovieDirector {
    pub fn name(&self) -> &str {
        match self {
            MovieDirector::Name(name) => name,
            MovieDirector::Record(director) => &director.name,
        }
    }
}

/// A film director.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Director {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Bio", default)]
    pub bio: String,
    #[serde(
        rename = "Birth",
        default,
        deserialize_with = "lenient_date::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth: Option<DateTime<Utc>>,
    #[serde(
        rename = "Death",
        default,
        deserialize_with = "lenient_date::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub death: Option<DateTime<Utc>>,
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the registration endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime<Utc>>,
}

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Response from a successful login.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

// =============================================================================
// User Types
// =============================================================================

/// Partial update of a user; only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(rename = "Username", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "Password", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime<Utc>>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.birthday.is_none()
    }
}

/// Request body for account deletion.
#[derive(Debug, Serialize)]
pub struct DeleteUserRequest {
    pub id: String,
}

/// Parse a calendar date (`YYYY-MM-DD`) into midnight UTC.
pub fn parse_birthday(text: &str) -> Option<DateTime<Utc>> {
    chrono::NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Dates arrive either as RFC 3339 timestamps or as bare `YYYY-MM-DD` strings.
mod lenient_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(&text) {
            return Ok(Some(timestamp.with_timezone(&Utc)));
        }
        super::parse_birthday(&text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {text}")))
    }
}
