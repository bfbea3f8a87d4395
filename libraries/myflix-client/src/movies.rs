//! Catalog reads: movies and directors.

use crate::error::Result;
use crate::http::{endpoint, json, send};
use crate::types::{Director, Movie};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Catalog client for the myFlix API.
pub struct MovieClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    access_token: &'a str,
}

impl<'a> MovieClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Get every movie in the catalog.
    pub async fn get_all_movies(&self) -> Result<Vec<Movie>> {
        let url = endpoint(self.base_url, &["movies"])?;
        debug!(url = %url, "Fetching all movies");

        let response = send(self.http.get(url).bearer_auth(self.access_token)).await?;
        let movies: Vec<Movie> = json(response, "movie list").await?;

        debug!(movies = movies.len(), "Fetched movies");
        Ok(movies)
    }

    pub async fn get_movie_by_id(&self, movie_id: &str) -> Result<Movie> {
        let url = endpoint(self.base_url, &["movieid", movie_id])?;
        debug!(url = %url, movie_id = %movie_id, "Fetching movie");

        let response = send(self.http.get(url).bearer_auth(self.access_token)).await?;
        json(response, "movie").await
    }

    pub async fn get_movie_by_title(&self, title: &str) -> Result<Movie> {
        let url = endpoint(self.base_url, &["movie", title])?;
        debug!(url = %url, title = %title, "Fetching movie");

        let response = send(self.http.get(url).bearer_auth(self.access_token)).await?;
        json(response, "movie").await
    }

    pub async fn get_director(&self, name: &str) -> Result<Director> {
        let url = endpoint(self.base_url, &["director", name])?;
        debug!(url = %url, director = %name, "Fetching director");

        let response = send(self.http.get(url).bearer_auth(self.access_token)).await?;
        json(response, "director").await
    }
}
