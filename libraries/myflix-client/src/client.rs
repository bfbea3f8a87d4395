//! Main myFlix API client.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::movies::MovieClient;
use crate::session::Session;
use crate::types::{ClientConfig, Director, LoginResponse, Movie, Registration, User, UserUpdate};
use crate::users::UserClient;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Client for the myFlix movie API.
///
/// Every call is a fresh round trip. Authenticated calls read the bearer
/// token from the injected [`Session`] right before sending; with no stored
/// token the request goes out with an empty bearer segment and the server
/// decides.
///
/// # Example
///
/// ```ignore
/// use myflix_client::{ClientConfig, MyFlixClient, Session};
///
/// let session = Session::file("session.json");
/// let client = MyFlixClient::new(ClientConfig::default(), session.clone())?;
///
/// let login = client.login("alice", "p1").await?;
/// session.establish(&login)?;
///
/// let movies = client.get_all_movies().await?;
/// println!("Found {} movies", movies.len());
/// ```
#[derive(Debug, Clone)]
pub struct MyFlixClient {
    http: Client,
    base_url: Url,
    session: Session,
}

impl MyFlixClient {
    /// Create a new client with the given configuration and session.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim().trim_end_matches('/');
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base_url = Url::parse(url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .user_agent(format!("myFlix-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// The API base URL, without a trailing slash.
    pub fn url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The user stored by the last login, if any.
    pub fn current_user(&self) -> Result<Option<User>> {
        self.session.current_user()
    }

    /// Forget the stored user and token.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        info!("Logged out");
        Ok(())
    }

    fn token(&self) -> Result<String> {
        Ok(self.session.token()?.unwrap_or_default())
    }

    fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub async fn register(&self, registration: &Registration) -> Result<User> {
        self.auth().register(registration).await
    }

    /// Log in. The result is returned, not stored; see [`Session::establish`].
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        self.auth().login(username, password).await
    }

    // =========================================================================
    // Movies
    // =========================================================================

    pub async fn get_all_movies(&self) -> Result<Vec<Movie>> {
        let token = self.token()?;
        MovieClient::new(&self.http, &self.base_url, &token)
            .get_all_movies()
            .await
    }

    pub async fn get_movie_by_id(&self, movie_id: &str) -> Result<Movie> {
        let token = self.token()?;
        MovieClient::new(&self.http, &self.base_url, &token)
            .get_movie_by_id(movie_id)
            .await
    }

    pub async fn get_movie_by_title(&self, title: &str) -> Result<Movie> {
        let token = self.token()?;
        MovieClient::new(&self.http, &self.base_url, &token)
            .get_movie_by_title(title)
            .await
    }

    pub async fn get_director(&self, name: &str) -> Result<Director> {
        let token = self.token()?;
        MovieClient::new(&self.http, &self.base_url, &token)
            .get_director(name)
            .await
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn get_user_list(&self) -> Result<Vec<User>> {
        let token = self.token()?;
        UserClient::new(&self.http, &self.base_url, &token)
            .get_user_list()
            .await
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<User> {
        let token = self.token()?;
        UserClient::new(&self.http, &self.base_url, &token)
            .get_user_by_id(user_id)
            .await
    }

    /// Add a favorite. The stored user is refreshed when it is the one changed.
    pub async fn add_favorite_movie(&self, user_id: &str, title: &str) -> Result<User> {
        let token = self.token()?;
        let user = UserClient::new(&self.http, &self.base_url, &token)
            .add_favorite_movie(user_id, title)
            .await?;
        self.session.refresh_user(&user)?;
        Ok(user)
    }

    /// Remove a favorite. The stored user is refreshed when it is the one changed.
    pub async fn delete_favorite_movie(&self, user_id: &str, title: &str) -> Result<User> {
        let token = self.token()?;
        let user = UserClient::new(&self.http, &self.base_url, &token)
            .delete_favorite_movie(user_id, title)
            .await?;
        self.session.refresh_user(&user)?;
        Ok(user)
    }

    /// Edit an account. The stored user is refreshed when it is the one changed.
    pub async fn edit_user(&self, user_id: &str, update: &UserUpdate) -> Result<User> {
        let token = self.token()?;
        let user = UserClient::new(&self.http, &self.base_url, &token)
            .edit_user(user_id, update)
            .await?;
        self.session.refresh_user(&user)?;
        Ok(user)
    }

    /// Delete an account. Deleting the stored user also clears the session.
    pub async fn delete_user(&self, user_id: &str) -> Result<String> {
        let token = self.token()?;
        let is_current = self
            .session
            .current_user()?
            .is_some_and(|user| user.id == user_id);

        let confirmation = UserClient::new(&self.http, &self.base_url, &token)
            .delete_user(user_id)
            .await?;

        if is_current {
            debug!(user_id = %user_id, "Deleted the logged-in user");
            self.session.clear()?;
        }

        Ok(confirmation)
    }
}
