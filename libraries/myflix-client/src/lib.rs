//! myFlix Client
//!
//! HTTP client library for the myFlix movie API.
//!
//! # Features
//!
//! - **Accounts**: Register, login, edit and delete users
//! - **Catalog**: Movies by id or title, directors
//! - **Favorites**: Add and remove favorite movies
//! - **Session**: Persist the logged-in user and bearer token between runs
//!
//! # Example
//!
//! ```ignore
//! use myflix_client::{ClientConfig, MyFlixClient, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::in_memory();
//!     let client = MyFlixClient::new(ClientConfig::default(), session.clone())?;
//!
//!     // Login and keep the token for later calls
//!     let login = client.login("alice", "p1").await?;
//!     session.establish(&login)?;
//!
//!     let movie = client.get_movie_by_title("The Matrix").await?;
//!     println!("{} by {}", movie.title, movie.director.name());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod http;
mod movies;
pub mod session;
mod types;
mod users;

pub use client::MyFlixClient;
pub use error::{ClientError, ErrorKind, Result, FALLBACK_MESSAGE};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use types::{
    parse_birthday, ClientConfig, Director, Genre, LoginResponse, Movie, MovieDirector,
    Registration, User, UserUpdate, DEFAULT_API_URL,
};

// Sub-clients for direct use if needed
pub use auth::AuthClient;
pub use movies::MovieClient;
pub use users::UserClient;
