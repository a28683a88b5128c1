//! Client side of the watchlist: a typed HTTP client and the stateful view
//! that drives it.

mod http;
mod view;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::models::{Movie, MoviePatch, NewMovie};

pub use http::MovieClient;
pub use view::{Filter, MovieForm, WatchlistView};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// The operations the view needs from the movie API.
#[async_trait]
pub trait MovieApi: Clone + Send + Sync + 'static {
    async fn list(&self) -> ClientResult<Vec<Movie>>;
    async fn search(&self, query: &str) -> ClientResult<Vec<Movie>>;
    async fn create(&self, movie: &NewMovie) -> ClientResult<Movie>;
    async fn patch(&self, id: i32, patch: &MoviePatch) -> ClientResult<Movie>;
}
