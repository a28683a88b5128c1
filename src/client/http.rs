use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;

use super::{ClientError, ClientResult, MovieApi};
use crate::models::{Movie, MoviePatch, NewMovie};

#[derive(Clone)]
pub struct MovieClient {
    http: reqwest::Client,
    base_url: String,
}

impl MovieClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl MovieApi for MovieClient {
    async fn list(&self) -> ClientResult<Vec<Movie>> {
        let resp = self.http.get(self.url("/movies")).send().await?;
        decode(resp).await
    }

    async fn search(&self, query: &str) -> ClientResult<Vec<Movie>> {
        let resp = self.http.get(self.url("/movie/search")).query(&[("q", query)]).send().await?;
        decode(resp).await
    }

    async fn create(&self, movie: &NewMovie) -> ClientResult<Movie> {
        let resp = self.http.post(self.url("/movies")).json(movie).send().await?;
        decode(resp).await
    }

    async fn patch(&self, id: i32, patch: &MoviePatch) -> ClientResult<Movie> {
        let resp = self.http.patch(self.url(&format!("/movies/{id}"))).json(patch).send().await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(ClientError::Status { status, message });
    }
    Ok(resp.json().await?)
}
