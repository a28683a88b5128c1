use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Movie, MovieUpdate, MoviePatch, NewMovie, SearchQuery},
};

pub async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.store.list().await?;
    Ok(Json(movies.into_iter().map(Movie::from).collect()))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewMovie>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let Json(new) = body.map_err(reject)?;
    let saved = state.store.create(new).await?;
    Ok((StatusCode::CREATED, Json(saved.into())))
}

pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.store.search(&q.q).await?;
    tracing::debug!(query = %q.q, hits = movies.len(), "search");
    Ok(Json(movies.into_iter().map(Movie::from).collect()))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<MovieUpdate>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let id = parse_id(&id)?;
    let Json(update) = body.map_err(reject)?;
    let updated = state.store.update(id, update).await?;
    Ok(Json(updated.into()))
}

pub async fn patch_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<MoviePatch>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let id = parse_id(&id)?;
    let Json(patch) = body.map_err(reject)?;
    let updated = state.store.patch(id, patch).await?;
    Ok(Json(updated.into()))
}

// An identifier that cannot be parsed cannot name a stored movie.
fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse().map_err(|_| AppError::NotFound)
}

fn reject(rejection: JsonRejection) -> AppError {
    AppError::validation(rejection.body_text())
}
