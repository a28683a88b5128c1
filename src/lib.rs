pub mod client;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, store::MovieStore};

pub struct AppState {
    pub store: MovieStore,
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/movies", get(routes::list_movies).post(routes::create_movie))
        .route("/movie/search", get(routes::search_movies))
        .route("/movies/{id}", put(routes::update_movie).patch(routes::patch_movie))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Connects to the database, applies migrations and serves until the
/// listener fails.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let db = db::connect_and_migrate(&config.database_url, config.db_max_connections).await?;
    let state = Arc::new(AppState { store: MovieStore::new(db) });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
