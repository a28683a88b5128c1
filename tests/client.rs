//! Drives the watchlist view through the real HTTP client against a server
//! bound to an ephemeral port.

use std::sync::Arc;

use watchlist::{
    AppState, app,
    client::{Filter, MovieApi, MovieClient, WatchlistView},
    db,
    store::MovieStore,
};

async fn spawn_server() -> String {
    let db = db::connect_and_migrate("sqlite::memory:", 1).await.expect("in-memory database");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(Arc::new(AppState { store: MovieStore::new(db) }));
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}")
}

#[tokio::test]
async fn view_round_trip_over_http() {
    let base = spawn_server().await;
    let client = MovieClient::new(reqwest::Client::new(), base);
    let mut view = WatchlistView::new(client.clone());

    for title in ["The Matrix", "Inception"] {
        view.form.title = title.to_string();
        view.form.release_year = "1999".to_string();
        view.submit().await.unwrap();
    }
    assert_eq!(view.movies().len(), 2);

    view.set_search("MATRIX").await.unwrap();
    assert_eq!(view.movies().len(), 1);
    let id = view.movies()[0].id;

    let stored = view.toggle_watch(id).unwrap().await.unwrap().unwrap();
    assert!(stored.watch);
    view.set_rating(id, 3).unwrap().await.unwrap().unwrap();
    view.set_rating(id, 5).unwrap().await.unwrap().unwrap();

    view.set_search("").await.unwrap();
    view.set_filter(Filter::Watched);
    let watched: Vec<_> = view.visible().collect();
    assert_eq!(watched.len(), 1);
    assert_eq!(watched[0].rating, Some(5));

    let all = client.list().await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn duplicate_submit_reports_status() {
    let base = spawn_server().await;
    let mut view = WatchlistView::new(MovieClient::new(reqwest::Client::new(), base));

    view.form.title = "Heat".to_string();
    view.submit().await.unwrap();
    view.form.title = "Heat".to_string();
    let err = view.submit().await.unwrap_err();
    assert!(err.to_string().contains("400"), "{err}");
    assert_eq!(view.form.title, "Heat");
}
