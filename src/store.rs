use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryOrder, Set,
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{MAX_RATING, MovieUpdate, MoviePatch, NewMovie},
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        Ok(movies)
    }

    pub async fn create(&self, new: NewMovie) -> AppResult<movie::Model> {
        let title = new
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::validation("title is required"))?;
        check_rating(new.rating)?;

        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(title),
            description: Set(new.description),
            release_year: Set(new.release_year),
            watch: Set(new.watch),
            rating: Set(new.rating.map(i32::from)),
        };

        let saved = model.insert(&self.db).await?;
        tracing::debug!(id = saved.id, title = %saved.title, "movie created");
        Ok(saved)
    }

    /// Case-insensitive substring match on the title. An empty query matches
    /// every movie.
    ///
    /// Titles are folded in Rust rather than with SQLite's `lower()`, which
    /// only folds ASCII.
    pub async fn search(&self, query: &str) -> AppResult<Vec<movie::Model>> {
        let needle = query.to_lowercase();
        let movies = self.list().await?;
        Ok(movies.into_iter().filter(|m| m.title.to_lowercase().contains(&needle)).collect())
    }

    pub async fn update(&self, id: i32, update: MovieUpdate) -> AppResult<movie::Model> {
        check_rating(update.rating)?;

        let mut active = self.find(id).await?.into_active_model();
        active.watch = Set(update.watch);
        active.rating = Set(update.rating.map(i32::from));
        Ok(active.update(&self.db).await?)
    }

    pub async fn patch(&self, id: i32, patch: MoviePatch) -> AppResult<movie::Model> {
        check_rating(patch.rating)?;

        let current = self.find(id).await?;
        if patch == MoviePatch::default() {
            return Ok(current);
        }

        let mut active = current.into_active_model();
        if let Some(watch) = patch.watch {
            active.watch = Set(watch);
        }
        if let Some(rating) = patch.rating {
            active.rating = Set(Some(i32::from(rating)));
        }
        Ok(active.update(&self.db).await?)
    }

    async fn find(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound)
    }
}

fn check_rating(rating: Option<u8>) -> AppResult<()> {
    match rating {
        Some(r) if r > MAX_RATING => {
            Err(AppError::validation(format!("rating must be between 0 and {MAX_RATING}")))
        },
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn store() -> MovieStore {
        let db = db::connect_and_migrate("sqlite::memory:", 1).await.unwrap();
        MovieStore::new(db)
    }

    fn titled(title: &str) -> NewMovie {
        NewMovie { title: Some(title.to_string()), ..Default::default() }
    }

    #[tokio::test]
    async fn create_assigns_id_and_defaults() {
        let store = store().await;
        let saved = store.create(titled("Heat")).await.unwrap();
        assert!(saved.id > 0);
        assert!(!saved.watch);
        assert_eq!(saved.rating, None);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let store = store().await;
        let err = store.create(titled("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = store.create(NewMovie::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_title_is_a_validation_error() {
        let store = store().await;
        store.create(titled("Heat")).await.unwrap();
        let err = store.create(titled("Heat")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let store = store().await;
        store.create(titled("The Matrix")).await.unwrap();
        store.create(titled("Inception")).await.unwrap();

        let hits = store.search("matrix").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "The Matrix");

        assert_eq!(store.search("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let store = store().await;
        store.create(titled("100% Wolf")).await.unwrap();
        store.create(titled("1000 Wolves")).await.unwrap();

        let hits = store.search("100%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "100% Wolf");
        assert!(store.search("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn patch_applies_only_present_fields() {
        let store = store().await;
        let saved = store
            .create(NewMovie { rating: Some(2), ..titled("Heat") })
            .await
            .unwrap();

        let patched = store.patch(saved.id, MoviePatch::watch(true)).await.unwrap();
        assert!(patched.watch);
        assert_eq!(patched.rating, Some(2));

        let patched = store.patch(saved.id, MoviePatch::rating(5)).await.unwrap();
        assert!(patched.watch);
        assert_eq!(patched.rating, Some(5));

        let unchanged = store.patch(saved.id, MoviePatch::default()).await.unwrap();
        assert_eq!(unchanged, patched);
    }

    #[tokio::test]
    async fn full_update_replaces_watch_and_rating() {
        let store = store().await;
        let saved = store
            .create(NewMovie { rating: Some(4), ..titled("Heat") })
            .await
            .unwrap();

        let updated =
            store.update(saved.id, MovieUpdate { watch: true, rating: None }).await.unwrap();
        assert!(updated.watch);
        assert_eq!(updated.rating, None);
        assert_eq!(updated.title, "Heat");
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let store = store().await;
        let err = store.patch(42, MoviePatch::watch(true)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn rating_above_five_is_rejected() {
        let store = store().await;
        let saved = store.create(titled("Heat")).await.unwrap();
        let err = store.patch(saved.id, MoviePatch::rating(6)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let store = store().await;
        store.create(titled("Ça va")).await.unwrap();
        store.create(titled("ÉTÉ")).await.unwrap();
        store.create(titled("Inception")).await.unwrap();

        let titles = |movies: Vec<movie::Model>| -> Vec<String> {
            movies.into_iter().map(|m| m.title).collect()
        };
        assert_eq!(titles(store.search("Ça").await.unwrap()), vec!["Ça va"]);
        assert_eq!(titles(store.search("ça").await.unwrap()), vec!["Ça va"]);
        assert_eq!(titles(store.search("ÉTÉ").await.unwrap()), vec!["ÉTÉ"]);
        assert_eq!(titles(store.search("été").await.unwrap()), vec!["ÉTÉ"]);
    }
}
