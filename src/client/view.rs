use std::{fmt, str::FromStr};

use tokio::task::JoinHandle;

use super::{ClientResult, MovieApi};
use crate::models::{MAX_RATING, Movie, MoviePatch, NewMovie};

/// Which part of the loaded list is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Watched,
    NotWatched,
}

impl Filter {
    pub fn matches(self, movie: &Movie) -> bool {
        match self {
            Filter::All => true,
            Filter::Watched => movie.watch,
            Filter::NotWatched => !movie.watch,
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "watched" => Ok(Filter::Watched),
            "not-watched" => Ok(Filter::NotWatched),
            other => Err(format!("unknown filter `{other}` (all, watched, not-watched)")),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Filter::All => "all",
            Filter::Watched => "watched",
            Filter::NotWatched => "not-watched",
        })
    }
}

/// Uncommitted values of the creation form, kept as entered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub description: String,
    pub release_year: String,
    pub watch: bool,
}

impl MovieForm {
    pub fn to_new_movie(&self) -> NewMovie {
        let description = self.description.trim();
        NewMovie {
            title: Some(self.title.clone()),
            description: (!description.is_empty()).then(|| description.to_string()),
            release_year: self.release_year.trim().parse().ok(),
            watch: self.watch,
            rating: None,
        }
    }
}

/// In-memory state of the watchlist screen.
///
/// Watch toggles and ratings are applied locally first and then sent in the
/// background. A failed background write is logged and the local change is
/// kept.
pub struct WatchlistView<A> {
    api: A,
    movies: Vec<Movie>,
    pub form: MovieForm,
    filter: Filter,
    search: String,
}

impl<A: MovieApi> WatchlistView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            movies: Vec::new(),
            form: MovieForm::default(),
            filter: Filter::All,
            search: String::new(),
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// The loaded movies that pass the current filter.
    pub fn visible(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter().filter(|m| self.filter.matches(m))
    }

    /// Reloads the list from the search endpoint when a query is set, else
    /// from the full listing. The current list is kept on failure.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let result = if self.search.is_empty() {
            self.api.list().await
        } else {
            self.api.search(&self.search).await
        };

        match result {
            Ok(movies) => {
                self.movies = movies;
                Ok(())
            },
            Err(err) => {
                tracing::warn!(search = %self.search, error = %err, "failed to fetch movies");
                Err(err)
            },
        }
    }

    pub async fn set_search(&mut self, query: impl Into<String>) -> ClientResult<()> {
        self.search = query.into();
        self.refresh().await
    }

    /// Sends the form. On success the stored movie is appended and the form
    /// cleared; on failure both are left as they were.
    pub async fn submit(&mut self) -> ClientResult<&Movie> {
        let created = match self.api.create(&self.form.to_new_movie()).await {
            Ok(movie) => movie,
            Err(err) => {
                tracing::warn!(title = %self.form.title, error = %err, "failed to create movie");
                return Err(err);
            },
        };

        self.form = MovieForm::default();
        let index = self.movies.len();
        self.movies.push(created);
        Ok(&self.movies[index])
    }

    /// Flips the watched flag of a loaded movie. Returns `None` if `id` is not
    /// in the list.
    pub fn toggle_watch(&mut self, id: i32) -> Option<JoinHandle<ClientResult<Movie>>> {
        let movie = self.movies.iter_mut().find(|m| m.id == id)?;
        movie.watch = !movie.watch;
        let watch = movie.watch;
        Some(self.send_patch(id, MoviePatch::watch(watch)))
    }

    /// Sets the star rating of a loaded movie, capped at five.
    pub fn set_rating(&mut self, id: i32, stars: u8) -> Option<JoinHandle<ClientResult<Movie>>> {
        let stars = stars.min(MAX_RATING);
        let movie = self.movies.iter_mut().find(|m| m.id == id)?;
        movie.rating = Some(stars);
        Some(self.send_patch(id, MoviePatch::rating(stars)))
    }

    fn send_patch(&self, id: i32, patch: MoviePatch) -> JoinHandle<ClientResult<Movie>> {
        let api = self.api.clone();
        tokio::spawn(async move {
            let result = api.patch(id, &patch).await;
            if let Err(err) = &result {
                tracing::warn!(id, ?patch, error = %err, "failed to update movie");
            }
            result
        })
    }
}
