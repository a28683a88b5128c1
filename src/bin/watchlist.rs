use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use watchlist::{
    client::{Filter, MovieClient, WatchlistView},
    models::Movie,
};

#[derive(Parser, Debug)]
#[command(name = "watchlist")]
#[command(about = "Personal movie watchlist", long_about = None)]
struct Args {
    #[arg(long, env = "WATCHLIST_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the watchlist
    List {
        #[arg(short, long)]
        search: Option<String>,
        /// all, watched or not-watched
        #[arg(short, long, default_value_t = Filter::All)]
        filter: Filter,
    },
    /// Add a movie
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short = 'y', long, default_value = "")]
        release_year: String,
        #[arg(short, long)]
        watched: bool,
    },
    /// Flip the watched flag of a movie
    Toggle { id: i32 },
    /// Rate a movie from 0 to 5 stars
    Rate {
        id: i32,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
        stars: u8,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let http = reqwest::Client::builder()
        .user_agent("watchlist/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;
    let mut view = WatchlistView::new(MovieClient::new(http, args.api_url));

    match args.command {
        Command::List { search, filter } => {
            view.set_filter(filter);
            match search {
                Some(q) => view.set_search(q).await,
                None => view.refresh().await,
            }
            .context("fetching movies")?;
            for movie in view.visible() {
                print_movie(movie);
            }
        },
        Command::Add { title, description, release_year, watched } => {
            view.form.title = title;
            view.form.description = description;
            view.form.release_year = release_year;
            view.form.watch = watched;
            let movie = view.submit().await.context("adding movie")?;
            print_movie(movie);
        },
        Command::Toggle { id } => {
            view.refresh().await.context("fetching movies")?;
            let handle = view.toggle_watch(id).with_context(|| format!("no movie with id {id}"))?;
            print_movie(&handle.await?.context("updating movie")?);
        },
        Command::Rate { id, stars } => {
            view.refresh().await.context("fetching movies")?;
            let handle =
                view.set_rating(id, stars).with_context(|| format!("no movie with id {id}"))?;
            print_movie(&handle.await?.context("updating movie")?);
        },
    }

    Ok(())
}

fn print_movie(movie: &Movie) {
    let year = movie.release_year.map(|y| format!(" ({y})")).unwrap_or_default();
    let rating = movie.rating.unwrap_or(0) as usize;
    let stars: String = (1..=5).map(|s| if s <= rating { '★' } else { '☆' }).collect();
    let watched = if movie.watch { "watched" } else { "to watch" };
    println!("{:>4}  {}{}  [{}]  {}", movie.id, movie.title, year, watched, stars);
    if let Some(description) = &movie.description {
        println!("      {description}");
    }
}
