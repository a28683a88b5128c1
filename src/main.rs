use watchlist::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,watchlist=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    watchlist::serve(config).await
}
