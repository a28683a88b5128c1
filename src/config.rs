use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "5000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://watchlist.db?mode=rwc".to_string());

        let db_max_connections: u32 =
            std::env::var("DB_MAX_CONNECTIONS").ok().and_then(|s| s.parse().ok()).unwrap_or(5);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            db_max_connections,
        })
    }
}
