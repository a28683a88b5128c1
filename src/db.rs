use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::AppResult;

const FILE_PRAGMAS: [&str; 2] = ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"];

pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> AppResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url.to_string());
    // Every pooled connection to `sqlite::memory:` would open its own empty database.
    let in_memory = database_url.contains(":memory:");
    opts.max_connections(if in_memory { 1 } else { max_connections.max(1) });

    let db = Database::connect(opts).await?;

    if !in_memory {
        for pragma in FILE_PRAGMAS {
            db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
                .await?;
        }
    }

    Migrator::up(&db, None).await?;
    tracing::debug!(url = %database_url, "database ready");
    Ok(db)
}
