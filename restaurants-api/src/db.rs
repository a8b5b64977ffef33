use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::pooled_connection::deadpool::{self, BuildError};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncConnection, AsyncPgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub type Pool = deadpool::Pool<AsyncPgConnection>;

/// A checked out connection. Goes back to the pool when dropped.
pub type PooledConnection = deadpool::Object<AsyncPgConnection>;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("failed to connect: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] BuildError),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error("migration task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds the pool lazily; no connection is opened until the first checkout.
pub fn establish_pool(database_url: &str, max_size: usize) -> Result<Pool, DbError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    let pool = Pool::builder(manager).max_size(max_size).build()?;
    Ok(pool)
}

pub async fn establish_connection(database_url: &str) -> Result<AsyncPgConnection, DbError> {
    Ok(AsyncPgConnection::establish(database_url).await?)
}

pub async fn run_migrations(database_url: &str) -> Result<(), DbError> {
    let conn = establish_connection(database_url).await?;
    let mut async_wrapper: AsyncConnectionWrapper<AsyncPgConnection> =
        AsyncConnectionWrapper::from(conn);

    let applied = tokio::task::spawn_blocking(move || {
        async_wrapper
            .run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|e| DbError::Migration(e.to_string()))
    })
    .await??;

    info!(applied, "migrations up to date");
    Ok(())
}
