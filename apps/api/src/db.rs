use std::str::FromStr;

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{error, info};

use crate::errors::AppError;

/// DDL for every table, in foreign-key dependency order.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS profiles (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        name     TEXT NOT NULL,
        email    TEXT NOT NULL,
        bio      TEXT,
        location TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS skills (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        profile_id INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        name       TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        profile_id   INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        title        TEXT NOT NULL,
        description  TEXT NOT NULL,
        technologies TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS project_links (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
        platform   TEXT NOT NULL,
        url        TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS education (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        profile_id     INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        institution    TEXT NOT NULL,
        degree         TEXT NOT NULL,
        field_of_study TEXT NOT NULL,
        start_date     TEXT NOT NULL,
        end_date       TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS work_experience (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        profile_id  INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        company     TEXT NOT NULL,
        position    TEXT NOT NULL,
        description TEXT NOT NULL,
        start_date  TEXT NOT NULL,
        end_date    TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS links (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        profile_id INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        platform   TEXT NOT NULL,
        url        TEXT NOT NULL
    )
    "#,
];

/// Gateway to the relational store. Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens a connection pool. The database file is created if it does not exist.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        info!("Connecting to SQLite at {database_url}...");

        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("Failed to open database")?;

        info!("SQLite connection pool established");
        Ok(Store { pool })
    }

    /// Creates every table that does not exist yet. Safe to run on each startup.
    pub async fn open_schema(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        for statement in SCHEMA {
            sqlx::query(*statement).execute(&mut *conn).await?;
        }
        info!("Database schema ready ({} tables)", SCHEMA.len());
        Ok(())
    }

    /// Runs `f` inside a transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back when it returns `Err`. A dropped
    /// future rolls back when the transaction guard is dropped.
    pub async fn with_session<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, AppError>> + Send,
    {
        let mut tx = self.pool.begin().await?;
        match f(&mut *tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!("Rollback failed: {rollback_err}");
                }
                Err(err)
            }
        }
    }

    /// Closes every pooled connection. Called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connections closed");
    }
}
