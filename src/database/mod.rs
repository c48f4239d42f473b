//! Persistent key-value storage.
//!
//! The app itself persists almost nothing: the OS calendar store is the
//! system of record for calendars and events. What remains is a string
//! key-value map holding the first-launch flag and the per-event reminder
//! notification ids.

use anyhow::{Context, Result};
use log::info;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Row, Sqlite};

/// Key for the flag distinguishing first launch from subsequent launches.
pub const HAS_LAUNCHED_KEY: &str = "HAS_LAUNCHED";

#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the store at the platform data directory.
    pub async fn new() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .context("No platform data directory available")?
            .join("dayview");
        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        let db_path = format!(
            "sqlite:{}?mode=rwc",
            data_dir.join("dayview.db").display()
        );
        Self::open(&db_path).await
    }

    /// Open a store at an explicit sqlite URL.
    pub async fn open(db_path: &str) -> Result<Self> {
        let db_exists = Sqlite::database_exists(db_path)
            .await
            .context("Failed to check if database exists")?;
        if !db_exists {
            info!("Creating key-value store");
            Sqlite::create_database(db_path)
                .await
                .context("Failed to create database")?;
        }

        let pool = SqlitePool::connect(db_path)
            .await
            .context("Failed to connect to database")?;

        run_schema(&pool).await.context("Failed to run schema")?;

        Ok(Database { pool })
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO kv (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, \
             updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // --- First-launch flag ---

    pub async fn has_launched(&self) -> Result<bool> {
        Ok(self.get(HAS_LAUNCHED_KEY).await?.is_some())
    }

    pub async fn mark_launched(&self) -> Result<()> {
        self.set(HAS_LAUNCHED_KEY, "1").await
    }
}

async fn run_schema(pool: &SqlitePool) -> Result<()> {
    let schema = include_str!("schema.sql");

    let mut current_statement = String::new();
    for line in schema.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") || trimmed.is_empty() {
            continue;
        }

        current_statement.push_str(line);
        current_statement.push('\n');

        if trimmed.ends_with(';') {
            sqlx::query(&current_statement).execute(pool).await?;
            current_statement.clear();
        }
    }

    Ok(())
}
