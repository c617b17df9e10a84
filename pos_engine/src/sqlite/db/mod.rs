//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interaction are maintained by simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool,
//! or create an atomic transaction as the need arises and call through to the functions without any other changes.
use std::{str::FromStr, time::Duration};

use log::*;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub mod orders;
pub mod restaurants;
pub mod totals;

pub static MIGRATOR: Migrator = sqlx::migrate!("./src/sqlite/migrations");

/// Opens a connection pool, creating the database file (and its directory) if it does not exist yet.
pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    let filename = options.clone().get_filename();
    if let Some(dir) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !dir.exists() {
            debug!("🗃️ Creating database directory {}", dir.display());
            std::fs::create_dir_all(dir).map_err(SqlxError::Io)?;
        }
    }
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}
