//! # SQLite Database methods
//!
//! This module contains the "low-level" SQLite database interactions.
//!
//! They are plain functions that accept a `&mut SqliteConnection`, so callers can pass a pooled connection or an open
//! transaction without any other changes.
use std::str::FromStr;

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub mod campaigns;
pub mod donations;

/// Opens a connection pool, creating the database file if it does not exist yet. Foreign keys are enforced.
pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true).foreign_keys(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    info!("🗃️ Connected to {url}");
    Ok(pool)
}
