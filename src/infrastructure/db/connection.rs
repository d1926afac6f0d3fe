use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

use crate::domain::error::{AppError, Result};

const CONTENT_SCHEMA: &str = include_str!("../../resources/schema.sql");

const CONTENT_SCHEMA_VERSION: i32 = 1;

/// Open (creating if missing) the content database and bring its schema up
/// to date. Schema statements are additive, so re-applying them on every
/// startup is safe.
pub async fn init_content_db(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = connect_pool(db_path).await?;

    // If the DB is newer than this build expects, fail fast rather than
    // writing through an unknown schema.
    let current_version = read_user_version(&pool).await?;
    if current_version > CONTENT_SCHEMA_VERSION {
        return Err(AppError::DatabaseError(format!(
            "Content database schema too new: db user_version={} > app supported_version={}",
            current_version, CONTENT_SCHEMA_VERSION
        )));
    }

    apply_schema(&pool).await?;
    set_user_version(&pool, CONTENT_SCHEMA_VERSION).await?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Database health check failed: {}", e)))?;

    Ok(pool)
}

pub(crate) async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    for stmt in split_sql_statements(CONTENT_SCHEMA) {
        sqlx::query(&stmt).execute(pool).await.map_err(|e| {
            AppError::DatabaseError(format!("Failed to apply schema statement: {}", e))
        })?;
    }
    Ok(())
}

/// Split schema SQL on semicolons. `--` line comments are stripped first so
/// a semicolon inside a comment does not cut a statement in half.
fn split_sql_statements(sql: &str) -> Vec<String> {
    let without_comments = sql
        .lines()
        .map(|line| match line.find("--") {
            Some(pos) => &line[..pos],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

async fn connect_pool(db_path: &Path) -> Result<SqlitePool> {
    let db_url = db_path_to_url(db_path)?;
    let options = SqliteConnectOptions::from_str(&db_url)
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse database URL: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(4)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect to database: {}", e)))
}

fn db_path_to_url(db_path: &Path) -> Result<String> {
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| AppError::DatabaseError("Database path is not valid UTF-8".to_string()))?;
    Ok(format!("sqlite://{}", db_path_str.replace('\\', "/")))
}

async fn read_user_version(pool: &SqlitePool) -> Result<i32> {
    sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to read PRAGMA user_version: {}", e)))
}

async fn set_user_version(pool: &SqlitePool, version: i32) -> Result<()> {
    let sql = format!("PRAGMA user_version = {}", version);
    sqlx::query(&sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to set PRAGMA user_version: {}", e)))?;
    Ok(())
}
