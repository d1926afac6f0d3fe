use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use crate::application::use_cases::import_posts::{ImportPostsUseCase, ImportReport};
use crate::domain::error::Result;
use crate::infrastructure::config::Settings;
use crate::infrastructure::db::{init_content_db, SqliteContentStore};

/// Command-line arguments for warta-import
#[derive(Parser, Debug)]
#[command(name = "warta-import")]
#[command(about = "Import blog posts from a CSV file into the Warta content store")]
#[command(version)]
pub struct Args {
    /// Path to the CSV file to import
    pub csv_file: PathBuf,

    /// Path to a TOML settings file (defaults to ./warta.toml when present)
    #[arg(short, long, env = "WARTA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the SQLite database path
    #[arg(long, env = "WARTA_DATABASE_PATH")]
    pub database: Option<PathBuf>,

    /// Override the directory scanned for featured image files
    #[arg(long, env = "WARTA_UPLOADS_DIR")]
    pub uploads_dir: Option<PathBuf>,
}

pub async fn run(args: Args) -> Result<ImportReport> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(database) = args.database {
        settings.database_path = database;
    }
    if let Some(uploads_dir) = args.uploads_dir {
        settings.uploads_dir = uploads_dir;
    }

    info!("Database: {}", settings.database_path.display());
    info!("Uploads directory: {}", settings.uploads_dir.display());

    let pool = init_content_db(&settings.database_path).await?;
    let store = Arc::new(SqliteContentStore::new(pool, settings.media_dir.clone())?);
    let use_case = ImportPostsUseCase::new(store, settings.uploads_dir.clone());

    let report = use_case.import_file(&args.csv_file).await?;

    if report.failures.is_empty() {
        info!("CSV import completed successfully: {} created", report.created);
    } else {
        warn!(
            "CSV import completed with errors: {} created, {} failed",
            report.created,
            report.failures.len()
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Config file keeps the media directory inside the temp dir so tests
    // leave nothing behind in the working directory.
    fn config_file(dir: &tempfile::TempDir) -> PathBuf {
        let config_path = dir.path().join("warta.toml");
        std::fs::write(
            &config_path,
            format!("media_dir = \"{}\"\n", dir.path().join("media").display()),
        )
        .unwrap();
        config_path
    }

    // End-to-end against a real SQLite file: CSV in, posts/categories/assets out.
    #[tokio::test]
    async fn test_run_imports_into_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let uploads_dir = dir.path().join("uploads");
        std::fs::create_dir_all(&uploads_dir).unwrap();
        std::fs::write(uploads_dir.join("cover.png"), b"png bytes").unwrap();

        let csv_path = dir.path().join("posts.csv");
        std::fs::write(
            &csv_path,
            "title,category,featuredImage,publishAt\n\
             First Post,Travel,cover.png,2024-03-05\n\
             Second Post,Travel,,\n",
        )
        .unwrap();

        let db_path = dir.path().join("warta.db");
        let args = Args {
            csv_file: csv_path,
            config: Some(config_file(&dir)),
            database: Some(db_path.clone()),
            uploads_dir: Some(uploads_dir),
        };

        let report = run(args).await.unwrap();
        assert_eq!(report.created, 2);
        assert!(report.failures.is_empty());

        let pool = init_content_db(&db_path).await.unwrap();
        let (posts,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(&pool)
            .await
            .unwrap();
        let (categories,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&pool)
            .await
            .unwrap();
        let (assets,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assets")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(posts, 2);
        assert_eq!(categories, 1);
        assert_eq!(assets, 1);
    }

    #[tokio::test]
    async fn test_run_fails_when_csv_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            csv_file: dir.path().join("nope.csv"),
            config: Some(config_file(&dir)),
            database: Some(dir.path().join("warta.db")),
            uploads_dir: Some(dir.path().to_path_buf()),
        };

        assert!(run(args).await.is_err());
    }
}
