use std::path::PathBuf;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::domain::error::{AppError, Result};
use crate::domain::post::{AssetUpload, Category, Post, PostInput, StoredAsset};

use super::entities::{AssetEntity, CategoryEntity, PostEntity};

/// Create/query surface of the content backend. Everything above the
/// infrastructure layer talks to this trait, never to the schema.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>>;

    async fn create_category(&self, name: &str, slug: &str) -> Result<Category>;

    async fn create_post(&self, input: &PostInput) -> Result<Post>;

    async fn upload_asset(&self, upload: &AssetUpload) -> Result<StoredAsset>;
}

/// SQLite-backed content store. Accepted asset bytes are copied into the
/// managed media directory so rows never point back at the uploads inbox.
pub struct SqliteContentStore {
    pool: SqlitePool,
    media_dir: PathBuf,
}

impl SqliteContentStore {
    pub fn new(pool: SqlitePool, media_dir: PathBuf) -> Result<Self> {
        if !media_dir.exists() {
            std::fs::create_dir_all(&media_dir)?;
        }
        Ok(Self { pool, media_dir })
    }
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, CategoryEntity>(
            "SELECT id, name, slug, created_at FROM categories WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to look up category: {}", e)))?;

        Ok(category.map(|c| c.into()))
    }

    async fn create_category(&self, name: &str, slug: &str) -> Result<Category> {
        let result = sqlx::query_as::<_, CategoryEntity>(
            "INSERT INTO categories (name, slug) VALUES (?, ?) RETURNING *",
        )
        .bind(name)
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create category: {}", e)))?;

        Ok(result.into())
    }

    async fn create_post(&self, input: &PostInput) -> Result<Post> {
        let result = sqlx::query_as::<_, PostEntity>(
            "INSERT INTO posts (title, slug, excerpt, content, publish_at, category_id, featured_image_id)\n             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(input.publish_at.to_rfc3339())
        .bind(input.category_id)
        .bind(input.featured_image_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create post: {}", e)))?;

        Ok(result.into())
    }

    async fn upload_asset(&self, upload: &AssetUpload) -> Result<StoredAsset> {
        let sha256 = hex::encode(Sha256::digest(&upload.bytes));

        // UUID prefix keeps repeated imports of the same file name from
        // clobbering each other.
        let stored_name = format!("{}-{}", Uuid::new_v4(), upload.file_name);
        let stored_path = self.media_dir.join(&stored_name);
        std::fs::write(&stored_path, &upload.bytes)
            .map_err(|e| AppError::UploadError(format!("Failed to store media file: {}", e)))?;

        let result = sqlx::query_as::<_, AssetEntity>(
            "INSERT INTO assets (file_name, file_path, mime_type, byte_size, sha256, caption, alt_text)\n             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&upload.file_name)
        .bind(stored_path.to_string_lossy().as_ref())
        .bind(&upload.mime_type)
        .bind(upload.byte_size as i64)
        .bind(&sha256)
        .bind(&upload.caption)
        .bind(&upload.alt_text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::UploadError(format!("Failed to record asset: {}", e)))?;

        Ok(result.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::connection::apply_schema;
    use chrono::Utc;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        // A single connection keeps every query on the same in-memory DB.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        apply_schema(&pool).await.unwrap();
        pool
    }

    async fn store(dir: &tempfile::TempDir) -> SqliteContentStore {
        SqliteContentStore::new(memory_pool().await, dir.path().join("media")).unwrap()
    }

    fn post_input() -> PostInput {
        PostInput {
            title: "First Post".to_string(),
            slug: "first-post".to_string(),
            excerpt: String::new(),
            content: "Hello".to_string(),
            publish_at: Utc::now(),
            category_id: None,
            featured_image_id: None,
        }
    }

    #[tokio::test]
    async fn test_category_lookup_and_create() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        assert!(store
            .find_category_by_name("Travel")
            .await
            .unwrap()
            .is_none());

        let created = store.create_category("Travel", "travel").await.unwrap();
        assert_eq!(created.name, "Travel");
        assert_eq!(created.slug, "travel");

        let found = store
            .find_category_by_name("Travel")
            .await
            .unwrap()
            .expect("category should exist");
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_category_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        store.create_category("News", "news").await.unwrap();
        let err = store.create_category("News", "news").await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_create_post_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let category = store.create_category("Travel", "travel").await.unwrap();
        let mut input = post_input();
        input.category_id = Some(category.id);
        input.publish_at = "2024-03-05T08:00:00Z".parse().unwrap();

        let post = store.create_post(&input).await.unwrap();
        assert_eq!(post.title, "First Post");
        assert_eq!(post.category_id, Some(category.id));
        assert_eq!(post.featured_image_id, None);
        assert_eq!(post.publish_at, input.publish_at);
    }

    #[tokio::test]
    async fn test_upload_asset_copies_bytes_and_records_row() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let upload = AssetUpload {
            file_name: "cover.png".to_string(),
            mime_type: "image/png".to_string(),
            byte_size: 4,
            caption: "cover.png".to_string(),
            alt_text: "An image uploaded to Warta called cover.png".to_string(),
            bytes: b"\x89PNG".to_vec(),
        };

        let asset = store.upload_asset(&upload).await.unwrap();
        assert_eq!(asset.file_name, "cover.png");
        assert_eq!(asset.mime_type, "image/png");
        assert_eq!(asset.sha256, hex::encode(Sha256::digest(b"\x89PNG")));

        let stored = std::fs::read(&asset.file_path).unwrap();
        assert_eq!(stored, b"\x89PNG");
    }
}
