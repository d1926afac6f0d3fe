use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::domain::error::Result;
use crate::domain::post::{AssetUpload, StoredAsset};
use crate::infrastructure::db::ContentStore;
use crate::infrastructure::media::FileMetadata;

/// Uploads a named image from the uploads directory to the store. A file
/// that is not on disk is "no asset", not an error; a submission the store
/// rejects is propagated as `UploadError`.
pub struct AssetUploader {
    store: Arc<dyn ContentStore>,
    uploads_dir: PathBuf,
}

impl AssetUploader {
    pub fn new(store: Arc<dyn ContentStore>, uploads_dir: PathBuf) -> Self {
        Self { store, uploads_dir }
    }

    pub async fn upload_if_exists(&self, file_name: &str) -> Result<Option<StoredAsset>> {
        if !self.uploads_dir.join(file_name).exists() {
            info!(
                "Featured image {} not found under {}, skipping",
                file_name,
                self.uploads_dir.display()
            );
            return Ok(None);
        }

        let metadata = FileMetadata::read(&self.uploads_dir, file_name)?;
        let bytes = std::fs::read(&metadata.path)?;

        let upload = AssetUpload {
            file_name: metadata.file_name,
            mime_type: metadata.mime_type,
            byte_size: metadata.byte_size,
            caption: file_name.to_string(),
            alt_text: format!("An image uploaded to Warta called {}", file_name),
            bytes,
        };

        let asset = self.store.upload_asset(&upload).await?;
        Ok(Some(asset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::domain::post::{Category, Post, PostInput};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingStore {
        uploads: Mutex<Vec<AssetUpload>>,
        reject: bool,
    }

    #[async_trait]
    impl ContentStore for CapturingStore {
        async fn find_category_by_name(&self, _name: &str) -> Result<Option<Category>> {
            Ok(None)
        }

        async fn create_category(&self, _name: &str, _slug: &str) -> Result<Category> {
            Err(AppError::Internal("not used in this test".to_string()))
        }

        async fn create_post(&self, _input: &PostInput) -> Result<Post> {
            Err(AppError::Internal("not used in this test".to_string()))
        }

        async fn upload_asset(&self, upload: &AssetUpload) -> Result<StoredAsset> {
            if self.reject {
                return Err(AppError::UploadError("unsupported type".to_string()));
            }
            self.uploads.lock().unwrap().push(upload.clone());
            Ok(StoredAsset {
                id: 7,
                file_name: upload.file_name.clone(),
                file_path: format!("media/{}", upload.file_name),
                mime_type: upload.mime_type.clone(),
                byte_size: upload.byte_size as i64,
                sha256: String::new(),
                caption: upload.caption.clone(),
                alt_text: upload.alt_text.clone(),
                created_at: chrono::Utc::now(),
            })
        }
    }

    #[tokio::test]
    async fn test_existing_file_is_uploaded_with_generated_text() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cover.png"), b"png bytes").unwrap();

        let store = Arc::new(CapturingStore::default());
        let uploader = AssetUploader::new(store.clone(), dir.path().to_path_buf());

        let asset = uploader
            .upload_if_exists("cover.png")
            .await
            .unwrap()
            .expect("asset should be uploaded");
        assert_eq!(asset.id, 7);

        let uploads = store.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].mime_type, "image/png");
        assert_eq!(uploads[0].caption, "cover.png");
        assert_eq!(
            uploads[0].alt_text,
            "An image uploaded to Warta called cover.png"
        );
        assert_eq!(uploads[0].bytes, b"png bytes");
    }

    #[tokio::test]
    async fn test_missing_file_is_no_asset_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(CapturingStore::default());
        let uploader = AssetUploader::new(store.clone(), dir.path().to_path_buf());

        let result = uploader.upload_if_exists("missing.png").await.unwrap();
        assert!(result.is_none());
        assert!(store.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_rejection_propagates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("huge.bmp"), b"data").unwrap();

        let store = Arc::new(CapturingStore {
            reject: true,
            ..Default::default()
        });
        let uploader = AssetUploader::new(store, dir.path().to_path_buf());

        let err = uploader.upload_if_exists("huge.bmp").await.unwrap_err();
        assert!(matches!(err, AppError::UploadError(_)));
    }
}
