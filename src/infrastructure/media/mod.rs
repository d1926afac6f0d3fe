use std::path::{Path, PathBuf};

use crate::domain::error::{AppError, Result};

/// On-disk facts about a named upload file, resolved relative to the
/// uploads directory.
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub file_name: String,
    pub byte_size: u64,
    pub mime_type: String,
}

impl FileMetadata {
    /// Resolve a file name under the uploads directory. Callers are expected
    /// to check existence first; a missing file is reported as `NotFound`.
    pub fn read(uploads_dir: &Path, file_name: &str) -> Result<Self> {
        let path = uploads_dir.join(file_name);
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let path = path.canonicalize()?;
        let byte_size = std::fs::metadata(&path)?.len();
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        Ok(Self {
            path,
            file_name: file_name.to_string(),
            byte_size,
            mime_type: mime_type_for_extension(&extension).to_string(),
        })
    }
}

/// MIME type inferred from the file extension alone; unknown extensions fall
/// back to application/octet-stream.
pub fn mime_type_for_extension(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}
