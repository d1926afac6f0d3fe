use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{error, info, warn};

use crate::domain::csv::CsvRow;
use crate::domain::error::Result;
use crate::domain::post::{Post, PostInput};
use crate::domain::slug::generate_slug;
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::db::ContentStore;

use super::categories::CategoryResolver;
use super::media_upload::AssetUploader;

/// One row that failed to transform or persist.
#[derive(Debug, Clone)]
pub struct RowFailure {
    pub row_index: usize,
    pub title: String,
    pub error: String,
}

/// Outcome of a whole import run. Failures are accumulated per row; the run
/// itself only fails when the CSV cannot be parsed at all.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub created: usize,
    pub failures: Vec<RowFailure>,
}

/// Sequential CSV import: parse every row up front, then transform and
/// persist one row at a time in file order. A bad row is reported and
/// skipped, never fatal.
pub struct ImportPostsUseCase {
    store: Arc<dyn ContentStore>,
    categories: CategoryResolver,
    uploader: AssetUploader,
    parser: CsvParser,
}

impl ImportPostsUseCase {
    pub fn new(store: Arc<dyn ContentStore>, uploads_dir: PathBuf) -> Self {
        Self {
            categories: CategoryResolver::new(store.clone()),
            uploader: AssetUploader::new(store.clone(), uploads_dir),
            store,
            parser: CsvParser::new(),
        }
    }

    pub async fn import_file(&self, csv_path: &Path) -> Result<ImportReport> {
        let rows = self.parser.parse_file(csv_path)?;
        info!("Parsed {} rows from {}", rows.len(), csv_path.display());

        let mut report = ImportReport::default();

        for row in &rows {
            let title = row.get("title").unwrap_or("").trim().to_string();
            match self.import_row(row).await {
                Ok(post) => {
                    info!("Created blog post: {}", post.title);
                    report.created += 1;
                }
                Err(err) => {
                    error!("Error creating blog post {}: {}", title, err);
                    report.failures.push(RowFailure {
                        row_index: row.index,
                        title,
                        error: err.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    async fn import_row(&self, row: &CsvRow) -> Result<Post> {
        let input = self.build_post(row).await?;
        self.store.create_post(&input).await
    }

    /// Map one raw row to a post payload. Plain text fields are copied
    /// verbatim with empty defaults; slug and publish date follow the
    /// defaulting rules; category and featured image resolve through the
    /// store only when the row names them.
    async fn build_post(&self, row: &CsvRow) -> Result<PostInput> {
        let title = row.get("title").unwrap_or("").trim().to_string();

        let slug = match row.get_non_empty("slug") {
            Some(slug) => slug.to_string(),
            None => generate_slug(&title),
        };

        let category_id = match row.get_non_empty("category") {
            Some(name) => Some(self.categories.resolve(name).await?),
            None => None,
        };

        let featured_image_id = match row.get_non_empty("featuredImage") {
            Some(file_name) => self
                .uploader
                .upload_if_exists(file_name)
                .await?
                .map(|asset| asset.id),
            None => None,
        };

        Ok(PostInput {
            title,
            slug,
            excerpt: row.get("excerpt").unwrap_or("").to_string(),
            content: row.get("content").unwrap_or("").to_string(),
            publish_at: parse_publish_at(row.get_non_empty("publishAt")),
            category_id,
            featured_image_id,
        })
    }
}

/// Parse the publishAt column; absent or unparseable values default to now.
/// Malformed dates are a logged default, not a row failure.
fn parse_publish_at(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return Utc::now();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.and_utc();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return dt.and_utc();
        }
    }

    warn!("Unparseable publishAt value {:?}, defaulting to now", raw);
    Utc::now()
}
