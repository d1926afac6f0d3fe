use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub publish_at: DateTime<Utc>,
    pub category_id: Option<i64>,
    pub featured_image_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Payload for a single post creation, built from one CSV row.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub publish_at: DateTime<Utc>,
    pub category_id: Option<i64>,
    pub featured_image_id: Option<i64>,
}

/// A binary asset handed to the store's upload operation.
#[derive(Debug, Clone)]
pub struct AssetUpload {
    pub file_name: String,
    pub mime_type: String,
    pub byte_size: u64,
    pub caption: String,
    pub alt_text: String,
    pub bytes: Vec<u8>,
}

/// Handle to an asset the store has accepted and now owns.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoredAsset {
    pub id: i64,
    pub file_name: String,
    pub file_path: String,
    pub mime_type: String,
    pub byte_size: i64,
    pub sha256: String,
    pub caption: String,
    pub alt_text: String,
    pub created_at: DateTime<Utc>,
}
