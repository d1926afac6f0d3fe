use crate::domain::post::{Category, Post, StoredAsset};

fn parse_timestamp(raw: &str) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or_else(|_| chrono::Utc::now())
}

#[derive(sqlx::FromRow)]
pub(super) struct CategoryEntity {
    id: i64,
    name: String,
    slug: String,
    created_at: String,
}

impl From<CategoryEntity> for Category {
    fn from(entity: CategoryEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            created_at: parse_timestamp(&entity.created_at),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct PostEntity {
    id: i64,
    title: String,
    slug: String,
    excerpt: String,
    content: String,
    publish_at: String,
    category_id: Option<i64>,
    featured_image_id: Option<i64>,
    created_at: String,
}

impl From<PostEntity> for Post {
    fn from(entity: PostEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            slug: entity.slug,
            excerpt: entity.excerpt,
            content: entity.content,
            publish_at: parse_timestamp(&entity.publish_at),
            category_id: entity.category_id,
            featured_image_id: entity.featured_image_id,
            created_at: parse_timestamp(&entity.created_at),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct AssetEntity {
    id: i64,
    file_name: String,
    file_path: String,
    mime_type: String,
    byte_size: i64,
    sha256: String,
    caption: String,
    alt_text: String,
    created_at: String,
}

impl From<AssetEntity> for StoredAsset {
    fn from(entity: AssetEntity) -> Self {
        Self {
            id: entity.id,
            file_name: entity.file_name,
            file_path: entity.file_path,
            mime_type: entity.mime_type,
            byte_size: entity.byte_size,
            sha256: entity.sha256,
            caption: entity.caption,
            alt_text: entity.alt_text,
            created_at: parse_timestamp(&entity.created_at),
        }
    }
}
