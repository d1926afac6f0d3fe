pub mod categories;
pub mod import_posts;
pub mod media_upload;
