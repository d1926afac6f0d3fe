pub mod use_cases;

pub use use_cases::categories::CategoryResolver;
pub use use_cases::import_posts::ImportPostsUseCase;
pub use use_cases::media_upload::AssetUploader;
