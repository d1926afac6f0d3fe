pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use application::use_cases::import_posts::{ImportPostsUseCase, ImportReport, RowFailure};
pub use domain::error::{AppError, Result};
pub use infrastructure::db::{ContentStore, SqliteContentStore};
