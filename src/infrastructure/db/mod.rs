pub mod connection;
mod entities;
mod store;

pub use connection::init_content_db;
pub use store::{ContentStore, SqliteContentStore};
