use std::sync::Arc;

use tracing::info;

use crate::domain::error::Result;
use crate::domain::slug::generate_slug;
use crate::infrastructure::db::ContentStore;

/// Resolves a category name to its id, creating the category on first sight.
///
/// Lookup and create are two separate store calls, so two imports racing on
/// the same unseen name can both create; this tool is single-writer by design
/// and the store's unique name constraint turns that race into an error
/// instead of a silent duplicate.
pub struct CategoryResolver {
    store: Arc<dyn ContentStore>,
}

impl CategoryResolver {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, name: &str) -> Result<i64> {
        if let Some(existing) = self.store.find_category_by_name(name).await? {
            return Ok(existing.id);
        }

        let category = self
            .store
            .create_category(name, &generate_slug(name))
            .await?;
        info!("Created category: {} ({})", category.name, category.slug);
        Ok(category.id)
    }
}
