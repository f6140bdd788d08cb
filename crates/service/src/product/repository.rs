use async_trait::async_trait;

use super::domain::{Product, ProductDraft, ProductId, ProductPage};
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

/// Store abstraction for product persistence.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get(&self, id: ProductId) -> Result<Option<Product>, ServiceError>;

    /// Insert when `draft.id` is unset, otherwise update that row.
    async fn save(&self, draft: ProductDraft) -> Result<Product, ServiceError>;

    async fn delete(&self, product: &Product) -> Result<(), ServiceError>;

    /// Exact-match category filter, ordered by category ascending.
    async fn scan_by_category(&self, category: &str, page: PageRequest) -> Result<ProductPage, ServiceError>;

    /// Distinct categories in ascending order.
    async fn distinct_categories(&self) -> Result<Vec<String>, ServiceError>;
}
