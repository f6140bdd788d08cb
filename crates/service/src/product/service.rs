use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{
    CreateProductRequest, Product, ProductDraft, ProductId, ProductListRequest, ProductListResponse,
    UpdateProductRequest,
};
use super::repository::ProductRepository;
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

/// Product business service independent of web framework.
///
/// Stateless apart from the shared store handle; every operation issues at
/// most two sequential store calls and never retries.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Persist a new product; the store assigns its id.
    ///
    /// # Examples
    /// ```
    /// use service::product::{ProductService, repo::memory::InMemoryProductRepository};
    /// use service::product::domain::CreateProductRequest;
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::new()));
    /// let input = CreateProductRequest { category: "books".into(), name: "Dune".into() };
    /// let product = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(product.category, "books");
    /// ```
    #[instrument(skip(self, input), fields(category = %input.category))]
    pub async fn create(&self, input: CreateProductRequest) -> Result<Product, ServiceError> {
        let product = self.repo.save(ProductDraft::new(input.category, input.name)).await?;
        info!(product_id = product.id, "product_created");
        Ok(product)
    }

    /// Fetch by id, raising `NotFound` when absent. Update and delete go
    /// through here so the existence check lives in one place.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("product", id))
    }

    /// Replace category and name of an existing product.
    #[instrument(skip(self, input), fields(product_id = input.id))]
    pub async fn update(&self, input: UpdateProductRequest) -> Result<Product, ServiceError> {
        let current = self.get(input.id).await?;
        let updated = self.repo.save(current.with_fields(input.category, input.name)).await?;
        info!(product_id = updated.id, "product_updated");
        Ok(updated)
    }

    /// Delete an existing product. A second delete of the same id is `NotFound`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        let current = self.get(id).await?;
        self.repo.delete(&current).await?;
        info!(product_id = id, "product_deleted");
        Ok(())
    }

    /// One page of products in `category` (exact, case-sensitive match).
    #[instrument(skip(self, input), fields(category = %input.category, page = ?input.page, size = ?input.size))]
    pub async fn list_by_category(&self, input: ProductListRequest) -> Result<ProductListResponse, ServiceError> {
        let page = PageRequest::new(input.page, input.size)?;
        let result = self.repo.scan_by_category(&input.category, page).await?;
        debug!(returned = result.items.len(), total = result.total_elements, "category_page_loaded");
        Ok(ProductListResponse::from_page(result, page.page()))
    }

    /// Distinct categories, ascending.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, ServiceError> {
        self.repo.distinct_categories().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::repo::memory::InMemoryProductRepository;

    fn service() -> (Arc<InMemoryProductRepository>, ProductService<InMemoryProductRepository>) {
        let repo = Arc::new(InMemoryProductRepository::new());
        (repo.clone(), ProductService::new(repo))
    }

    fn create_req(category: &str, name: &str) -> CreateProductRequest {
        CreateProductRequest { category: category.into(), name: name.into() }
    }

    fn list_req(category: &str, page: i64, size: i64) -> ProductListRequest {
        ProductListRequest { category: category.into(), page: Some(page), size: Some(size) }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_values() {
        let (_, svc) = service();
        let created = svc.create(create_req("c", "n")).await.unwrap();
        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched, Product { id: created.id, category: "c".into(), name: "n".into() });
    }

    #[tokio::test]
    async fn missing_ids_are_not_found_and_nothing_changes() {
        let (repo, svc) = service();
        let kept = svc.create(create_req("c", "n")).await.unwrap();
        let missing = kept.id + 100;

        assert!(matches!(svc.get(missing).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(missing).await, Err(ServiceError::NotFound(_))));
        let upd = UpdateProductRequest { id: missing, category: "x".into(), name: "y".into() };
        assert!(matches!(svc.update(upd).await, Err(ServiceError::NotFound(_))));

        assert_eq!(repo.len().await, 1);
        assert_eq!(svc.get(kept.id).await.unwrap(), kept);
    }

    #[tokio::test]
    async fn update_replaces_both_fields() {
        let (_, svc) = service();
        let p = svc.create(create_req("c1", "n1")).await.unwrap();
        let upd = UpdateProductRequest { id: p.id, category: "c2".into(), name: "n2".into() };
        let returned = svc.update(upd).await.unwrap();
        let expected = Product { id: p.id, category: "c2".into(), name: "n2".into() };
        assert_eq!(returned, expected);
        assert_eq!(svc.get(p.id).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn update_writes_empty_values_as_given() {
        let (_, svc) = service();
        let p = svc.create(create_req("c1", "n1")).await.unwrap();
        let upd = UpdateProductRequest { id: p.id, category: "c1".into(), name: String::new() };
        svc.update(upd).await.unwrap();
        assert_eq!(svc.get(p.id).await.unwrap().name, "");
    }

    #[tokio::test]
    async fn delete_twice_is_not_found_the_second_time() {
        let (_, svc) = service();
        let p = svc.create(create_req("c", "n")).await.unwrap();
        svc.delete(p.id).await.unwrap();
        assert!(matches!(svc.get(p.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(p.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_rejects_non_positive_size_as_invalid_argument() {
        let (_, svc) = service();
        svc.create(create_req("c", "n")).await.unwrap();
        for size in [0, -1] {
            let err = svc.list_by_category(list_req("c", 0, size)).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidArgument { field: "size", .. }), "size {}: {:?}", size, err);
        }
        let missing = ProductListRequest { category: "c".into(), page: Some(0), size: None };
        assert!(matches!(
            svc.list_by_category(missing).await,
            Err(ServiceError::InvalidArgument { field: "size", .. })
        ));
    }

    #[tokio::test]
    async fn list_pages_through_one_category() {
        let (_, svc) = service();
        for i in 0..25 {
            svc.create(create_req("c", &format!("c-{}", i))).await.unwrap();
            if i % 5 == 0 {
                svc.create(create_req("other", &format!("o-{}", i))).await.unwrap();
            }
        }

        let first = svc.list_by_category(list_req("c", 0, 10)).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_elements, 25);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.page, 0);
        assert!(first.items.iter().all(|p| p.category == "c"));
        assert!(first.items.windows(2).all(|w| w[0].category <= w[1].category));

        let last = svc.list_by_category(list_req("c", 2, 10)).await.unwrap();
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.page, 2);

        let beyond = svc.list_by_category(list_req("c", 7, 10)).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_elements, 25);
        assert_eq!(beyond.page, 7);
    }

    #[tokio::test]
    async fn list_category_match_is_exact() {
        let (_, svc) = service();
        svc.create(create_req("Books", "a")).await.unwrap();
        svc.create(create_req("books", "b")).await.unwrap();
        svc.create(create_req("books ", "c")).await.unwrap();
        let page = svc.list_by_category(list_req("books", 0, 10)).await.unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.items[0].name, "b");
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let (_, svc) = service();
        for (c, n) in [("b", "1"), ("a", "2"), ("a", "3")] {
            svc.create(create_req(c, n)).await.unwrap();
        }
        assert_eq!(svc.categories().await.unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn store_failures_propagate_unclassified() {
        let (repo, svc) = service();
        let p = svc.create(create_req("c", "n")).await.unwrap();
        repo.set_offline(true);
        assert!(matches!(svc.get(p.id).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.create(create_req("c", "n")).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.categories().await, Err(ServiceError::Db(_))));
        // paging input is still checked before the store is touched
        assert!(matches!(
            svc.list_by_category(list_req("c", 0, 0)).await,
            Err(ServiceError::InvalidArgument { .. })
        ));
    }

    #[tokio::test]
    async fn works_behind_a_trait_object() {
        let repo: Arc<dyn ProductRepository> = Arc::new(InMemoryProductRepository::new());
        let svc = ProductService::new(repo);
        let p = svc.create(create_req("c", "n")).await.unwrap();
        assert_eq!(svc.get(p.id).await.unwrap().name, "n");
    }
}
