use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::product::domain::{Product, ProductDraft, ProductId, ProductPage};
use crate::product::repository::ProductRepository;

#[derive(Default)]
struct State {
    last_id: ProductId,
    rows: BTreeMap<ProductId, Product>,
}

/// In-memory store for tests and the server's `memory` store mode.
#[derive(Default)]
pub struct InMemoryProductRepository {
    state: RwLock<State>,
    offline: AtomicBool,
}

impl InMemoryProductRepository {
    pub fn new() -> Self { Self::default() }

    /// While offline every call fails with `ServiceError::Db`, like a lost connection.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_online(&self) -> Result<(), ServiceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ServiceError::Db("connection refused: in-memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        self.check_online()?;
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        self.check_online()?;
        let mut state = self.state.write().await;
        let id = match draft.id {
            Some(id) if state.rows.contains_key(&id) => id,
            Some(id) => return Err(ServiceError::Db(format!("no row with product_id {} to update", id))),
            None => {
                state.last_id += 1;
                state.last_id
            }
        };
        let product = Product { id, category: draft.category, name: draft.name };
        state.rows.insert(id, product.clone());
        info!(product_id = id, "saved product");
        Ok(product)
    }

    async fn delete(&self, product: &Product) -> Result<(), ServiceError> {
        self.check_online()?;
        self.state.write().await.rows.remove(&product.id);
        Ok(())
    }

    async fn scan_by_category(&self, category: &str, page: PageRequest) -> Result<ProductPage, ServiceError> {
        self.check_online()?;
        let state = self.state.read().await;
        // BTreeMap iterates in id order, which is the tie-break within one category.
        let matching: Vec<&Product> = state.rows.values().filter(|p| p.category == category).collect();
        let total_elements = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size() as usize)
            .cloned()
            .collect();
        Ok(ProductPage { items, total_elements, total_pages: page.total_pages(total_elements) })
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, ServiceError> {
        self.check_online()?;
        let state = self.state.read().await;
        let set: BTreeSet<&String> = state.rows.values().map(|p| &p.category).collect();
        Ok(set.into_iter().cloned().collect())
    }
}
