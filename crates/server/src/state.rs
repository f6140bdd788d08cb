use std::sync::Arc;

use service::product::{repository::ProductRepository, ProductService};

/// Shared handler state. Cloning is cheap; the service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService<dyn ProductRepository>>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { products: Arc::new(ProductService::new(repo)) }
    }
}
