use serde::{Deserialize, Serialize};

/// Store-assigned product identifier.
pub type ProductId = i64;

/// A persisted product. Values are never mutated in place; an update builds
/// a [`ProductDraft`] with the replaced fields and saves that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub category: String,
    pub name: String,
}

impl Product {
    /// Draft that overwrites both mutable fields of this product.
    pub fn with_fields(&self, category: String, name: String) -> ProductDraft {
        ProductDraft { id: Some(self.id), category, name }
    }
}

/// What the store saves: no id means insert, an id means update that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub id: Option<ProductId>,
    pub category: String,
    pub name: String,
}

impl ProductDraft {
    pub fn new(category: String, name: String) -> Self {
        Self { id: None, category, name }
    }
}

/// Create input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub category: String,
    pub name: String,
}

/// Update input; category and name replace the stored values wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub id: ProductId,
    pub category: String,
    pub name: String,
}

/// Category listing input. `page` is zero-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListRequest {
    pub category: String,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// One page of a category scan as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total_elements: u64,
    pub total_pages: u64,
}

/// Category listing result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    #[serde(rename = "products")]
    pub items: Vec<Product>,
    pub total_pages: u64,
    pub total_elements: u64,
    pub page: u64,
}

impl ProductListResponse {
    pub fn from_page(page: ProductPage, index: u64) -> Self {
        Self {
            items: page.items,
            total_pages: page.total_pages,
            total_elements: page.total_elements,
            page: index,
        }
    }
}

impl From<models::product::Model> for Product {
    fn from(m: models::product::Model) -> Self {
        Self { id: m.id, category: m.category, name: m.name }
    }
}
