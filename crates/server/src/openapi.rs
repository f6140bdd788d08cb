use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema, serde::Serialize)]
pub struct ProductDoc { pub id: i64, pub category: String, pub name: String }

#[derive(ToSchema)]
pub struct CreateProductRequestDoc { pub category: String, pub name: String }

#[derive(ToSchema)]
pub struct UpdateProductRequestDoc { pub id: i64, pub category: String, pub name: String }

/// `page` is zero-based; `size` must be in 1..=1000.
#[derive(ToSchema)]
pub struct ProductListRequestDoc {
    pub category: String,
    pub page: Option<i64>,
    pub size: i64,
}

#[derive(ToSchema, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponseDoc {
    pub products: Vec<ProductDoc>,
    pub total_pages: u64,
    pub total_elements: u64,
    pub page: u64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::get_product,
        crate::routes::products::create_product,
        crate::routes::products::delete_product,
        crate::routes::products::update_product,
        crate::routes::products::list_products,
        crate::routes::products::list_categories,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            CreateProductRequestDoc,
            UpdateProductRequestDoc,
            ProductListRequestDoc,
            ProductListResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "product", description = "Product catalog operations")
    )
)]
pub struct ApiDoc;
