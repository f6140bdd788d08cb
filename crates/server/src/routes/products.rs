use axum::{extract::{Path, State}, Json};
use tracing::info;

use service::product::domain::{
    CreateProductRequest, Product, ProductId, ProductListRequest, ProductListResponse, UpdateProductRequest,
};

use crate::{errors::{translate, JsonApiError}, observability, state::AppState};

#[utoipa::path(
    get, path = "/get/product/by/{product_id}", tag = "product",
    params(("product_id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn get_product(State(state): State<AppState>, Path(product_id): Path<ProductId>) -> Result<Json<Product>, JsonApiError> {
    observability::record_request("get_product");
    let product = state.products.get(product_id).await.map_err(translate("get_product"))?;
    Ok(Json(product))
}

#[utoipa::path(
    post, path = "/create/product", tag = "product",
    request_body = crate::openapi::CreateProductRequestDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ProductDoc),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn create_product(State(state): State<AppState>, Json(input): Json<CreateProductRequest>) -> Result<Json<Product>, JsonApiError> {
    observability::record_request("create_product");
    let product = state.products.create(input).await.map_err(translate("create_product"))?;
    Ok(Json(product))
}

#[utoipa::path(
    post, path = "/delete/product/{product_id}", tag = "product",
    params(("product_id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn delete_product(State(state): State<AppState>, Path(product_id): Path<ProductId>) -> Result<Json<bool>, JsonApiError> {
    observability::record_request("delete_product");
    state.products.delete(product_id).await.map_err(translate("delete_product"))?;
    Ok(Json(true))
}

#[utoipa::path(
    post, path = "/update/product", tag = "product",
    request_body = crate::openapi::UpdateProductRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn update_product(State(state): State<AppState>, Json(input): Json<UpdateProductRequest>) -> Result<Json<Product>, JsonApiError> {
    observability::record_request("update_product");
    let product = state.products.update(input).await.map_err(translate("update_product"))?;
    Ok(Json(product))
}

#[utoipa::path(
    post, path = "/product/list", tag = "product",
    request_body = crate::openapi::ProductListRequestDoc,
    responses(
        (status = 200, description = "Page of products", body = crate::openapi::ProductListResponseDoc),
        (status = 400, description = "Invalid Argument"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn list_products(State(state): State<AppState>, Json(input): Json<ProductListRequest>) -> Result<Json<ProductListResponse>, JsonApiError> {
    observability::record_request("list_products");
    let page = state.products.list_by_category(input).await.map_err(translate("list_products"))?;
    info!(count = page.items.len(), total = page.total_elements, page = page.page, "list products");
    Ok(Json(page))
}

#[utoipa::path(
    get, path = "/product/category/list", tag = "product",
    responses(
        (status = 200, description = "Distinct categories, ascending", body = Vec<String>),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, JsonApiError> {
    observability::record_request("list_categories");
    let categories = state.products.categories().await.map_err(translate("list_categories"))?;
    Ok(Json(categories))
}
