use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{observability, openapi::ApiDoc, state::AppState};

pub mod products;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: product operations, health, metrics and docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // Paths keep the layout existing clients already call.
    let product_routes = Router::new()
        .route("/get/product/by/:product_id", get(products::get_product))
        .route("/create/product", post(products::create_product))
        .route("/delete/product/:product_id", post(products::delete_product))
        .route("/update/product", post(products::update_product))
        .route("/product/list", post(products::list_products))
        .route("/product/category/list", get(products::list_categories));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(product_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
