//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use axum_helpers::{
    AppError, JsonBodyRejection, LenientJson,
    errors::responses::{
        BadRequestResponse, ConflictResponse, NotFoundResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ErrorPolicy, Operation, ProductError};
use crate::models::{CreateProduct, MessageResponse, Product, ProductId, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            ConflictResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Router state: the service plus the status mapping for its errors
pub struct ProductsState<R: ProductRepository> {
    service: ProductService<R>,
    policy: ErrorPolicy,
}

impl<R: ProductRepository> ProductsState<R> {
    fn reject(&self, operation: Operation, err: impl Into<ProductError>) -> AppError {
        self.policy.to_app_error(operation, err.into())
    }
}

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    policy: ErrorPolicy,
) -> Router {
    let state = Arc::new(ProductsState { service, policy });

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

fn parse_id<R: ProductRepository>(
    state: &ProductsState<R>,
    operation: Operation,
    raw: &str,
) -> Result<ProductId, AppError> {
    raw.parse().map_err(|e| state.reject(operation, e))
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products in store order", body = Vec<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state
        .service
        .list_products()
        .await
        .map_err(|e| state.reject(Operation::List, e))?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    payload: Result<LenientJson<CreateProduct>, JsonBodyRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let LenientJson(input) = payload.map_err(|e| state.reject(Operation::Create, e))?;

    let product = state
        .service
        .create_product(input)
        .await
        .map_err(|e| state.reject(Operation::Create, e))?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let id = parse_id(&state, Operation::Get, &id)?;

    let product = state
        .service
        .get_product(id)
        .await
        .map_err(|e| state.reject(Operation::Get, e))?;
    Ok(Json(product))
}

/// Update the supplied fields of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24 hex characters)")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    Path(id): Path<String>,
    payload: Result<LenientJson<UpdateProduct>, JsonBodyRejection>,
) -> Result<Json<Product>, AppError> {
    let id = parse_id(&state, Operation::Update, &id)?;
    let LenientJson(input) = payload.map_err(|e| state.reject(Operation::Update, e))?;

    let product = state
        .service
        .update_product(id, input)
        .await
        .map_err(|e| state.reject(Operation::Update, e))?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&state, Operation::Delete, &id)?;

    state
        .service
        .delete_product(id)
        .await
        .map_err(|e| state.reject(Operation::Delete, e))?;

    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
