//! `products` procedures.
//!
//! Listing and lookup are public. Create, update and delete require the
//! `admin` role; the check runs before the body is decoded so an unauthorized
//! caller never reaches validation or the store.

use axum::{Json, body::Bytes, extract::State};
use serde::Deserialize;
use tracing::instrument;

use scalebreakers_core::{ProductCategory, ProductId, Role};

use super::extract::{ApiQuery, CategoryParams, IdParams, parse_id, parse_json};
use super::{CreatedResponse, SuccessResponse};
use crate::authz::authorize;
use crate::db::RepositoryError;
use crate::error::{ApiError, Result};
use crate::middleware::Caller;
use crate::models::{CreateProductInput, Product, UpdateProductInput};
use crate::state::AppState;

const NOT_FOUND: &str = "Product not found";

/// `products.delete` input.
#[derive(Debug, Deserialize)]
pub struct DeleteProductInput {
    pub id: String,
}

/// `products.list`, optionally filtered by category.
///
/// An unrecognized category matches nothing.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CategoryParams>,
) -> Result<Json<Vec<Product>>> {
    let category = match params.category() {
        None => None,
        Some(raw) => match raw.parse::<ProductCategory>() {
            Ok(category) => Some(category),
            Err(_) => return Ok(Json(Vec::new())),
        },
    };

    let products = state
        .store()
        .list_products(category)
        .await
        .map_err(|e| ApiError::internal("Failed to load products", e))?;
    Ok(Json(products))
}

/// `products.getById`
#[instrument(skip(state))]
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IdParams>,
) -> Result<Json<Product>> {
    let id: ProductId = parse_id(&params.id, NOT_FOUND)?;
    state
        .store()
        .get_product(id)
        .await
        .map_err(|e| ApiError::internal("Failed to load product", e))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_owned()))
}

/// `products.create` (admin)
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> Result<Json<CreatedResponse<ProductId>>> {
    authorize(caller.user(), Role::Admin).or_forbidden("Only admins can create products")?;

    let product = parse_json::<CreateProductInput>(&body)?.validate()?;
    let id = ProductId::generate();

    state
        .store()
        .create_product(id, &product)
        .await
        .map_err(|e| ApiError::internal("Failed to create product", e))?;

    tracing::info!(product_id = %id, category = %product.category, "Product created");
    Ok(Json(CreatedResponse::new(id)))
}

/// `products.update` (admin): any subset of mutable fields.
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> Result<Json<SuccessResponse>> {
    authorize(caller.user(), Role::Admin).or_forbidden("Only admins can update products")?;

    let input = parse_json::<UpdateProductInput>(&body)?;
    let id: ProductId = parse_id(&input.id, NOT_FOUND)?;
    let changes = input.validate()?;

    state
        .store()
        .update_product(id, &changes)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => ApiError::NotFound(NOT_FOUND.to_owned()),
            other => ApiError::internal("Failed to update product", other),
        })?;

    tracing::info!(product_id = %id, "Product updated");
    Ok(Json(SuccessResponse::OK))
}

/// `products.delete` (admin)
#[instrument(skip_all)]
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> Result<Json<SuccessResponse>> {
    authorize(caller.user(), Role::Admin).or_forbidden("Only admins can delete products")?;

    let input = parse_json::<DeleteProductInput>(&body)?;
    let id: ProductId = parse_id(&input.id, NOT_FOUND)?;

    state
        .store()
        .delete_product(id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => ApiError::NotFound(NOT_FOUND.to_owned()),
            other => ApiError::internal("Failed to delete product", other),
        })?;

    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(SuccessResponse::OK))
}
