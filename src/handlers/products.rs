use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::product::{Product, ProductInput};
use crate::errors::AppError;
use crate::security::Identity;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub image_url: Option<String>,
    pub category: String,
    pub available: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price.to_string(),
            image_url: product.image_url,
            category: product.category,
            available: product.available,
        }
    }
}

impl ProductRequest {
    fn into_input(self) -> Result<ProductInput, AppError> {
        let price = BigDecimal::from_str(&self.price)
            .map_err(|e| AppError::BadRequest(format!("Invalid price '{}': {}", self.price, e)))?;
        Ok(ProductInput {
            name: self.name,
            description: self.description,
            price,
            image_url: self.image_url,
            category: self.category.unwrap_or_else(|| "General".to_string()),
            available: self.available.unwrap_or(true),
        })
    }
}

fn to_responses(products: Vec<Product>) -> Vec<ProductResponse> {
    products.into_iter().map(Into::into).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    responses((status = 200, description = "Available products", body = [ProductResponse])),
    tag = "products"
)]
pub async fn list_available(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products = web::block(move || state.catalog.list_available()).await??;
    Ok(HttpResponse::Ok().json(to_responses(products)))
}

/// GET /api/products/all
#[utoipa::path(
    get,
    path = "/api/products/all",
    responses((status = 200, description = "Every product, including unavailable ones", body = [ProductResponse])),
    tag = "products"
)]
pub async fn list_all(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let caller = identity.0;
    let products = web::block(move || state.catalog.list_all(&caller)).await??;
    Ok(HttpResponse::Ok().json(to_responses(products)))
}

/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let product = web::block(move || state.catalog.get(product_id)).await??;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 403, description = "Not an admin"),
    ),
    tag = "products"
)]
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner().into_input()?;
    let caller = identity.0;

    let product = web::block(move || state.catalog.create(&caller, input)).await??;
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let input = body.into_inner().into_input()?;
    let caller = identity.0;

    let product = web::block(move || state.catalog.update(&caller, product_id, input)).await??;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let caller = identity.0;

    web::block(move || state.catalog.delete(&caller, product_id)).await??;
    Ok(HttpResponse::NoContent().finish())
}

/// PATCH /api/products/{id}/availability
#[utoipa::path(
    patch,
    path = "/api/products/{id}/availability",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Availability toggled", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn toggle_availability(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let caller = identity.0;

    let product =
        web::block(move || state.catalog.toggle_availability(&caller, product_id)).await??;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}
