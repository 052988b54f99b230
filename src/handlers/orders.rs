use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{DeliveryInfo, LineRequest, OrderItemView, OrderView};
use crate::domain::status::OrderStatus;
use crate::errors::AppError;
use crate::security::Identity;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLineRequest>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status, e.g. "IN_PREPARATION".
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    /// Decimal amount as a string to avoid floating-point issues, e.g. "9.99"
    pub unit_price: String,
    pub subtotal: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryInfoResponse {
    pub courier_id: Uuid,
    pub courier_name: String,
    pub courier_phone: Option<String>,
    pub assigned_at: String,
    pub delivered_at: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub status: String,
    pub total: String,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
    pub delivery: Option<DeliveryInfoResponse>,
}

impl From<OrderItemView> for OrderItemResponse {
    fn from(item: OrderItemView) -> Self {
        OrderItemResponse {
            id: item.id,
            product_id: item.product_id,
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            subtotal: item.subtotal.to_string(),
        }
    }
}

impl From<DeliveryInfo> for DeliveryInfoResponse {
    fn from(info: DeliveryInfo) -> Self {
        DeliveryInfoResponse {
            courier_id: info.courier_id,
            courier_name: info.courier_name,
            courier_phone: info.courier_phone,
            assigned_at: info.assigned_at.to_rfc3339(),
            delivered_at: info.delivered_at.map(|t| t.to_rfc3339()),
        }
    }
}

impl From<OrderView> for OrderResponse {
    fn from(view: OrderView) -> Self {
        OrderResponse {
            id: view.id,
            customer_id: view.customer_id,
            customer_name: view.customer_name,
            status: view.status.as_str().to_string(),
            total: view.total.to_string(),
            delivery_address: view.delivery_address,
            notes: view.notes,
            created_at: view.created_at.to_rfc3339(),
            items: view.items.into_iter().map(Into::into).collect(),
            delivery: view.delivery.map(Into::into),
        }
    }
}

pub(crate) fn to_responses(views: Vec<OrderView>) -> Vec<OrderResponse> {
    views.into_iter().map(Into::into).collect()
}

pub(crate) fn parse_status(s: &str) -> Result<OrderStatus, AppError> {
    OrderStatus::parse(s).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown status '{s}'. Valid values: PENDING, IN_PREPARATION, READY_FOR_DELIVERY, \
             IN_TRANSIT, DELIVERED, CANCELLED"
        ))
    })
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Unknown product, unavailable product, or bad quantity"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let caller = identity.0;

    let view = web::block(move || {
        let lines = body
            .items
            .into_iter()
            .map(|l| LineRequest {
                product_id: l.product_id,
                quantity: l.quantity,
            })
            .collect();
        state
            .orders
            .create_order(&caller, lines, body.delivery_address, body.notes)
    })
    .await??;

    Ok(HttpResponse::Created().json(OrderResponse::from(view)))
}

/// GET /api/orders/my-orders
#[utoipa::path(
    get,
    path = "/api/orders/my-orders",
    responses((status = 200, description = "The caller's orders, newest first", body = [OrderResponse])),
    tag = "orders"
)]
pub async fn my_orders(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let caller = identity.0;
    let views = web::block(move || state.orders.my_orders(&caller)).await??;
    Ok(HttpResponse::Ok().json(to_responses(views)))
}

/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 403, description = "Not the caller's order"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let caller = identity.0;

    let view = web::block(move || state.orders.get_order(&caller, order_id)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(view)))
}

/// GET /api/orders/admin/all
#[utoipa::path(
    get,
    path = "/api/orders/admin/all",
    responses((status = 200, description = "All orders, newest first", body = [OrderResponse])),
    tag = "orders"
)]
pub async fn list_all(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let caller = identity.0;
    let views = web::block(move || state.orders.list_all(&caller)).await??;
    Ok(HttpResponse::Ok().json(to_responses(views)))
}

/// GET /api/orders/admin/status/{status}
#[utoipa::path(
    get,
    path = "/api/orders/admin/status/{status}",
    params(("status" = String, Path, description = "Order status, e.g. PENDING")),
    responses(
        (status = 200, description = "Orders in the given status", body = [OrderResponse]),
        (status = 400, description = "Unknown status"),
    ),
    tag = "orders"
)]
pub async fn list_by_status(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let status = parse_status(&path.into_inner())?;
    let caller = identity.0;

    let views = web::block(move || state.orders.list_by_status(&caller, status)).await??;
    Ok(HttpResponse::Ok().json(to_responses(views)))
}

/// PATCH /api/orders/admin/{id}/status
#[utoipa::path(
    patch,
    path = "/api/orders/admin/{id}/status",
    params(("id" = Uuid, Path, description = "Order UUID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Invalid transition"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn update_status(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let target = parse_status(&body.status)?;
    let caller = identity.0;

    let view = web::block(move || state.orders.update_status(&caller, order_id, target)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(view)))
}
