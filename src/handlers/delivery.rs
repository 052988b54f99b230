use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::actor::Actor;
use crate::errors::AppError;
use crate::handlers::orders::{parse_status, to_responses, OrderResponse};
use crate::security::Identity;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRequest {
    pub order_id: Uuid,
    pub courier_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeliveryStatusRequest {
    /// IN_TRANSIT or DELIVERED.
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourierResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<Actor> for CourierResponse {
    fn from(actor: Actor) -> Self {
        CourierResponse {
            id: actor.id,
            name: actor.name,
            email: actor.email,
            phone: actor.phone,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/delivery/my-orders
#[utoipa::path(
    get,
    path = "/api/delivery/my-orders",
    responses((status = 200, description = "Orders assigned to the calling courier", body = [OrderResponse])),
    tag = "delivery"
)]
pub async fn my_assigned(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let caller = identity.0;
    let views = web::block(move || state.delivery.my_assigned(&caller)).await??;
    Ok(HttpResponse::Ok().json(to_responses(views)))
}

/// PATCH /api/delivery/orders/{id}/status
#[utoipa::path(
    patch,
    path = "/api/delivery/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order UUID")),
    request_body = DeliveryStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Invalid transition"),
        (status = 403, description = "Order not assigned to the caller"),
    ),
    tag = "delivery"
)]
pub async fn update_status(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<DeliveryStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let target = parse_status(&body.status)?;
    let caller = identity.0;

    let view =
        web::block(move || state.delivery.update_status(&caller, order_id, target)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(view)))
}

/// POST /api/delivery/admin/assign
#[utoipa::path(
    post,
    path = "/api/delivery/admin/assign",
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Courier assigned", body = OrderResponse),
        (status = 400, description = "Already assigned, not a courier, or bad order state"),
        (status = 404, description = "Order or courier not found"),
    ),
    tag = "delivery"
)]
pub async fn assign(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<AssignRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let caller = identity.0;

    let view =
        web::block(move || state.delivery.assign(&caller, body.order_id, body.courier_id))
            .await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(view)))
}

/// GET /api/delivery/admin/assignments
#[utoipa::path(
    get,
    path = "/api/delivery/admin/assignments",
    responses((status = 200, description = "All orders with assignment data joined in", body = [OrderResponse])),
    tag = "delivery"
)]
pub async fn list_assignments(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let caller = identity.0;
    let views = web::block(move || state.delivery.all_with_assignments(&caller)).await??;
    Ok(HttpResponse::Ok().json(to_responses(views)))
}

/// GET /api/delivery/admin/couriers
#[utoipa::path(
    get,
    path = "/api/delivery/admin/couriers",
    responses((status = 200, description = "Active couriers", body = [CourierResponse])),
    tag = "delivery"
)]
pub async fn couriers(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let caller = identity.0;
    let actors = web::block(move || state.delivery.courier_roster(&caller)).await??;
    let couriers: Vec<CourierResponse> = actors.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(couriers))
}
