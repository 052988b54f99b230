use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::auth::RegisterInput;
use crate::domain::actor::Actor;
use crate::errors::AppError;
use crate::security::Identity;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    /// One of CUSTOMER, ADMIN, COURIER. Defaults to CUSTOMER.
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IdentityResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
}

fn auth_response(token: String, actor: Actor) -> AuthResponse {
    AuthResponse {
        token,
        id: actor.id,
        name: actor.name,
        email: actor.email,
        role: actor.role.as_str().to_string(),
    }
}

impl From<Actor> for IdentityResponse {
    fn from(actor: Actor) -> Self {
        IdentityResponse {
            id: actor.id,
            name: actor.name,
            email: actor.email,
            phone: actor.phone,
            role: actor.role.as_str().to_string(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Duplicate email or invalid role"),
    ),
    tag = "auth"
)]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let outcome = web::block(move || {
        state.auth.register(RegisterInput {
            name: body.name,
            email: body.email,
            phone: body.phone,
            password: body.password,
            role: body.role,
        })
    })
    .await??;

    Ok(HttpResponse::Created().json(auth_response(outcome.token, outcome.actor)))
}

/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "auth"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let outcome = web::block(move || state.auth.login(&body.email, &body.password)).await??;

    Ok(HttpResponse::Ok().json(auth_response(outcome.token, outcome.actor)))
}

/// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current identity", body = IdentityResponse),
        (status = 401, description = "Missing or invalid token"),
    ),
    tag = "auth"
)]
pub async fn me(state: web::Data<AppState>, identity: Identity) -> Result<HttpResponse, AppError> {
    let caller = identity.0;
    let actor = web::block(move || state.auth.current_identity(&caller)).await??;
    Ok(HttpResponse::Ok().json(IdentityResponse::from(actor)))
}
