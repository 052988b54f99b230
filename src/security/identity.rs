use std::future::{ready, Ready};

use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};

use crate::domain::actor::ActorRef;
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::security::TokenAuthority;

/// The authenticated caller, extracted from the `Authorization: Bearer`
/// header. Handlers take `Identity` as an argument; anything without a valid
/// token never reaches them.
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub ActorRef);

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<Identity, AppError> {
    let authority = req
        .app_data::<web::Data<TokenAuthority>>()
        .ok_or_else(|| AppError::Internal("token authority not configured".to_string()))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(DomainError::InvalidCredential)?;

    let actor = authority.validate(token)?;
    Ok(Identity(actor))
}
